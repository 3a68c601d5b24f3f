//! Traversal configuration and emission modes.

use super::TraverseError;

/// Directory names skipped by default: OS trash and indexing folders.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    ".Trash",
    ".Trashes",
    ".Spotlight-V100",
    ".fseventsd",
    "$RECYCLE.BIN",
    "System Volume Information",
];

/// File names skipped by default: OS metadata droppings.
pub const DEFAULT_IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

/// What the iterator protocol yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMode {
    /// Only directories.
    DirsOnly,
    /// Only files, as one flat sequence across the whole tree.
    FilesOnly,
    /// Each directory, immediately followed by its files.
    #[default]
    DirsAndFiles,
}

impl TraversalMode {
    /// Build a mode from independent "emit directories" / "emit files" flags.
    pub fn from_flags(emits_dirs: bool, emits_files: bool) -> Result<Self, TraverseError> {
        match (emits_dirs, emits_files) {
            (true, true) => Ok(Self::DirsAndFiles),
            (true, false) => Ok(Self::DirsOnly),
            (false, true) => Ok(Self::FilesOnly),
            (false, false) => Err(TraverseError::NoEmission),
        }
    }

    pub fn emits_dirs(self) -> bool {
        matches!(self, Self::DirsOnly | Self::DirsAndFiles)
    }

    pub fn emits_files(self) -> bool {
        matches!(self, Self::FilesOnly | Self::DirsAndFiles)
    }
}

/// Configuration for a single traversal. Immutable once handed to a
/// [`TreeTraverser`](super::TreeTraverser).
#[derive(Debug, Clone, PartialEq)]
pub struct TraverserConfig {
    /// Glob patterns a directory name must match (any of) to be emitted.
    pub match_dirs: Vec<String>,
    /// Glob patterns a file name must match (any of) to be emitted.
    pub match_files: Vec<String>,
    /// Skip directories whose name starts with a dot, along with everything below them.
    pub ignore_hidden_dirs: bool,
    /// Skip files whose name starts with a dot.
    pub ignore_hidden_files: bool,
    /// Exact directory names never entered.
    pub ignore_dirs: Vec<String>,
    /// Exact file names never emitted.
    pub ignore_files: Vec<String>,
    /// What the iterator yields.
    pub mode: TraversalMode,
    /// Keep `next_file` inside the current directory instead of advancing.
    pub files_scoped_to_current_dir: bool,
    /// Descend into symlinked directories (cycles are detected).
    pub follow_symlinks: bool,
    /// Maximum depth below the root (`None` for unlimited). The root is depth 0.
    pub max_depth: Option<usize>,
    /// Sort siblings by file name instead of keeping raw listing order.
    pub sort_entries: bool,
}

impl Default for TraverserConfig {
    fn default() -> Self {
        Self {
            match_dirs: vec!["*".to_string()],
            match_files: vec!["*".to_string()],
            ignore_hidden_dirs: true,
            ignore_hidden_files: true,
            ignore_dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            ignore_files: DEFAULT_IGNORED_FILES.iter().map(|s| s.to_string()).collect(),
            mode: TraversalMode::default(),
            files_scoped_to_current_dir: false,
            follow_symlinks: false,
            max_depth: None,
            sort_entries: true,
        }
    }
}

impl TraverserConfig {
    /// Defaults, yielding directories only.
    pub fn dirs() -> Self {
        Self {
            mode: TraversalMode::DirsOnly,
            ..Self::default()
        }
    }

    /// Defaults, yielding files only.
    pub fn files() -> Self {
        Self {
            mode: TraversalMode::FilesOnly,
            ..Self::default()
        }
    }

    /// Set both hidden-entry switches at once.
    pub fn with_ignore_hidden(mut self, ignore: bool) -> Self {
        self.ignore_hidden_dirs = ignore;
        self.ignore_hidden_files = ignore;
        self
    }

    /// Drop the built-in OS junk names from both ignore lists.
    pub fn without_default_ignores(mut self) -> Self {
        self.ignore_dirs
            .retain(|name| !DEFAULT_IGNORED_DIRS.contains(&name.as_str()));
        self.ignore_files
            .retain(|name| !DEFAULT_IGNORED_FILES.contains(&name.as_str()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_flags_covers_all_combinations() {
        assert_eq!(
            TraversalMode::from_flags(true, true).unwrap(),
            TraversalMode::DirsAndFiles
        );
        assert_eq!(
            TraversalMode::from_flags(true, false).unwrap(),
            TraversalMode::DirsOnly
        );
        assert_eq!(
            TraversalMode::from_flags(false, true).unwrap(),
            TraversalMode::FilesOnly
        );
        assert!(matches!(
            TraversalMode::from_flags(false, false),
            Err(TraverseError::NoEmission)
        ));
    }

    #[test]
    fn emission_flags_round_trip_through_mode() {
        for mode in [
            TraversalMode::DirsOnly,
            TraversalMode::FilesOnly,
            TraversalMode::DirsAndFiles,
        ] {
            let rebuilt = TraversalMode::from_flags(mode.emits_dirs(), mode.emits_files()).unwrap();
            assert_eq!(rebuilt, mode);
        }
    }

    #[test]
    fn defaults_match_everything_and_hide_dotfiles() {
        let cfg = TraverserConfig::default();
        assert_eq!(cfg.match_dirs, vec!["*"]);
        assert_eq!(cfg.match_files, vec!["*"]);
        assert!(cfg.ignore_hidden_dirs && cfg.ignore_hidden_files);
        assert!(cfg.ignore_files.iter().any(|n| n == ".DS_Store"));
        assert_eq!(cfg.mode, TraversalMode::DirsAndFiles);
        assert!(!cfg.files_scoped_to_current_dir);
    }

    #[test]
    fn with_ignore_hidden_sets_both_switches() {
        let cfg = TraverserConfig::files().with_ignore_hidden(false);
        assert!(!cfg.ignore_hidden_dirs);
        assert!(!cfg.ignore_hidden_files);
        assert_eq!(cfg.mode, TraversalMode::FilesOnly);
    }

    #[test]
    fn without_default_ignores_keeps_user_names() {
        let mut cfg = TraverserConfig::default();
        cfg.ignore_dirs.push("cache".to_string());
        let cfg = cfg.without_default_ignores();
        assert_eq!(cfg.ignore_dirs, vec!["cache"]);
        assert!(cfg.ignore_files.is_empty());
    }
}
