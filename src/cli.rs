use clap::Parser;
use std::path::PathBuf;

use crate::traverse::{TraversalMode, TraverserConfig};

const AFTER_HELP: &str = "\
Examples:
  treecursor ~/Pictures -f -m '*.jpg' -m '*.png'
  treecursor . -d --match-dir '2023-*'
  treecursor /data -f -0 | xargs -0 sha256sum
  treecursor . --step --scoped";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "treecursor",
    version,
    about = "Resumable directory tree traverser",
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Directory to traverse (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Only emit directories
    #[arg(short = 'd', long = "dirs-only", conflicts_with = "files_only")]
    pub dirs_only: bool,

    /// Only emit files
    #[arg(short = 'f', long = "files-only")]
    pub files_only: bool,

    /// Glob a directory name must match to be emitted (repeatable)
    #[arg(long = "match-dir", action = clap::ArgAction::Append)]
    pub match_dirs: Vec<String>,

    /// Glob a file name must match to be emitted (repeatable)
    #[arg(short = 'm', long = "match", action = clap::ArgAction::Append)]
    pub match_files: Vec<String>,

    /// Include hidden directories and files (dot-prefixed)
    #[arg(short = 'a', long = "all")]
    pub show_hidden: bool,

    /// Include hidden directories
    #[arg(long = "hidden-dirs")]
    pub hidden_dirs: bool,

    /// Include hidden files
    #[arg(long = "hidden-files")]
    pub hidden_files: bool,

    /// Directory name to skip entirely (repeatable)
    #[arg(long = "ignore-dir", action = clap::ArgAction::Append)]
    pub ignore_dirs: Vec<String>,

    /// File name to skip (repeatable)
    #[arg(long = "ignore-file", action = clap::ArgAction::Append)]
    pub ignore_files: Vec<String>,

    /// Do not skip OS junk such as .DS_Store or .Trash
    #[arg(long = "no-default-ignores")]
    pub no_default_ignores: bool,

    /// Max traversal depth
    #[arg(short = 'L', long = "level")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links to directories
    #[arg(long = "follow-symlinks")]
    pub follow_symlinks: bool,

    /// Keep raw directory-listing order instead of sorting by name
    #[arg(long = "unsorted")]
    pub unsorted: bool,

    /// Keep file stepping inside the current directory
    #[arg(long = "scoped")]
    pub scoped: bool,

    /// Separate output paths with NUL instead of newline
    #[arg(short = '0', long = "null")]
    pub null: bool,

    /// Step through the tree interactively (d: next dir, f: next file, r: reset, q: quit)
    #[arg(long = "step", conflicts_with = "null")]
    pub step: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress error messages for unreadable directories
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        // Respect NO_COLOR env var
        if std::env::var_os("NO_COLOR").is_some() {
            self.no_color = true;
        }
        // NUL-separated output is meant for pipes, never colored.
        if self.null {
            self.no_color = true;
        }
        if self.show_hidden {
            self.hidden_dirs = true;
            self.hidden_files = true;
        }
        self
    }

    pub fn mode(&self) -> TraversalMode {
        if self.dirs_only {
            TraversalMode::DirsOnly
        } else if self.files_only {
            TraversalMode::FilesOnly
        } else {
            TraversalMode::DirsAndFiles
        }
    }

    /// Translate the command line into a traversal configuration.
    pub fn traverser_config(&self) -> TraverserConfig {
        let mut config = TraverserConfig {
            mode: self.mode(),
            ignore_hidden_dirs: !self.hidden_dirs,
            ignore_hidden_files: !self.hidden_files,
            files_scoped_to_current_dir: self.scoped,
            follow_symlinks: self.follow_symlinks,
            max_depth: self.max_depth,
            sort_entries: !self.unsorted,
            ..TraverserConfig::default()
        };
        if self.no_default_ignores {
            config = config.without_default_ignores();
        }
        if !self.match_dirs.is_empty() {
            config.match_dirs = self.match_dirs.clone();
        }
        if !self.match_files.is_empty() {
            config.match_files = self.match_files.clone();
        }
        config.ignore_dirs.extend(self.ignore_dirs.iter().cloned());
        config.ignore_files.extend(self.ignore_files.iter().cloned());
        config
    }

    /// Default log filter directive derived from `-v`/`-q`.
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            return "off";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
