use std::collections::{HashSet, VecDeque};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::filter::EntryFilter;
use super::listing::{list_children, ChildKind, Listing};
use super::{TraversalMode, TraverseError, TraverserConfig};

/// Resumable depth-first directory tree cursor.
///
/// Drive it step by step with [`next_dir`](Self::next_dir) and
/// [`next_file`](Self::next_file), or as an [`Iterator`] whose items are
/// chosen by [`TraverserConfig::mode`]. Both styles share the same state and
/// may be interleaved.
///
/// Children of a visited directory are queued ahead of its already pending
/// siblings, so the frontier stays proportional to depth times fan-out
/// rather than to a whole tree level.
#[derive(Debug)]
pub struct TreeTraverser {
    root: PathBuf,
    /// Name matched against `match_dirs` for the root itself. `None` only for
    /// a filesystem root such as `/`.
    root_name: Option<OsString>,
    config: TraverserConfig,
    filter: EntryFilter,
    frontier: VecDeque<(PathBuf, usize)>,
    current: Option<(PathBuf, usize)>,
    files: VecDeque<PathBuf>,
    files_populated: bool,
    started: bool,
    visited: HashSet<PathBuf>,
}

impl TreeTraverser {
    /// Validate `root` and compile the configured patterns.
    ///
    /// Fails if the root is missing, not a directory, or a pattern is invalid.
    pub fn new(root: impl Into<PathBuf>, config: TraverserConfig) -> Result<Self, TraverseError> {
        let root = root.into();
        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(TraverseError::NotADirectory { path: root }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TraverseError::RootNotFound { path: root });
            }
            Err(source) => return Err(TraverseError::RootMetadata { path: root, source }),
        }

        let root_name = resolve_root_name(&root)?;
        let filter = EntryFilter::compile(&config)?;
        let mut traverser = Self {
            root,
            root_name,
            config,
            filter,
            frontier: VecDeque::new(),
            current: None,
            files: VecDeque::new(),
            files_populated: false,
            started: false,
            visited: HashSet::new(),
        };
        traverser.reset();
        Ok(traverser)
    }

    /// Rewind to the state right after construction.
    ///
    /// Replaying yields the same sequence as long as the tree is unchanged.
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.frontier.push_back((self.root.clone(), 0));
        self.current = None;
        self.files.clear();
        self.files_populated = false;
        self.started = false;
        self.visited.clear();
        tracing::trace!(root = %self.root.display(), "traversal reset");
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &TraverserConfig {
        &self.config
    }

    /// The directory whose files `next_file` is currently handing out.
    pub fn current_dir(&self) -> Option<&Path> {
        self.current.as_ref().map(|(path, _)| path.as_path())
    }

    /// Number of directories discovered but not yet visited.
    pub fn pending_dirs(&self) -> usize {
        self.frontier.len()
    }

    /// True once every directory has been visited and no buffered file remains.
    ///
    /// Conservative: queued directories count as remaining work even when they
    /// turn out to be vanished or unmatched, so this can report `false` right
    /// before `next_dir` returns `Ok(None)`.
    pub fn is_exhausted(&self) -> bool {
        self.started && self.frontier.is_empty() && self.files_populated && self.files.is_empty()
    }

    /// Advance to the next directory whose name matches `match_dirs`.
    ///
    /// Returns `Ok(None)` once the frontier is exhausted, and keeps doing so
    /// until [`reset`](Self::reset). A directory that cannot be listed is
    /// dropped and reported as [`TraverseError::Listing`]; the following call
    /// resumes with the rest of the tree.
    pub fn next_dir(&mut self) -> Result<Option<PathBuf>, TraverseError> {
        self.started = true;
        self.current = None;
        self.files.clear();
        self.files_populated = true;

        while let Some((dir, depth)) = self.frontier.pop_front() {
            let is_root = depth == 0;
            if !is_root {
                let Some(name) = dir.file_name() else {
                    continue;
                };
                if !self.filter.dirs.admits(name) {
                    continue;
                }
            }
            if !dir.exists() {
                tracing::debug!(path = %dir.display(), "queued directory vanished, skipping");
                continue;
            }
            if !self.expand(&dir, depth)? {
                continue;
            }

            let name = if is_root {
                self.root_name.as_deref()
            } else {
                dir.file_name()
            };
            let emit = match name {
                Some(name) => self.filter.dirs.matches(name),
                None => is_root,
            };
            if !emit {
                tracing::trace!(path = %dir.display(), "directory traversed without emission");
                continue;
            }

            self.current = Some((dir.clone(), depth));
            self.files_populated = false;
            return Ok(Some(dir));
        }
        Ok(None)
    }

    /// Hand out the next file.
    ///
    /// With `files_scoped_to_current_dir` set this stops at the end of the
    /// current directory; otherwise it moves on through the tree (without
    /// emitting directories) until a file turns up or the tree is exhausted.
    pub fn next_file(&mut self) -> Result<Option<PathBuf>, TraverseError> {
        if self.config.files_scoped_to_current_dir {
            if !self.started {
                self.next_dir()?;
            }
            self.pop_file()
        } else {
            self.next_file_chained()
        }
    }

    fn next_file_chained(&mut self) -> Result<Option<PathBuf>, TraverseError> {
        if !self.started && self.next_dir()?.is_none() {
            return Ok(None);
        }
        loop {
            if let Some(file) = self.pop_file()? {
                return Ok(Some(file));
            }
            if self.next_dir()?.is_none() {
                return Ok(None);
            }
        }
    }

    fn pop_file(&mut self) -> Result<Option<PathBuf>, TraverseError> {
        if !self.files_populated {
            self.populate_files()?;
        }
        Ok(self.files.pop_front())
    }

    /// Fill the file buffer for the current directory. Runs once per visit,
    /// even when it finds nothing or fails.
    fn populate_files(&mut self) -> Result<(), TraverseError> {
        self.files_populated = true;
        self.files.clear();
        let Some((dir, depth)) = self.current.clone() else {
            return Ok(());
        };
        if self.beyond_max_depth(depth + 1) {
            return Ok(());
        }

        let listing = list_children(&dir, self.config.follow_symlinks, self.config.sort_entries);
        let children = match listing {
            Ok(Listing::Entries(children)) => children,
            Ok(Listing::Vanished) => {
                tracing::debug!(path = %dir.display(), "current directory vanished");
                return Ok(());
            }
            Err(source) => return Err(TraverseError::listing(dir, source)),
        };

        let accepts = &self.filter.files;
        self.files.extend(
            children
                .into_iter()
                .filter(|c| c.kind == ChildKind::File && accepts.accepts(&c.name))
                .map(|c| c.path),
        );
        tracing::trace!(path = %dir.display(), files = self.files.len(), "file buffer populated");
        Ok(())
    }

    /// Queue the admitted sub-directories of `dir` ahead of the rest of the
    /// frontier. Returns `false` if `dir` disappeared or was already visited.
    fn expand(&mut self, dir: &Path, depth: usize) -> Result<bool, TraverseError> {
        if self.config.follow_symlinks {
            match fs::canonicalize(dir) {
                Ok(canonical) => {
                    if !self.visited.insert(canonical) {
                        tracing::debug!(path = %dir.display(), "already visited, skipping");
                        return Ok(false);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
                Err(source) => return Err(TraverseError::listing(dir.to_path_buf(), source)),
            }
        }

        if self.beyond_max_depth(depth + 1) {
            return Ok(true);
        }

        let listing = list_children(dir, self.config.follow_symlinks, self.config.sort_entries);
        let children = match listing {
            Ok(Listing::Entries(children)) => children,
            Ok(Listing::Vanished) => {
                tracing::debug!(path = %dir.display(), "directory vanished, skipping");
                return Ok(false);
            }
            Err(source) => return Err(TraverseError::listing(dir.to_path_buf(), source)),
        };

        let subdirs: Vec<PathBuf> = children
            .into_iter()
            .filter(|c| c.kind == ChildKind::Dir && self.filter.dirs.admits(&c.name))
            .map(|c| c.path)
            .collect();
        for sub in subdirs.into_iter().rev() {
            self.frontier.push_front((sub, depth + 1));
        }
        Ok(true)
    }

    fn beyond_max_depth(&self, depth: usize) -> bool {
        self.config.max_depth.is_some_and(|max| depth > max)
    }

    /// Consume the traverser as a plain path iterator, logging and skipping
    /// listing errors.
    pub fn into_paths(self) -> impl Iterator<Item = PathBuf> {
        self.filter_map(|result| match result {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory");
                None
            }
        })
    }
}

/// Name of the root as written, or of the directory it resolves to when the
/// path ends in `.` or `..`.
fn resolve_root_name(root: &Path) -> Result<Option<OsString>, TraverseError> {
    if let Some(name) = root.file_name() {
        return Ok(Some(name.to_os_string()));
    }
    let canonical = fs::canonicalize(root).map_err(|source| TraverseError::RootMetadata {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(canonical.file_name().map(|name| name.to_os_string()))
}

impl Iterator for TreeTraverser {
    type Item = Result<PathBuf, TraverseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match self.config.mode {
            TraversalMode::DirsOnly => self.next_dir(),
            TraversalMode::FilesOnly => self.next_file_chained(),
            TraversalMode::DirsAndFiles => {
                if self.started && self.current.is_some() {
                    match self.pop_file() {
                        Ok(Some(file)) => return Some(Ok(file)),
                        Ok(None) => self.next_dir(),
                        Err(e) => Err(e),
                    }
                } else {
                    self.next_dir()
                }
            }
        };
        step.transpose()
    }
}
