use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// How an immediate child is treated by the traverser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChildKind {
    Dir,
    File,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone)]
pub(super) struct Child {
    pub(super) name: OsString,
    pub(super) path: PathBuf,
    pub(super) kind: ChildKind,
}

/// Outcome of listing a directory that may have been removed under us.
pub(super) enum Listing {
    Entries(Vec<Child>),
    Vanished,
}

/// List the immediate children of `dir`.
///
/// Only directories and regular files (or symlinks to them) are returned.
/// A directory that no longer exists yields [`Listing::Vanished`]; any other
/// failure to read `dir` itself is returned as an error. Per-entry failures,
/// such as a dangling symlink when following links, are logged and skipped.
pub(super) fn list_children(dir: &Path, follow_symlinks: bool, sort: bool) -> io::Result<Listing> {
    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(follow_symlinks);
    if sort {
        walker = walker.sort_by_file_name();
    }

    let mut children = Vec::new();
    for entry_result in walker {
        match entry_result {
            Ok(entry) => {
                if let Some(kind) = classify(&entry) {
                    children.push(Child {
                        name: entry.file_name().to_os_string(),
                        path: entry.into_path(),
                        kind,
                    });
                }
            }
            Err(e) if e.depth() == 0 => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                let io_err = match e.into_io_error() {
                    Some(io_err) => io_err,
                    None => io::Error::other(format!("{}: unreadable", path.display())),
                };
                if io_err.kind() == io::ErrorKind::NotFound {
                    return Ok(Listing::Vanished);
                }
                return Err(io_err);
            }
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
            }
        }
    }
    Ok(Listing::Entries(children))
}

fn classify(entry: &DirEntry) -> Option<ChildKind> {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        Some(ChildKind::Dir)
    } else if file_type.is_file() {
        Some(ChildKind::File)
    } else if file_type.is_symlink() && entry.path().is_file() {
        // Not following links: file symlinks still count as files, directory
        // symlinks are left alone.
        Some(ChildKind::File)
    } else {
        None
    }
}
