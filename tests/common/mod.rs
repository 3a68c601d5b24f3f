#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use treecursor::{TraversalMode, TraverserConfig, TreeTraverser};

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "Some text").unwrap();
        }
    }
    tmp
}

/// The photo-library shaped tree used across the traversal tests.
///
/// ```text
/// dir1/{file1_1, file1_2, file_1_3, .file1_4, .file1_5}
/// dir2/dir2_1/file2_1
/// dir2/dir2_2/
/// dir2/.dir2_3/
/// .dir3/
/// .dir4/.file4_1
/// ```
pub fn library_fixture() -> TempDir {
    create_fixture(&[
        "dir1/file1_1",
        "dir1/file1_2",
        "dir1/file_1_3",
        "dir1/.file1_4",
        "dir1/.file1_5",
        "dir2/dir2_1/file2_1",
        "dir2/dir2_2/",
        "dir2/.dir2_3/",
        ".dir3/",
        ".dir4/.file4_1",
    ])
}

/// Config with the given mode and both hidden switches set to `ignore_hidden`.
pub fn config(mode: TraversalMode, ignore_hidden: bool) -> TraverserConfig {
    TraverserConfig {
        mode,
        ..TraverserConfig::default()
    }
    .with_ignore_hidden(ignore_hidden)
}

/// Join relative paths onto `root`, collecting into a set.
pub fn paths(root: &Path, rels: &[&str]) -> HashSet<PathBuf> {
    rels.iter()
        .map(|r| if r.is_empty() { root.to_path_buf() } else { root.join(r) })
        .collect()
}

/// Run the iterator to completion, panicking on any error.
pub fn collect(root: &Path, config: TraverserConfig) -> Vec<PathBuf> {
    TreeTraverser::new(root, config)
        .unwrap()
        .map(|r| r.unwrap())
        .collect()
}

pub fn collect_set(root: &Path, config: TraverserConfig) -> HashSet<PathBuf> {
    collect(root, config).into_iter().collect()
}
