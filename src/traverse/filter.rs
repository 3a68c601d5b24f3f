use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::ffi::OsStr;

use super::{TraverseError, TraverserConfig};

/// Compile glob patterns into a single set. Any invalid pattern aborts.
pub fn build_match_set(patterns: &[String]) -> Result<GlobSet, TraverseError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| TraverseError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| TraverseError::InvalidPattern {
        pattern: patterns.join(","),
        source,
    })
}

/// Name-based admission rules for one entry kind (directories or files).
#[derive(Debug, Clone)]
pub(crate) struct NameFilter {
    matches: GlobSet,
    ignored: HashSet<String>,
    ignore_hidden: bool,
}

impl NameFilter {
    fn new(
        patterns: &[String],
        ignored: &[String],
        ignore_hidden: bool,
    ) -> Result<Self, TraverseError> {
        Ok(Self {
            matches: build_match_set(patterns)?,
            ignored: ignored.iter().cloned().collect(),
            ignore_hidden,
        })
    }

    /// Ignore list and hidden rule only. Decides whether a directory is
    /// entered at all, independent of whether it is emitted.
    pub(crate) fn admits(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        if self.ignore_hidden && name.starts_with('.') {
            return false;
        }
        !self.ignored.contains(name.as_ref())
    }

    /// Match patterns only.
    pub(crate) fn matches(&self, name: &OsStr) -> bool {
        self.matches.is_match(name)
    }

    /// Admission and pattern match combined.
    pub(crate) fn accepts(&self, name: &OsStr) -> bool {
        self.admits(name) && self.matches(name)
    }
}

/// Compiled directory and file filters for a traversal.
#[derive(Debug, Clone)]
pub(crate) struct EntryFilter {
    pub(crate) dirs: NameFilter,
    pub(crate) files: NameFilter,
}

impl EntryFilter {
    pub(crate) fn compile(config: &TraverserConfig) -> Result<Self, TraverseError> {
        Ok(Self {
            dirs: NameFilter::new(
                &config.match_dirs,
                &config.ignore_dirs,
                config.ignore_hidden_dirs,
            )?,
            files: NameFilter::new(
                &config.match_files,
                &config.ignore_files,
                config.ignore_hidden_files,
            )?,
        })
    }
}
