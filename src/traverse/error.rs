use std::io;
use std::path::{Path, PathBuf};

/// Errors produced while constructing or stepping a [`TreeTraverser`].
///
/// Exhaustion is not an error: step operations return `Ok(None)` instead.
///
/// [`TreeTraverser`]: super::TreeTraverser
#[derive(Debug, thiserror::Error)]
pub enum TraverseError {
    /// The traversal root does not exist.
    #[error("{}: No such file or directory", .path.display())]
    RootNotFound { path: PathBuf },

    /// The traversal root exists but is not a directory.
    #[error("{}: Not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// Metadata for the root could not be read for a reason other than absence.
    #[error("failed to inspect traversal root '{}': {source}", .path.display())]
    RootMetadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A match pattern failed to compile.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Both directory and file emission were switched off.
    #[error("traversal must emit directories, files, or both")]
    NoEmission,

    /// Listing a directory failed. Scoped to the call that hit it; the
    /// traversal itself can continue.
    #[error("failed to read directory '{}': {source}", .path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TraverseError {
    pub(crate) fn listing(path: PathBuf, source: io::Error) -> Self {
        Self::Listing { path, source }
    }

    /// Whether this error was raised while building the traverser rather than
    /// while stepping through it.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Listing { .. })
    }

    /// The filesystem path tied to the failure, if there is one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::RootNotFound { path }
            | Self::NotADirectory { path }
            | Self::RootMetadata { path, .. }
            | Self::Listing { path, .. } => Some(path),
            Self::InvalidPattern { .. } | Self::NoEmission => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn listing_error_is_not_configuration() {
        let err = TraverseError::listing(
            PathBuf::from("dir"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_configuration());
        assert_eq!(err.path(), Some(Path::new("dir")));
        assert_eq!(err.to_string(), "failed to read directory 'dir': denied");
    }

    #[test]
    fn listing_error_exposes_io_source() {
        let err = TraverseError::listing(
            PathBuf::from("dir"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let source = err
            .source()
            .and_then(|e| e.downcast_ref::<io::Error>())
            .expect("listing error should carry an io::Error");
        assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn root_errors_are_configuration() {
        let missing = TraverseError::RootNotFound {
            path: PathBuf::from("/nope"),
        };
        assert!(missing.is_configuration());
        assert!(missing.to_string().contains("No such file"));

        let file = TraverseError::NotADirectory {
            path: PathBuf::from("/etc/hosts"),
        };
        assert!(file.to_string().contains("Not a directory"));
        assert!(TraverseError::NoEmission.path().is_none());
    }
}
