//! Resumable directory tree traversal: configuration, filtering, and the
//! cursor/iterator state machine.

mod config;
mod error;
mod filter;
mod listing;
mod traverser;

pub use config::{TraversalMode, TraverserConfig, DEFAULT_IGNORED_DIRS, DEFAULT_IGNORED_FILES};
pub use error::TraverseError;
pub use filter::build_match_set;
pub use traverser::TreeTraverser;
