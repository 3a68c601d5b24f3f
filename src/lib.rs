#![forbid(unsafe_code)]
//! treecursor: a resumable directory tree traverser usable as a step-by-step
//! cursor or as an iterator over directories, files, or both.

pub mod cli;
pub mod render;
pub mod stepper;
pub mod terminal;
pub mod traverse;

pub use traverse::{TraversalMode, TraverseError, TraverserConfig, TreeTraverser};
