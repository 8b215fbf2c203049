//! Recursive directory add
//!
//! Walks a local directory tree, uploads file contents to the store, and
//! assembles directory nodes bottom-up into a single composite node.

pub mod builder;
pub mod walker;

pub use builder::DirectoryBuilder;
pub use walker::{Walker, WalkerConfig};
