//! Named edges between DAG nodes

use crate::dag::ContentId;
use serde::{Deserialize, Serialize};

/// A named, sized reference to another node.
///
/// A link is a weak reference by id only: it carries no content and
/// resolving it requires a separate fetch through the store. Immutable
/// once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Entry name within the parent (file or subdirectory base name).
    pub name: String,
    /// Content id of the target node.
    pub target: ContentId,
    /// Size of the target in bytes. Zero for directories by convention.
    pub size: u64,
    /// Whether the target is a directory node.
    pub is_directory: bool,
}

impl Link {
    pub fn new(name: impl Into<String>, target: ContentId, size: u64, is_directory: bool) -> Self {
        Self {
            name: name.into(),
            target,
            size,
            is_directory,
        }
    }

    /// A link to a file (leaf) node.
    pub fn file(name: impl Into<String>, target: ContentId, size: u64) -> Self {
        Self::new(name, target, size, false)
    }

    /// A link to a directory node. Directory links carry size zero.
    pub fn directory(name: impl Into<String>, target: ContentId) -> Self {
        Self::new(name, target, 0, true)
    }
}
