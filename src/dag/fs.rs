//! File-system semantics over lazy nodes
//!
//! UnixFS-style conventions: a directory is a node whose links are named
//! entries; a file is either an inline leaf (data on the node itself) or a
//! chunked file whose links point at data chunks in order.

use crate::dag::{Link, MerkleNode};
use crate::error::DagError;
use crate::store::RemoteStore;
use bytes::{Bytes, BytesMut};
use std::sync::Arc;

/// A [`MerkleNode`] with a known file-or-directory type.
#[derive(Debug)]
pub struct FileSystemNode {
    node: MerkleNode,
    is_directory: bool,
}

impl FileSystemNode {
    pub(crate) fn new(node: MerkleNode, is_directory: bool) -> Self {
        Self { node, is_directory }
    }

    /// Wrap a lazy node, resolving its type via stat if not yet cached.
    pub async fn from_merkle(node: MerkleNode) -> Result<Self, DagError> {
        let is_directory = node.is_directory().await?;
        Ok(Self { node, is_directory })
    }

    /// Dereference a directory entry link. The link's type flag is
    /// authoritative, so no stat round-trip happens here.
    pub fn from_link(store: Arc<dyn RemoteStore>, link: &Link) -> Self {
        Self {
            node: MerkleNode::from_link(store, link),
            is_directory: link.is_directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.is_directory
    }

    pub fn id(&self) -> crate::dag::ContentId {
        self.node.id()
    }

    pub fn name(&self) -> Option<&str> {
        self.node.name()
    }

    /// The underlying lazy node.
    pub fn merkle(&self) -> &MerkleNode {
        &self.node
    }

    pub fn into_merkle(self) -> MerkleNode {
        self.node
    }

    /// Directory entries, one node per link.
    ///
    /// For a file node the links are data chunks, not entries, so this
    /// returns an empty list; use [`read`](Self::read) instead.
    pub async fn entries(&self) -> Result<Vec<FileSystemNode>, DagError> {
        if !self.is_directory {
            return Ok(Vec::new());
        }
        let links = self.node.links().await?;
        Ok(links
            .iter()
            .map(|link| Self::from_link(Arc::clone(self.node.store()), link))
            .collect())
    }

    /// File content.
    ///
    /// Inline leaves return the node's own data; chunked files concatenate
    /// each chunk link's data in link order. Directories read as empty.
    pub async fn read(&self) -> Result<Bytes, DagError> {
        if self.is_directory {
            return Ok(Bytes::new());
        }
        let links = self.node.links().await?;
        if links.is_empty() {
            return Ok(self.node.data().await?.clone());
        }
        let chunks = links.to_vec();
        let mut buf = BytesMut::new();
        for chunk in &chunks {
            let child = self.node.child(chunk);
            buf.extend_from_slice(child.data().await?);
        }
        Ok(buf.freeze())
    }
}
