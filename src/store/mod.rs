//! Remote store abstraction
//!
//! The single seam between the DAG object model and whatever holds the
//! actual content: an IPFS-style daemon over HTTP in production
//! ([`ApiClient`](crate::client::ApiClient)), or the in-process
//! [`MemoryStore`] in tests and offline use. Backends are stateless and
//! thread-safe from the core's perspective; they own no client-side locks
//! visible to callers.

pub mod memory;

pub use memory::MemoryStore;

use crate::dag::{ContentId, DagNode, Link};
use crate::error::StoreError;
use async_trait::async_trait;
use bytes::Bytes;

/// Object metadata returned by [`RemoteStore::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectStat {
    /// Object size in bytes. Zero for directories by convention; a
    /// directory's cumulative subtree size needs a separate daemon call.
    pub size: u64,
    /// Number of outgoing links.
    pub num_links: u64,
    /// Whether the object is a directory node.
    pub is_directory: bool,
}

/// Content-addressable storage service.
///
/// Put operations are pure functions of content: the same bytes or the same
/// (data, links) node always yield the same id. That property is what lets
/// hash equality stand in for value equality across the DAG model.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Store a raw block of bytes, returning its content id.
    async fn put_block(&self, data: &[u8]) -> Result<ContentId, StoreError>;

    /// Store an explicit DAG node (data + links), returning its content id.
    async fn put_node(&self, node: &DagNode) -> Result<ContentId, StoreError>;

    /// Fetch the raw bytes of an object.
    async fn get(&self, id: &ContentId) -> Result<Bytes, StoreError>;

    /// Fetch object metadata.
    async fn stat(&self, id: &ContentId) -> Result<ObjectStat, StoreError>;

    /// List the outgoing links of an object.
    async fn list_links(&self, id: &ContentId) -> Result<Vec<Link>, StoreError>;
}
