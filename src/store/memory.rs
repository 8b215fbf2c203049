//! In-process content-addressed store
//!
//! Backs tests and offline use with the same contract the HTTP client
//! provides: ids are BLAKE3 digests of object content wrapped as CIDv1, so
//! identical content always maps to the identical id. Call counters let
//! tests assert how often lazy resolution actually hits the store.

use crate::dag::{ContentId, DagNode, Link};
use crate::error::StoreError;
use crate::store::{ObjectStat, RemoteStore};
use async_trait::async_trait;
use blake3::Hasher;
use bytes::Bytes;
use cid::Cid;
use multihash::Multihash;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Multihash code for BLAKE3.
const BLAKE3_CODE: u64 = 0x1e;
/// CIDv1 codecs: raw leaves and DAG nodes.
const CODEC_RAW: u64 = 0x55;
const CODEC_DAG: u64 = 0x70;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    links: Vec<Link>,
    size: u64,
    is_directory: bool,
}

/// In-memory [`RemoteStore`] implementation.
#[derive(Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<ContentId, StoredObject>>,
    put_calls: AtomicU64,
    get_calls: AtomicU64,
    stat_calls: AtomicU64,
    list_calls: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of put operations (blocks and nodes) served so far.
    pub fn put_calls(&self) -> u64 {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> u64 {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn stat_calls(&self) -> u64 {
        self.stat_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of objects currently held.
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    fn mint_id(codec: u64, digest: &[u8; 32]) -> ContentId {
        // wrap() only fails for digests over 64 bytes; BLAKE3 is 32.
        let hash = Multihash::<64>::wrap(BLAKE3_CODE, digest)
            .unwrap_or_else(|_| unreachable!("32-byte digest always fits"));
        ContentId::from_cid(Cid::new_v1(codec, hash))
    }

    /// Hash a block: id = blake3("block:" || data).
    fn block_id(data: &[u8]) -> ContentId {
        let mut hasher = Hasher::new();
        hasher.update(b"block:");
        hasher.update(data);
        Self::mint_id(CODEC_RAW, hasher.finalize().as_bytes())
    }

    /// Hash a node: id = blake3 over a domain-separated, length-prefixed
    /// encoding of (is_directory, data, links in order). Same (data, links)
    /// always yields the same id.
    fn node_id(node: &DagNode) -> ContentId {
        let mut hasher = Hasher::new();
        hasher.update(b"node:");
        hasher.update(&[node.is_directory() as u8]);
        hasher.update(&(node.data().len() as u64).to_be_bytes());
        hasher.update(node.data());
        for link in node.links() {
            let name = link.name.as_bytes();
            hasher.update(&(name.len() as u64).to_be_bytes());
            hasher.update(name);
            hasher.update(&link.target.to_bytes());
            hasher.update(&link.size.to_be_bytes());
            hasher.update(&[link.is_directory as u8]);
        }
        Self::mint_id(CODEC_DAG, hasher.finalize().as_bytes())
    }

    fn lookup(&self, id: &ContentId) -> Result<StoredObject, StoreError> {
        self.objects
            .read()
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound(*id))
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn put_block(&self, data: &[u8]) -> Result<ContentId, StoreError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        let id = Self::block_id(data);
        self.objects.write().insert(
            id,
            StoredObject {
                data: Bytes::copy_from_slice(data),
                links: Vec::new(),
                size: data.len() as u64,
                is_directory: false,
            },
        );
        Ok(id)
    }

    async fn put_node(&self, node: &DagNode) -> Result<ContentId, StoreError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        let id = Self::node_id(node);
        let size = if node.is_directory() { 0 } else { node.size() };
        self.objects.write().insert(
            id,
            StoredObject {
                data: Bytes::copy_from_slice(node.data()),
                links: node.links().to_vec(),
                size,
                is_directory: node.is_directory(),
            },
        );
        Ok(id)
    }

    async fn get(&self, id: &ContentId) -> Result<Bytes, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lookup(id)?.data)
    }

    async fn stat(&self, id: &ContentId) -> Result<ObjectStat, StoreError> {
        self.stat_calls.fetch_add(1, Ordering::SeqCst);
        let obj = self.lookup(id)?;
        Ok(ObjectStat {
            size: obj.size,
            num_links: obj.links.len() as u64,
            is_directory: obj.is_directory,
        })
    }

    async fn list_links(&self, id: &ContentId) -> Result<Vec<Link>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lookup(id)?.links)
    }
}
