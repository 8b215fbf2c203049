//! Lazy self-fetching DAG nodes
//!
//! A `MerkleNode` is identified only by its content id; its size, type,
//! links and data are fetched from the store on first access and memoized
//! for the life of the instance. Because ids are content-derived the
//! backing object cannot change, so caches never expire and there is no
//! refresh API.
//!
//! The store is injected at construction. There is no default client and
//! no shared global transport; two nodes built from the same id are
//! independent cache copies.

use crate::dag::{ContentId, Link};
use crate::error::{DagError, FormatError, StoreError};
use crate::store::{ObjectStat, RemoteStore};
use bytes::Bytes;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::trace;

/// A node known by id, with lazily resolved attributes.
pub struct MerkleNode {
    id: ContentId,
    /// Display metadata only; not part of identity.
    name: Option<String>,
    store: Arc<dyn RemoteStore>,
    stat: OnceCell<ObjectStat>,
    links: OnceCell<Vec<Link>>,
    data: OnceCell<Bytes>,
}

impl MerkleNode {
    /// A node for a known id, with all attribute caches unresolved.
    pub fn new(store: Arc<dyn RemoteStore>, id: ContentId) -> Self {
        Self {
            id,
            name: None,
            store,
            stat: OnceCell::new(),
            links: OnceCell::new(),
            data: OnceCell::new(),
        }
    }

    /// A node for a link target, named after the link. Cache state is
    /// fresh: the link's size and type hints are deliberately not trusted
    /// as resolved attributes.
    pub fn from_link(store: Arc<dyn RemoteStore>, link: &Link) -> Self {
        let mut node = Self::new(store, link.target);
        node.name = Some(link.name.clone());
        node
    }

    /// Parse a canonical id string into a node.
    pub fn from_string(store: Arc<dyn RemoteStore>, input: &str) -> Result<Self, FormatError> {
        Ok(Self::new(store, ContentId::parse(input)?))
    }

    /// A node whose attributes are already known, e.g. just built by the
    /// directory add. Nothing here will hit the store.
    pub(crate) fn with_cached(
        store: Arc<dyn RemoteStore>,
        id: ContentId,
        name: Option<String>,
        stat: ObjectStat,
        links: Vec<Link>,
    ) -> Self {
        Self {
            id,
            name,
            store,
            stat: OnceCell::new_with(Some(stat)),
            links: OnceCell::new_with(Some(links)),
            data: OnceCell::new(),
        }
    }

    /// The authoritative content id. Never changes after construction.
    pub fn id(&self) -> ContentId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Rename the node. Metadata only; identity is untouched.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    fn fetch_err(&self, source: StoreError) -> DagError {
        DagError::Fetch {
            id: self.id,
            source,
        }
    }

    /// Stat attributes, fetched once. Concurrent first accesses coalesce
    /// into a single store round-trip; a failed fetch leaves the field
    /// unresolved so the next access retries.
    async fn stat_cached(&self) -> Result<&ObjectStat, DagError> {
        self.stat
            .get_or_try_init(|| async {
                trace!(id = %self.id, "resolving stat");
                self.store.stat(&self.id).await
            })
            .await
            .map_err(|source| self.fetch_err(source))
    }

    /// Object size in bytes. Lazily resolved, then cached.
    pub async fn size(&self) -> Result<u64, DagError> {
        Ok(self.stat_cached().await?.size)
    }

    /// Whether this node is a directory. Lazily resolved, then cached.
    pub async fn is_directory(&self) -> Result<bool, DagError> {
        Ok(self.stat_cached().await?.is_directory)
    }

    /// Outgoing links. Lazily resolved, then cached.
    pub async fn links(&self) -> Result<&[Link], DagError> {
        self.links
            .get_or_try_init(|| async {
                trace!(id = %self.id, "resolving links");
                self.store.list_links(&self.id).await
            })
            .await
            .map(Vec::as_slice)
            .map_err(|source| self.fetch_err(source))
    }

    /// Raw data bytes. Lazily resolved, then cached.
    pub async fn data(&self) -> Result<&Bytes, DagError> {
        self.data
            .get_or_try_init(|| async {
                trace!(id = %self.id, "resolving data");
                self.store.get(&self.id).await
            })
            .await
            .map_err(|source| self.fetch_err(source))
    }

    /// Dereference a link into a new node with fresh cache state.
    ///
    /// A pure function of the link: no identity map, no shared caches
    /// between instances for the same id.
    pub fn child(&self, link: &Link) -> MerkleNode {
        MerkleNode::from_link(Arc::clone(&self.store), link)
    }

    /// Find the outgoing link with the given name.
    pub async fn find_link(&self, name: &str) -> Result<Link, DagError> {
        self.links()
            .await?
            .iter()
            .find(|l| l.name == name)
            .cloned()
            .ok_or_else(|| DagError::LinkNotFound {
                id: self.id,
                name: name.to_string(),
            })
    }

    /// Walk a `/`-separated path of link names from this node.
    pub async fn resolve(&self, path: &str) -> Result<MerkleNode, DagError> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = match segments.next() {
            None => {
                let mut same = MerkleNode::new(Arc::clone(&self.store), self.id);
                same.name = self.name.clone();
                return Ok(same);
            }
            Some(s) => s,
        };
        let mut current = self.child(&self.find_link(first).await?);
        for segment in segments {
            let link = current.find_link(segment).await?;
            current = current.child(&link);
        }
        Ok(current)
    }
}

/// Equality is structural identity: same content id, regardless of which
/// attributes happen to be cached.
impl PartialEq for MerkleNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MerkleNode {}

impl Hash for MerkleNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for MerkleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("stat", &self.stat.get())
            .field("links", &self.links.get().map(Vec::len))
            .field("data", &self.data.get().map(Bytes::len))
            .finish()
    }
}
