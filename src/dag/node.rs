//! Explicit in-memory DAG nodes
//!
//! A `DagNode` is a node under construction: raw data bytes plus an ordered
//! list of links. It does not know its own content id until a store assigns
//! one on put; identity is a function of (data, links) computed by the
//! store's hashing, never by the client.

use crate::dag::{ContentId, Link};
use crate::error::DagError;

/// An explicit node: data bytes plus ordered links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagNode {
    name: Option<String>,
    data: Vec<u8>,
    links: Vec<Link>,
    is_directory: bool,
    id: Option<ContentId>,
    size: Option<u64>,
}

impl DagNode {
    /// A leaf node carrying raw data.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: None,
            data: data.into(),
            links: Vec::new(),
            is_directory: false,
            id: None,
            size: None,
        }
    }

    /// The canonical empty directory template: zero links, no data,
    /// marked as a directory.
    pub fn directory() -> Self {
        Self {
            name: None,
            data: Vec::new(),
            links: Vec::new(),
            is_directory: true,
            id: None,
            size: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record an explicit size, e.g. from a remote stat response.
    ///
    /// Once set, the explicit value wins over the data-length fallback and
    /// is never recomputed.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Append links in order.
    ///
    /// Existing links come first, duplicates by name are preserved (name
    /// collision semantics belong to the daemon). Appending links changes
    /// the node's content, so any previously recorded id is cleared.
    pub fn add_links(mut self, links: impl IntoIterator<Item = Link>) -> Self {
        self.links.extend(links);
        self.id = None;
        self
    }

    /// Record the id assigned by a store put.
    pub fn persisted(mut self, id: ContentId) -> Self {
        self.id = Some(id);
        self
    }

    /// Build a link pointing at this node.
    ///
    /// Requires the node to have been persisted; fails with
    /// [`DagError::NotPersisted`] otherwise. The link name is `name` if
    /// given, else the node's own name, else empty (anonymous link).
    pub fn to_link(&self, name: Option<&str>) -> Result<Link, DagError> {
        let target = self.id.ok_or(DagError::NotPersisted)?;
        let name = name
            .map(str::to_string)
            .or_else(|| self.name.clone())
            .unwrap_or_default();
        Ok(Link::new(name, target, self.size(), self.is_directory))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// The store-assigned id, if this node has been persisted.
    pub fn id(&self) -> Option<ContentId> {
        self.id
    }

    /// Node size: the explicit size if one was set, else the byte length
    /// of the data field.
    pub fn size(&self) -> u64 {
        self.size.unwrap_or(self.data.len() as u64)
    }
}
