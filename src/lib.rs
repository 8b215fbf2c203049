//! dagfs: Typed Client for Content-Addressable Storage Daemons
//!
//! Talks to an IPFS-compatible daemon over its HTTP command API and exposes
//! a typed Merkle DAG object model: opaque content ids, named links,
//! explicit nodes for building trees, and lazy self-fetching nodes for
//! reading them back. The recursive directory add assembles local file
//! trees into remote directory nodes bottom-up.

pub mod add;
pub mod client;
pub mod config;
pub mod dag;
pub mod error;
pub mod logging;
pub mod store;

pub use crate::add::DirectoryBuilder;
pub use crate::client::ApiClient;
pub use crate::dag::{ContentId, DagNode, FileSystemNode, Link, MerkleNode};
pub use crate::store::{MemoryStore, ObjectStat, RemoteStore};
