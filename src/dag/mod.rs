//! Merkle DAG object model
//!
//! The client-side view of the daemon's content-addressed graph: opaque
//! content ids, named links, explicit nodes under construction, and lazy
//! self-fetching nodes that resolve their attributes on first access.

pub mod fs;
pub mod id;
pub mod lazy;
pub mod link;
pub mod node;

pub use fs::FileSystemNode;
pub use id::ContentId;
pub use lazy::MerkleNode;
pub use link::Link;
pub use node::DagNode;
