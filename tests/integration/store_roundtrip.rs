//! Store contract: round trips, identity, link building

use dagfs::error::DagError;
use dagfs::{ContentId, DagNode, Link, MemoryStore, MerkleNode, RemoteStore};
use std::sync::Arc;

#[tokio::test]
async fn test_get_put_round_trip() {
    let store = MemoryStore::new();
    for payload in [&b""[..], &b"a"[..], &b"hello world"[..], &[0u8; 4096][..]] {
        let id = store.put_block(payload).await.unwrap();
        assert_eq!(&store.get(&id).await.unwrap()[..], payload);
    }
}

#[tokio::test]
async fn test_put_is_pure_function_of_content() {
    let store = MemoryStore::new();
    let a = store.put_block(b"same bytes").await.unwrap();
    let b = store.put_block(b"same bytes").await.unwrap();
    assert_eq!(a, b);

    let node = DagNode::directory().add_links([Link::file("f", a, 10)]);
    let n1 = store.put_node(&node).await.unwrap();
    let n2 = store.put_node(&node).await.unwrap();
    assert_eq!(n1, n2);
}

#[tokio::test]
async fn test_content_id_string_round_trip() {
    let store = MemoryStore::new();
    let id = store.put_block(b"round trip me").await.unwrap();
    let parsed = ContentId::parse(&id.to_string()).unwrap();
    assert_eq!(parsed, id);
}

#[tokio::test]
async fn test_to_link_lifecycle() {
    let store = MemoryStore::new();
    let node = DagNode::new(b"file body".to_vec()).with_name("body.txt");

    // Before persistence: invalid state.
    assert!(matches!(node.to_link(None), Err(DagError::NotPersisted)));

    let id = store.put_node(&node).await.unwrap();
    let node = node.persisted(id);
    let link = node.to_link(None).unwrap();
    assert_eq!(link.name, "body.txt");
    assert_eq!(link.target, id);
    assert_eq!(link.size, 9);
    assert!(!link.is_directory);
}

#[tokio::test]
async fn test_merkle_node_equality_ignores_cache_state() {
    let store = Arc::new(MemoryStore::new());
    let id = store.put_block(b"content").await.unwrap();

    let warm = MerkleNode::new(store.clone(), id);
    warm.data().await.unwrap();
    warm.size().await.unwrap();
    let cold = MerkleNode::new(store.clone(), id);

    assert_eq!(warm, cold);

    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hw = DefaultHasher::new();
    let mut hc = DefaultHasher::new();
    warm.hash(&mut hw);
    cold.hash(&mut hc);
    assert_eq!(hw.finish(), hc.finish());
}

#[tokio::test]
async fn test_stat_matches_stored_object() {
    let store = MemoryStore::new();
    let id = store.put_block(b"12345678").await.unwrap();
    let stat = store.stat(&id).await.unwrap();
    assert_eq!(stat.size, 8);
    assert_eq!(stat.num_links, 0);
    assert!(!stat.is_directory);
}

#[tokio::test]
async fn test_named_node_parse_entry_point() {
    let store: Arc<dyn RemoteStore> = Arc::new(MemoryStore::new());
    assert!(MerkleNode::from_string(store.clone(), "not-a-cid").is_err());
}
