//! Lazy field resolution: call counts, caching, concurrency

use dagfs::{ContentId, DagNode, Link, MemoryStore, MerkleNode, RemoteStore};
use std::sync::Arc;

async fn seeded_store() -> (Arc<MemoryStore>, ContentId) {
    let store = Arc::new(MemoryStore::new());
    let leaf = store.put_block(b"leaf content").await.unwrap();
    let dir = DagNode::directory().add_links([Link::file("leaf.txt", leaf, 12)]);
    let id = store.put_node(&dir).await.unwrap();
    (store, id)
}

#[tokio::test]
async fn test_first_access_fetches_second_access_hits_cache() {
    let (store, id) = seeded_store().await;
    let node = MerkleNode::new(store.clone(), id);

    assert_eq!(store.list_calls(), 0);
    node.links().await.unwrap();
    assert_eq!(store.list_calls(), 1);
    node.links().await.unwrap();
    node.links().await.unwrap();
    assert_eq!(store.list_calls(), 1);
}

#[tokio::test]
async fn test_each_field_resolves_independently() {
    let (store, id) = seeded_store().await;
    let node = MerkleNode::new(store.clone(), id);

    node.size().await.unwrap();
    assert_eq!(store.stat_calls(), 1);
    assert_eq!(store.list_calls(), 0);
    assert_eq!(store.get_calls(), 0);

    node.links().await.unwrap();
    assert_eq!(store.list_calls(), 1);
    assert_eq!(store.get_calls(), 0);

    node.data().await.unwrap();
    assert_eq!(store.get_calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_first_access_coalesces_to_one_fetch() {
    let (store, id) = seeded_store().await;
    let node = Arc::new(MerkleNode::new(store.clone(), id));

    let mut tasks = Vec::new();
    for _ in 0..32 {
        let node = Arc::clone(&node);
        tasks.push(tokio::spawn(async move {
            node.links().await.unwrap().to_vec()
        }));
    }

    let mut results = Vec::new();
    for task in tasks {
        results.push(task.await.unwrap());
    }

    // Cache is intact: every task saw the same single resolved value.
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(results[0].len(), 1);
    assert_eq!(results[0][0].name, "leaf.txt");
    // And the store was hit exactly once.
    assert_eq!(store.list_calls(), 1);
}

#[tokio::test]
async fn test_fetch_failure_allows_retry() {
    let store = Arc::new(MemoryStore::new());
    // An id nothing was stored under yet.
    let probe = Arc::new(MemoryStore::new());
    let id = probe.put_block(b"future content").await.unwrap();

    let node = MerkleNode::new(store.clone(), id);
    assert!(node.data().await.is_err());
    let failures = store.get_calls();

    // Object shows up; the unresolved field retries against the store.
    store.put_block(b"future content").await.unwrap();
    assert_eq!(&node.data().await.unwrap()[..], b"future content");
    assert_eq!(store.get_calls(), failures + 1);
}

#[tokio::test]
async fn test_instances_do_not_share_caches() {
    let (store, id) = seeded_store().await;
    let a = MerkleNode::new(store.clone(), id);
    let b = MerkleNode::new(store.clone(), id);

    a.links().await.unwrap();
    assert_eq!(store.list_calls(), 1);
    // Second instance has fresh cache state and fetches again.
    b.links().await.unwrap();
    assert_eq!(store.list_calls(), 2);
    // Still equal: identity is the id, not the cache.
    assert_eq!(a, b);
}
