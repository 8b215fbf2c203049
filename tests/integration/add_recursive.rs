//! Directory add behavior: link ordering, recursion, failure semantics

use crate::integration::test_utils::{flat_fixture, nested_fixture};
use dagfs::error::AddError;
use dagfs::{DirectoryBuilder, FileSystemNode, MemoryStore};
use std::fs;
use std::sync::Arc;

#[tokio::test]
async fn test_flat_add_non_recursive() {
    let temp = flat_fixture();
    let store = Arc::new(MemoryStore::new());
    let node = DirectoryBuilder::new(store.clone())
        .add(temp.path())
        .await
        .unwrap();

    assert!(node.is_dir());
    let links = node.merkle().links().await.unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].name, "alpha.txt");
    assert_eq!(links[1].name, "beta.txt");
    assert!(links.iter().all(|l| !l.is_directory));
}

#[tokio::test]
async fn test_non_recursive_skips_subdirectories() {
    let temp = nested_fixture();
    let store = Arc::new(MemoryStore::new());
    let node = DirectoryBuilder::new(store.clone())
        .add(temp.path())
        .await
        .unwrap();

    let links = node.merkle().links().await.unwrap();
    let names: Vec<&str> = links.iter().map(|l| l.name.as_str()).collect();
    // No "x" placeholder, not even empty.
    assert_eq!(names, vec!["alpha.txt", "beta.txt"]);
}

#[tokio::test]
async fn test_recursive_add_builds_nested_tree() {
    let temp = nested_fixture();
    let store = Arc::new(MemoryStore::new());
    let root = DirectoryBuilder::new(store.clone())
        .recursive(true)
        .add(temp.path())
        .await
        .unwrap();

    let links = root.merkle().links().await.unwrap();
    let names: Vec<&str> = links.iter().map(|l| l.name.as_str()).collect();
    // Files first in enumeration order, then subdirectories.
    assert_eq!(names, vec!["alpha.txt", "beta.txt", "x"]);
    assert!(links[2].is_directory);

    let x = root.merkle().resolve("x").await.unwrap();
    let x_links = x.links().await.unwrap();
    let x_names: Vec<&str> = x_links.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(x_names, vec!["x.txt", "y"]);

    let y = root.merkle().resolve("x/y").await.unwrap();
    let y_links = y.links().await.unwrap();
    assert_eq!(y_links.len(), 1);
    assert_eq!(y_links[0].name, "y.txt");

    let y_txt = root.merkle().resolve("x/y/y.txt").await.unwrap();
    assert_eq!(&y_txt.data().await.unwrap()[..], b"y");
}

#[tokio::test]
async fn test_directory_node_reports_zero_size() {
    let temp = nested_fixture();
    let store = Arc::new(MemoryStore::new());
    let root = DirectoryBuilder::new(store.clone())
        .recursive(true)
        .add(temp.path())
        .await
        .unwrap();

    assert_eq!(root.merkle().size().await.unwrap(), 0);
    assert!(root.merkle().is_directory().await.unwrap());
}

#[tokio::test]
async fn test_read_back_through_entries() {
    let temp = flat_fixture();
    let store = Arc::new(MemoryStore::new());
    let root = DirectoryBuilder::new(store.clone())
        .add(temp.path())
        .await
        .unwrap();

    let entries: Vec<FileSystemNode> = root.entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(&entries[0].read().await.unwrap()[..], b"alpha");
    assert_eq!(&entries[1].read().await.unwrap()[..], b"beta");
}

#[tokio::test]
async fn test_file_link_sizes_match_content() {
    let temp = flat_fixture();
    let store = Arc::new(MemoryStore::new());
    let root = DirectoryBuilder::new(store.clone())
        .add(temp.path())
        .await
        .unwrap();

    let links = root.merkle().links().await.unwrap();
    assert_eq!(links[0].size, 5); // "alpha"
    assert_eq!(links[1].size, 4); // "beta"
}

#[tokio::test]
async fn test_failed_build_names_the_failing_path() {
    let temp = flat_fixture();
    // An unreadable entry: a dangling symlink surfaces as an I/O error
    // when its bytes are read.
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(
            temp.path().join("missing-target"),
            temp.path().join("broken.txt"),
        )
        .unwrap();
    }
    #[cfg(not(unix))]
    {
        return;
    }

    // Make the symlink look like a file to the walker by following links.
    let config = dagfs::add::WalkerConfig {
        follow_symlinks: true,
        ..Default::default()
    };
    let store = Arc::new(MemoryStore::new());
    let result = DirectoryBuilder::new(store)
        .with_walker_config(config)
        .add(temp.path())
        .await;

    match result {
        // Either the walker or the read surfaces it, both with a path.
        Err(AddError::Io { path, .. }) => {
            assert!(path.starts_with(temp.path()));
        }
        Ok(_) => panic!("build should have failed"),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_identical_trees_share_object_storage() {
    let t1 = nested_fixture();
    let t2 = nested_fixture();
    let store = Arc::new(MemoryStore::new());
    let builder = DirectoryBuilder::new(store.clone()).recursive(true);

    let n1 = builder.add(t1.path()).await.unwrap();
    let objects_after_first = store.len();
    let n2 = builder.add(t2.path()).await.unwrap();

    // Content-addressing dedupes the second identical tree entirely.
    assert_eq!(n1.id(), n2.id());
    assert_eq!(store.len(), objects_after_first);
}

#[tokio::test]
async fn test_empty_directory_add() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = Arc::new(MemoryStore::new());
    let node = DirectoryBuilder::new(store.clone())
        .recursive(true)
        .add(temp.path())
        .await
        .unwrap();

    assert!(node.is_dir());
    assert!(node.merkle().links().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_default_add_keeps_build_artifact_names() {
    // Nothing is filtered unless asked for: entries that happen to carry
    // tooling names are ordinary content here.
    let temp = flat_fixture();
    fs::write(temp.path().join("target"), "just a file").unwrap();
    fs::create_dir(temp.path().join("node_modules")).unwrap();

    let store = Arc::new(MemoryStore::new());
    let node = DirectoryBuilder::new(store.clone())
        .recursive(true)
        .add(temp.path())
        .await
        .unwrap();

    let links = node.merkle().links().await.unwrap();
    let names: Vec<&str> = links.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["alpha.txt", "beta.txt", "target", "node_modules"]);
    assert!(!links[2].is_directory);
    assert!(links[3].is_directory);
}

#[tokio::test]
async fn test_configured_ignores_are_excluded() {
    let temp = flat_fixture();
    fs::create_dir(temp.path().join(".git")).unwrap();
    fs::write(temp.path().join(".git").join("HEAD"), "ref").unwrap();

    let config = dagfs::add::WalkerConfig {
        ignore_patterns: vec![".git".to_string()],
        ..Default::default()
    };
    let store = Arc::new(MemoryStore::new());
    let node = DirectoryBuilder::new(store.clone())
        .recursive(true)
        .with_walker_config(config)
        .add(temp.path())
        .await
        .unwrap();

    let links = node.merkle().links().await.unwrap();
    assert!(links.iter().all(|l| l.name != ".git"));
}
