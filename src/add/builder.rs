//! Recursive-add builder
//!
//! Turns a local directory into a single composite DAG node: leaves are
//! uploaded as blocks, each directory becomes a node whose links are its
//! children, assembled bottom-up. Uploads and sibling sub-builds run
//! concurrently, but the final link order is deterministic: files in
//! enumeration order, then subdirectories in enumeration order.

use crate::add::walker::{Walker, WalkerConfig};
use crate::dag::{ContentId, DagNode, FileSystemNode, Link, MerkleNode};
use crate::error::AddError;
use crate::store::{ObjectStat, RemoteStore};
use futures::future::{try_join_all, BoxFuture, FutureExt};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Builds directory trees in the remote store.
pub struct DirectoryBuilder {
    store: Arc<dyn RemoteStore>,
    recursive: bool,
    walker: Walker,
}

impl DirectoryBuilder {
    /// A non-recursive builder over the given store.
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            recursive: false,
            walker: Walker::new(),
        }
    }

    /// Whether subdirectories are descended into. When off they are
    /// skipped entirely, not listed as empty placeholders.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker = Walker::with_config(config);
        self
    }

    /// Add a local directory, returning the composite node.
    ///
    /// The returned node has its links and type pre-populated (they were
    /// just computed), and reports size zero per the directory convention.
    /// On failure the whole build aborts with the failing path attached;
    /// already-completed uploads are not rolled back.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn add(&self, path: &Path) -> Result<FileSystemNode, AddError> {
        let start = Instant::now();

        let metadata = tokio::fs::metadata(path).await.map_err(|e| AddError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if !metadata.is_dir() {
            return Err(AddError::NotADirectory(path.to_path_buf()));
        }

        let (id, links) = self.build_dir(path).await?;

        info!(
            id = %id,
            link_count = links.len(),
            duration_ms = start.elapsed().as_millis(),
            "Directory add completed"
        );

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        let stat = ObjectStat {
            size: 0,
            num_links: links.len() as u64,
            is_directory: true,
        };
        let node = MerkleNode::with_cached(Arc::clone(&self.store), id, name, stat, links);
        Ok(FileSystemNode::new(node, true))
    }

    /// Build one directory level: upload files, recurse into
    /// subdirectories, persist the assembled node.
    fn build_dir<'a>(
        &'a self,
        dir: &'a Path,
    ) -> BoxFuture<'a, Result<(ContentId, Vec<Link>), AddError>> {
        async move {
            let (files, subdirs) = self.walker.list_level(dir)?;

            // Uploads run concurrently; try_join_all keeps results in
            // submission order, so the link sequence stays deterministic.
            let file_links = try_join_all(files.into_iter().map(|file| async move {
                let content = tokio::fs::read(&file.path).await.map_err(|e| AddError::Io {
                    path: file.path.clone(),
                    source: e,
                })?;
                let id = self
                    .store
                    .put_block(&content)
                    .await
                    .map_err(|e| AddError::Store {
                        path: file.path.clone(),
                        source: e,
                    })?;
                debug!(path = %file.path.display(), id = %id, size = content.len(), "Uploaded file");
                Ok::<Link, AddError>(Link::file(file.name, id, content.len() as u64))
            }))
            .await?;

            let mut links = file_links;

            if self.recursive {
                let dir_links = try_join_all(subdirs.into_iter().map(|sub| async move {
                    let (child_id, _) = self.build_dir(&sub.path).await?;
                    Ok::<Link, AddError>(Link::directory(sub.name, child_id))
                }))
                .await?;
                links.extend(dir_links);
            }

            let node = DagNode::directory().add_links(links.iter().cloned());
            let id = self
                .store
                .put_node(&node)
                .await
                .map_err(|e| AddError::Store {
                    path: dir.to_path_buf(),
                    source: e,
                })?;
            debug!(path = %dir.display(), id = %id, links = links.len(), "Persisted directory node");

            Ok((id, links))
        }
        .boxed()
    }
}
