//! Error types for the dagfs client.

use crate::dag::ContentId;
use std::path::PathBuf;
use thiserror::Error;

/// A content id string that could not be parsed.
#[derive(Debug, Error)]
#[error("invalid content id {input:?}")]
pub struct FormatError {
    /// The offending input string.
    pub input: String,
    #[source]
    pub source: cid::Error,
}

/// Errors surfaced by a [`RemoteStore`](crate::store::RemoteStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(ContentId),

    /// Network or daemon-level failure. Retryable by the caller.
    #[error("transport error: {0}")]
    Transport(String),

    /// The daemon answered with a structured error body.
    #[error("daemon error (code {code}): {message}")]
    Api { code: u64, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

/// Errors raised by the DAG node model.
#[derive(Debug, Error)]
pub enum DagError {
    /// An operation required the node to have a store-assigned id.
    #[error("node has not been persisted yet")]
    NotPersisted,

    #[error(transparent)]
    Format(#[from] FormatError),

    /// A lazy field resolution failed. The field stays unresolved and a
    /// later access retries.
    #[error("failed to fetch {id}: {source}")]
    Fetch {
        id: ContentId,
        #[source]
        source: StoreError,
    },

    #[error("no link named {name:?} under {id}")]
    LinkNotFound { id: ContentId, name: String },
}

/// Errors raised while adding a local directory tree.
///
/// Every variant names the path that failed so a multi-file build can be
/// diagnosed. Uploads that completed before the failure are not rolled back.
#[derive(Debug, Error)]
pub enum AddError {
    #[error("not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to store {path:?}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: StoreError,
    },
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration value: {0}")]
    Invalid(String),
}
