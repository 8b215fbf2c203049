//! Daemon diagnostics commands

use crate::client::ApiClient;
use crate::error::StoreError;
use serde::Deserialize;

/// Daemon version report.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonVersion {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Commit", default)]
    pub commit: Option<String>,
}

/// The daemon's own identity.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeIdentity {
    #[serde(rename = "ID")]
    pub peer_id: String,
    #[serde(rename = "Addresses", default)]
    pub addresses: Vec<String>,
    #[serde(rename = "AgentVersion", default)]
    pub agent_version: Option<String>,
}

/// Repository usage statistics.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoStat {
    #[serde(rename = "RepoSize")]
    pub repo_size: u64,
    #[serde(rename = "NumObjects")]
    pub num_objects: u64,
    #[serde(rename = "RepoPath", default)]
    pub repo_path: Option<String>,
}

impl ApiClient {
    pub async fn version(&self) -> Result<DaemonVersion, StoreError> {
        self.request_json("version", &[], None).await
    }

    pub async fn id(&self) -> Result<NodeIdentity, StoreError> {
        self.request_json("id", &[], None).await
    }

    pub async fn repo_stat(&self) -> Result<RepoStat, StoreError> {
        self.request_json("repo/stat", &[], None).await
    }
}
