//! Swarm (peer connection) commands

use crate::client::ApiClient;
use crate::error::StoreError;
use serde::Deserialize;

/// A currently connected peer.
#[derive(Debug, Clone, Deserialize)]
pub struct SwarmPeer {
    #[serde(rename = "Peer")]
    pub peer: String,
    #[serde(rename = "Addr")]
    pub addr: String,
    #[serde(rename = "Latency", default)]
    pub latency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SwarmPeersResponse {
    #[serde(rename = "Peers", default)]
    peers: Vec<SwarmPeer>,
}

#[derive(Debug, Deserialize)]
struct SwarmConnectResponse {
    #[serde(rename = "Strings", default)]
    strings: Vec<String>,
}

impl ApiClient {
    /// Peers the daemon is currently connected to.
    pub async fn swarm_peers(&self) -> Result<Vec<SwarmPeer>, StoreError> {
        let args = [("verbose", "true".to_string())];
        let response: SwarmPeersResponse = self.request_json("swarm/peers", &args, None).await?;
        Ok(response.peers)
    }

    /// Open a connection to a multiaddress.
    pub async fn swarm_connect(&self, address: &str) -> Result<Vec<String>, StoreError> {
        let args = [("arg", address.to_string())];
        let response: SwarmConnectResponse =
            self.request_json("swarm/connect", &args, None).await?;
        Ok(response.strings)
    }
}
