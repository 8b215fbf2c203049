//! Bootstrap peer list commands

use crate::client::ApiClient;
use crate::error::StoreError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BootstrapResponse {
    #[serde(rename = "Peers", default)]
    peers: Vec<String>,
}

impl ApiClient {
    /// The daemon's configured bootstrap addresses.
    pub async fn bootstrap_list(&self) -> Result<Vec<String>, StoreError> {
        let response: BootstrapResponse = self.request_json("bootstrap/list", &[], None).await?;
        Ok(response.peers)
    }

    /// Add a bootstrap address. Returns the addresses that were added.
    pub async fn bootstrap_add(&self, address: &str) -> Result<Vec<String>, StoreError> {
        let args = [("arg", address.to_string())];
        let response: BootstrapResponse = self.request_json("bootstrap/add", &args, None).await?;
        Ok(response.peers)
    }

    /// Remove a bootstrap address. Returns the addresses that were removed.
    pub async fn bootstrap_rm(&self, address: &str) -> Result<Vec<String>, StoreError> {
        let args = [("arg", address.to_string())];
        let response: BootstrapResponse = self.request_json("bootstrap/rm", &args, None).await?;
        Ok(response.peers)
    }
}
