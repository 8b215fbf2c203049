//! Pin management commands

use crate::client::{parse_daemon_id, ApiClient};
use crate::dag::ContentId;
use crate::error::StoreError;
use serde::Deserialize;
use std::collections::HashMap;

/// How an object is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Direct,
    Recursive,
    Indirect,
}

impl PinMode {
    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "direct" => Some(PinMode::Direct),
            "recursive" => Some(PinMode::Recursive),
            "indirect" => Some(PinMode::Indirect),
            _ => None,
        }
    }
}

/// One entry from `pin/ls`.
#[derive(Debug, Clone)]
pub struct PinEntry {
    pub id: ContentId,
    pub mode: PinMode,
}

#[derive(Debug, Deserialize)]
struct PinChangeResponse {
    #[serde(rename = "Pins", default)]
    pins: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PinLsResponse {
    #[serde(rename = "Keys", default)]
    keys: HashMap<String, PinInfo>,
}

#[derive(Debug, Deserialize)]
struct PinInfo {
    #[serde(rename = "Type")]
    kind: String,
}

impl ApiClient {
    /// Pin an object, optionally with its whole subtree.
    pub async fn pin_add(
        &self,
        id: &ContentId,
        recursive: bool,
    ) -> Result<Vec<ContentId>, StoreError> {
        let args = [
            ("arg", id.to_string()),
            ("recursive", recursive.to_string()),
        ];
        let response: PinChangeResponse = self.request_json("pin/add", &args, Some(id)).await?;
        response.pins.iter().map(|p| parse_daemon_id(p)).collect()
    }

    /// Unpin an object.
    pub async fn pin_rm(&self, id: &ContentId) -> Result<Vec<ContentId>, StoreError> {
        let args = [("arg", id.to_string())];
        let response: PinChangeResponse = self.request_json("pin/rm", &args, Some(id)).await?;
        response.pins.iter().map(|p| parse_daemon_id(p)).collect()
    }

    /// List pinned objects. Entries with unknown pin types are skipped.
    pub async fn pin_ls(&self) -> Result<Vec<PinEntry>, StoreError> {
        let response: PinLsResponse = self.request_json("pin/ls", &[], None).await?;
        let mut entries = Vec::new();
        for (hash, info) in response.keys {
            let Some(mode) = PinMode::parse(&info.kind) else {
                continue;
            };
            entries.push(PinEntry {
                id: parse_daemon_id(&hash)?,
                mode,
            });
        }
        Ok(entries)
    }
}
