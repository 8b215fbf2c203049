//! RemoteStore over the HTTP command API
//!
//! Maps the store contract onto daemon commands: `add` for raw blocks,
//! `object/put` for explicit nodes, `cat` for content, `files/stat` for
//! metadata and `ls` for links. Wire structs mirror the daemon's
//! PascalCase JSON field names.

use crate::client::{parse_daemon_id, ApiClient};
use crate::dag::{ContentId, DagNode, Link};
use crate::error::StoreError;
use crate::store::{ObjectStat, RemoteStore};
use async_trait::async_trait;
use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// `ls` link type for directories (UnixFS type codes).
const LINK_TYPE_DIRECTORY: u32 = 1;

#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

#[derive(Debug, Serialize)]
struct ObjectPutBody {
    #[serde(rename = "Data")]
    data: String,
    #[serde(rename = "Links")]
    links: Vec<WireLink>,
}

#[derive(Debug, Serialize)]
struct WireLink {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Hash")]
    hash: String,
    #[serde(rename = "Size")]
    size: u64,
}

#[derive(Debug, Deserialize)]
struct ObjectPutResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

#[derive(Debug, Deserialize)]
struct FilesStatResponse {
    #[serde(rename = "Size")]
    size: u64,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Blocks")]
    blocks: u64,
}

#[derive(Debug, Deserialize)]
struct LsResponse {
    #[serde(rename = "Objects")]
    objects: Vec<LsObject>,
}

#[derive(Debug, Deserialize)]
struct LsObject {
    #[serde(rename = "Links", default)]
    links: Vec<LsLink>,
}

#[derive(Debug, Deserialize)]
struct LsLink {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Hash")]
    hash: String,
    #[serde(rename = "Size")]
    size: u64,
    #[serde(rename = "Type")]
    kind: u32,
}

impl LsLink {
    fn into_link(self) -> Result<Link, StoreError> {
        Ok(Link::new(
            self.name,
            parse_daemon_id(&self.hash)?,
            self.size,
            self.kind == LINK_TYPE_DIRECTORY,
        ))
    }
}

#[async_trait]
impl RemoteStore for ApiClient {
    async fn put_block(&self, data: &[u8]) -> Result<ContentId, StoreError> {
        let response: AddResponse = self
            .request_multipart("add", &[("pin", "false".to_string())], data.to_vec())
            .await?;
        parse_daemon_id(&response.hash)
    }

    async fn put_node(&self, node: &DagNode) -> Result<ContentId, StoreError> {
        let body = ObjectPutBody {
            data: base64::engine::general_purpose::STANDARD.encode(node.data()),
            links: node
                .links()
                .iter()
                .map(|link| WireLink {
                    name: link.name.clone(),
                    hash: link.target.to_string(),
                    size: link.size,
                })
                .collect(),
        };
        let content = serde_json::to_vec(&body)
            .map_err(|e| StoreError::Transport(format!("failed to encode node: {}", e)))?;
        let args = [
            ("inputenc", "json".to_string()),
            ("datafieldenc", "base64".to_string()),
        ];
        let response: ObjectPutResponse =
            self.request_multipart("object/put", &args, content).await?;
        parse_daemon_id(&response.hash)
    }

    async fn get(&self, id: &ContentId) -> Result<Bytes, StoreError> {
        let request = self.command("cat", &[("arg", id.to_string())]);
        let response = self.execute(request, Some(id)).await?;
        Ok(response.bytes().await?)
    }

    async fn stat(&self, id: &ContentId) -> Result<ObjectStat, StoreError> {
        let args = [("arg", format!("/ipfs/{}", id))];
        let response: FilesStatResponse = self.request_json("files/stat", &args, Some(id)).await?;
        let is_directory = response.kind == "directory";
        Ok(ObjectStat {
            // Directories report size zero; cumulative subtree size is a
            // separate daemon concern.
            size: if is_directory { 0 } else { response.size },
            num_links: response.blocks,
            is_directory,
        })
    }

    async fn list_links(&self, id: &ContentId) -> Result<Vec<Link>, StoreError> {
        let args = [("arg", id.to_string())];
        let response: LsResponse = self.request_json("ls", &args, Some(id)).await?;
        response
            .objects
            .into_iter()
            .next()
            .map(|object| object.links.into_iter().map(LsLink::into_link).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
