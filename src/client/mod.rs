//! HTTP command API client
//!
//! Wraps the daemon's `/api/v0` command interface behind typed methods.
//! All wire-format knowledge lives here: URL building, multipart uploads,
//! and decoding of the daemon's `{Message, Code}` error bodies. Response
//! JSON is decoded once into typed structs at this boundary; nothing above
//! it navigates raw JSON.

pub mod bootstrap;
pub mod diagnostics;
pub mod pin;
pub mod store;
pub mod swarm;

use crate::config::ClientConfig;
use crate::dag::ContentId;
use crate::error::{ConfigError, StoreError};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Structured error body the daemon returns on command failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "Message")]
    message: String,
    #[serde(rename = "Code", default)]
    code: u64,
}

/// Classify a failed response body into a [`StoreError`].
///
/// "not found"-style daemon messages become [`StoreError::NotFound`] when
/// the failing command was about a specific object.
fn decode_error(status: StatusCode, body: &[u8], id: Option<&ContentId>) -> StoreError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(err) => {
            if let Some(id) = id {
                let message = err.message.to_ascii_lowercase();
                if message.contains("not found") || message.contains("no such") {
                    return StoreError::NotFound(*id);
                }
            }
            StoreError::Api {
                code: err.code,
                message: err.message,
            }
        }
        Err(_) => StoreError::Transport(format!(
            "HTTP {}: {}",
            status,
            String::from_utf8_lossy(body)
        )),
    }
}

/// Client for one daemon's HTTP command API.
///
/// Caller-owned: construct it once and pass it (usually as
/// `Arc<ApiClient>`) into whatever needs the daemon. There is no shared
/// global instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client for an explicit API address with default timeouts.
    pub fn from_url(api_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = ClientConfig {
            api_url: api_url.into(),
            ..ClientConfig::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, command: &str) -> String {
        format!("{}/api/v0/{}", self.base_url, command)
    }

    /// Start a POST request for a command. All daemon commands are POSTs
    /// with query-string arguments.
    pub(crate) fn command(&self, command: &str, args: &[(&str, String)]) -> RequestBuilder {
        debug!(command, "issuing daemon command");
        self.http.post(self.endpoint(command)).query(args)
    }

    /// Send a request and map failure statuses through the daemon's error
    /// body. `id` names the object the command was about, for not-found
    /// classification.
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        id: Option<&ContentId>,
    ) -> Result<Response, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(decode_error(status, &body, id))
    }

    /// Execute a command and decode its JSON response.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        command: &str,
        args: &[(&str, String)],
        id: Option<&ContentId>,
    ) -> Result<T, StoreError> {
        let response = self.execute(self.command(command, args), id).await?;
        Ok(response.json::<T>().await?)
    }

    /// Execute a command carrying a single multipart file part.
    pub(crate) async fn request_multipart<T: DeserializeOwned>(
        &self,
        command: &str,
        args: &[(&str, String)],
        content: Vec<u8>,
    ) -> Result<T, StoreError> {
        let part = reqwest::multipart::Part::bytes(content).file_name("file");
        let form = reqwest::multipart::Form::new().part("file", part);
        let request = self.command(command, args).multipart(form);
        let response = self.execute(request, None).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Parse an id string returned by the daemon.
pub(crate) fn parse_daemon_id(hash: &str) -> Result<ContentId, StoreError> {
    ContentId::parse(hash)
        .map_err(|e| StoreError::Transport(format!("daemon returned invalid id: {}", e)))
}
