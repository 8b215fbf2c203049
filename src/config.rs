//! Client configuration
//!
//! Layered loading: built-in defaults, then an optional TOML/JSON file,
//! then `DAGFS_*` environment variables (e.g. `DAGFS_API_URL`,
//! `DAGFS_TIMEOUT_SECS`).

use crate::add::WalkerConfig;
use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_api_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the daemon's HTTP API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory walking behavior for recursive adds
    #[serde(default)]
    pub walker: WalkerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            walker: WalkerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from an optional file plus the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix("DAGFS").separator("__"))
            .build()?;
        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_empty() {
            return Err(ConfigError::Invalid("api_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
