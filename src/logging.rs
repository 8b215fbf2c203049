//! Logging System
//!
//! Structured logging via the `tracing` crate: configurable level, text or
//! JSON output, per-module overrides. The `DAGFS_LOG` environment variable
//! takes precedence over configured levels.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Build the level filter from the environment or the config.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    if let Ok(env_directives) = std::env::var("DAGFS_LOG") {
        return EnvFilter::try_new(env_directives)
            .map_err(|e| ConfigError::Invalid(format!("invalid DAGFS_LOG: {}", e)));
    }

    let mut directives = vec![config.level.clone()];
    for (module, level) in &config.modules {
        directives.push(format!("{}={}", module, level));
    }
    EnvFilter::try_new(directives.join(","))
        .map_err(|e| ConfigError::Invalid(format!("invalid log level: {}", e)))
}

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops (relevant for
/// tests, which share one process).
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = build_env_filter(config)?;
    let registry = Registry::default().with(filter);

    let result = match config.format.as_str() {
        "json" => registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_target(true),
            )
            .try_init(),
        _ => registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_target(true),
            )
            .try_init(),
    };

    // A subscriber already being installed is not an error for us.
    let _ = result;
    Ok(())
}
