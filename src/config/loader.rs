//! Configuration loading from the environment
//!
//! Host and port are the only externally configurable state, supplied via
//! `CE_MCP_HOST` / `CE_MCP_PORT` and treated as static for the process
//! lifetime.

use super::defaults::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SCAN_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the remote host
pub const ENV_HOST: &str = "CE_MCP_HOST";

/// Environment variable naming the remote port
pub const ENV_PORT: &str = "CE_MCP_PORT";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port value '{0}'")]
    InvalidPort(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote service host
    pub host: String,
    /// Remote service port
    pub port: u16,
    /// Timeout budget for simple one-shot operations, in seconds
    pub request_timeout_secs: u64,
    /// Timeout budget for first/next scans, in seconds
    pub scan_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            scan_timeout_secs: DEFAULT_SCAN_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Base URL of the remote service
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Timeout budget for simple operations
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Timeout budget for scan operations
    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs)
    }
}

/// Loads configuration from the process environment, falling back to
/// defaults for anything unset.
pub fn load_from_env() -> Result<Config, ConfigError> {
    load_with(|name| std::env::var(name).ok())
}

/// Loads configuration through an injectable variable lookup. Tests use
/// this to avoid mutating process-wide environment state.
pub fn load_with<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::default();

    if let Some(host) = lookup(ENV_HOST) {
        if !host.trim().is_empty() {
            config.host = host.trim().to_string();
        }
    }

    if let Some(port) = lookup(ENV_PORT) {
        let trimmed = port.trim();
        if !trimmed.is_empty() {
            config.port = trimmed
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
    }

    Ok(config)
}
