//! Configuration module for CE-Bridge
//!
//! The only externally configurable state is the remote host and port,
//! read from the environment once at startup; everything else carries
//! fixed defaults.

mod defaults;
mod loader;
mod validator;

pub use defaults::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SCAN_TIMEOUT_SECS,
};
pub use loader::{load_from_env, load_with, Config, ConfigError, ENV_HOST, ENV_PORT};
pub use validator::{validate_config, ConfigValidator};

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
