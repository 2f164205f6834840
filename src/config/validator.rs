//! Configuration validation

use super::loader::{Config, ConfigError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Remote host cannot be empty".to_string(),
            ));
        }

        if config.port == 0 {
            return Err(ConfigError::Invalid(
                "Remote port cannot be 0".to_string(),
            ));
        }

        if config.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }

        // Scans legitimately run far longer than simple reads.
        if config.scan_timeout_secs < config.request_timeout_secs {
            return Err(ConfigError::Invalid(
                "Scan timeout must be at least the request timeout".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_host_rejected() {
        let config = Config {
            host: String::new(),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let config = Config {
            port: 0,
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_scan_timeout_must_cover_request_timeout() {
        let config = Config {
            request_timeout_secs: 30,
            scan_timeout_secs: 5,
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
