//! Configuration management for the charger client
//!
//! This module handles loading, validation, and management of the client
//! configuration from YAML files with support for environment variable
//! overrides.

use crate::error::{ChargerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

mod defaults;

/// Environment variable overriding [`ClientConfig::host`]
pub const ENV_HOST: &str = "GOE_API_URL";
/// Environment variable overriding [`ClientConfig::token`]
pub const ENV_TOKEN: &str = "GOE_API_TOKEN";
/// Environment variable overriding [`ClientConfig::timeout_ms`]
pub const ENV_TIMEOUT_MS: &str = "GOE_API_TIMEOUT_MS";
/// Environment variable overriding [`ClientConfig::wait`]
pub const ENV_WAIT: &str = "GOE_API_WAIT";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Charger connection parameters
    pub charger: ClientConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Connection parameters of a single charger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the charger, e.g. `http://192.168.1.50`
    pub host: String,

    /// Token sent as `Authorization: Basic <token>`
    pub token: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Verify each write by reading the status back
    pub wait: bool,

    /// Delayed re-checks after a mismatching verification read
    pub verify_retries: u32,

    /// Delay between verification re-checks in milliseconds
    pub verify_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Optional console-specific level
    pub console_level: Option<String>,

    /// Optional file-specific level
    pub file_level: Option<String>,

    /// Directory or file path for rolling log files; console only when unset
    pub file: Option<String>,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl ClientConfig {
    /// Configuration for `host` authenticated with `token`, other values default
    pub fn new<H: Into<String>, T: Into<String>>(host: H, token: T) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            ..Self::default()
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Enable or disable write verification
    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// Set the verification retry policy
    pub fn with_verification(mut self, retries: u32, delay: Duration) -> Self {
        self.verify_retries = retries;
        self.verify_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Delay between verification re-checks
    pub fn verify_delay(&self) -> Duration {
        Duration::from_millis(self.verify_delay_ms)
    }

    /// Host without trailing slashes
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    /// Validate the connection parameters
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ChargerError::validation("host", "host must be specified"));
        }

        if self.token.trim().is_empty() {
            return Err(ChargerError::validation("token", "token must be specified"));
        }

        if self.timeout_ms == 0 {
            return Err(ChargerError::validation(
                "timeout_ms",
                "Must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default locations, then apply the
    /// environment overrides
    pub fn load() -> Result<Self> {
        let default_paths = ["goecharger.yaml", "/etc/goecharger/config.yaml"];

        let mut config = Config::default();
        for path in &default_paths {
            if Path::new(path).exists() {
                config = Self::from_file(path)?;
                break;
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.charger.host = host;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.charger.token = token;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS).and_then(|v| v.trim().parse().ok()) {
            self.charger.timeout_ms = timeout;
        }
        if let Some(wait) = lookup(ENV_WAIT) {
            self.charger.wait = matches!(
                wait.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.charger.validate()?;

        if crate::logging::parse_log_level(&self.logging.level).is_err() {
            return Err(ChargerError::validation(
                "logging.level",
                "Unknown log level",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.charger.timeout_ms, 5000);
        assert_eq!(config.charger.verify_retries, 5);
        assert_eq!(config.charger.verify_delay_ms, 1000);
        assert!(!config.charger.wait);
        assert_eq!(config.logging.level, "INFO");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.charger = ClientConfig::new("http://localhost:3000", "TOKEN");
        assert!(config.validate().is_ok());

        config.charger.host = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("host must be specified"));

        config.charger = ClientConfig::new("http://localhost:3000", "");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("token must be specified"));

        config.charger = ClientConfig::new("http://localhost:3000", "TOKEN");
        config.charger.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let config = ClientConfig::new("http://10.0.0.2/", "t");
        assert_eq!(config.base_url(), "http://10.0.0.2");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides_from(|key| match key {
            ENV_HOST => Some("http://charger.local".to_string()),
            ENV_TOKEN => Some("secret".to_string()),
            ENV_TIMEOUT_MS => Some("750".to_string()),
            ENV_WAIT => Some("true".to_string()),
            _ => None,
        });
        assert_eq!(config.charger.host, "http://charger.local");
        assert_eq!(config.charger.token, "secret");
        assert_eq!(config.charger.timeout_ms, 750);
        assert!(config.charger.wait);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let deserialized: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.charger.timeout_ms, deserialized.charger.timeout_ms);
    }
}
