//! Configuration management for argentbank
//!
//! This module handles loading, validation, and management of
//! argentbank configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BackendConfig {
    /// Base URL of the banking backend (e.g., "http://localhost:3001/api/v1")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3001/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Token lifetime in minutes; an expired token triggers automatic logout
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,
}

fn default_token_ttl() -> i64 {
    60
}

/// Transaction search settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    /// Records per page for search results
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Debounce interval for free-text search input, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_page_size() -> u32 {
    10
}

fn default_debounce_ms() -> u64 {
    300
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend API settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Session settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Search settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::IoError)?;

        // Try to parse the YAML
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate port
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        // Validate backend URL
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        // Validate token lifetime
        if self.session.token_ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.token_ttl_minutes".to_string(),
                reason: "Token lifetime must be greater than 0".to_string(),
            });
        }

        // Validate page size
        if self.search.page_size == 0 || self.search.page_size > 100 {
            return Err(ConfigError::InvalidValue {
                field: "search.page_size".to_string(),
                reason: "Page size must be between 1 and 100".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.search.page_size, 10);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.session.token_ttl_minutes, 60);
        assert!(config.backend.base_url.starts_with("http://"));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut config: Config = serde_yaml::from_str("{}").unwrap();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config: Config = serde_yaml::from_str("{}").unwrap();
        config.backend.base_url = "localhost:3001".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config: Config = serde_yaml::from_str("{}").unwrap();
        config.search.page_size = 0;
        assert!(config.validate().is_err());
        config.search.page_size = 101;
        assert!(config.validate().is_err());
        config.search.page_size = 25;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = "server:\n  port: 9000\nsearch:\n  page_size: 20\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.search.page_size, 20);
        // Untouched sections keep defaults
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = serde_yaml::from_str(Config::generate_default()).unwrap();
        assert!(config.validate().is_ok());
    }
}
