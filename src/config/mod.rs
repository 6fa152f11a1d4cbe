//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - Environment variables
//! - CLI arguments
//!
//! Every section is optional; omitted fields fall back to the values the
//! demo was built around (broker on `127.0.0.1:1883`, `StA/message` in,
//! `StA/data` out).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod types;

pub use types::{BrokerConfig, DisplayConfig, LoggingConfig};

/// Log levels accepted by the `logging.level` setting
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Broker connection configuration
    pub broker: BrokerConfig,
    /// Window configuration
    pub display: DisplayConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let broker = &self.broker;

        if broker.host.trim().is_empty() {
            anyhow::bail!("Invalid broker address: host is empty");
        }
        if broker.port == 0 {
            anyhow::bail!("Invalid broker address: port 0");
        }

        // rumqttc refuses keep-alive intervals below 5 seconds
        if broker.keep_alive_secs < 5 {
            anyhow::bail!(
                "Invalid keep_alive_secs: {} (minimum 5)",
                broker.keep_alive_secs
            );
        }

        if broker.subscribe_topic.is_empty() {
            anyhow::bail!("Invalid subscribe_topic: empty");
        }
        if broker.publish_topic.is_empty() {
            anyhow::bail!("Invalid publish_topic: empty");
        }
        if broker.publish_topic.contains(['+', '#']) {
            anyhow::bail!(
                "Invalid publish_topic: wildcards not allowed in {:?}",
                broker.publish_topic
            );
        }

        if broker.qos > 2 {
            anyhow::bail!("Invalid qos: {}", broker.qos);
        }

        if let Some(id) = &broker.client_id {
            if id.is_empty() {
                anyhow::bail!("Invalid client_id: empty");
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.broker.host = host;
        }
        if let Some(port) = port {
            self.broker.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.broker.host, "127.0.0.1");
        assert_eq!(config.broker.port, 1883);
        assert_eq!(config.broker.keep_alive_secs, 60);
        assert_eq!(config.broker.subscribe_topic, "StA/message");
        assert_eq!(config.broker.publish_topic, "StA/data");
        assert!(config.display.hide_cursor);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[broker]\nhost = \"10.0.0.5\"\n").unwrap();
        assert_eq!(config.broker.host, "10.0.0.5");
        assert_eq!(config.broker.port, 1883);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation_wildcard_publish_topic() {
        let mut config = Config::default();
        config.broker.publish_topic = "StA/#".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_qos() {
        let mut config = Config::default();
        config.broker.qos = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_short_keep_alive() {
        let mut config = Config::default();
        config.broker.keep_alive_secs = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("broker.local".to_string()), None);
        assert_eq!(config.broker.host, "broker.local");
        assert_eq!(config.broker.port, 1883);

        let config = config.with_overrides(None, Some(8883));
        assert_eq!(config.broker.port, 8883);
    }
}
