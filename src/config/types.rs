//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Broker connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Broker host name or IP address
    pub host: String,

    /// Broker TCP port
    pub port: u16,

    /// MQTT keep-alive interval in seconds
    pub keep_alive_secs: u64,

    /// Client identifier (generated when absent)
    pub client_id: Option<String>,

    /// Topic whose payloads are shown in the status label
    pub subscribe_topic: String,

    /// Topic pointer coordinates are published to
    pub publish_topic: String,

    /// QoS level for subscribe and publish (0, 1 or 2)
    pub qos: u8,

    /// Set the retain flag on published coordinates
    pub retain: bool,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1883,
            keep_alive_secs: 60,
            client_id: None,
            subscribe_topic: "StA/message".to_string(),
            publish_topic: "StA/data".to_string(),
            qos: 0,
            retain: false,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window title
    pub title: String,

    /// Hide the system cursor while it is over the canvas
    pub hide_cursor: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Studienarbeit MAUC, MQTT Steuerung".to_string(),
            hide_cursor: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    pub level: String,

    /// Log file written alongside stdout (the `--log-file` flag takes precedence)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
