//! Broker Error Types

use thiserror::Error;

/// Result type for broker operations
pub type Result<T> = std::result::Result<T, BrokerError>;

/// Broker link error types
#[derive(Error, Debug)]
pub enum BrokerError {
    /// Inbound payload is not valid UTF-8
    #[error("Invalid UTF-8 payload on {topic}: {source}")]
    InvalidUtf8 {
        /// Topic the payload arrived on
        topic: String,
        /// Decoder error
        #[source]
        source: std::str::Utf8Error,
    },

    /// QoS outside 0..=2
    #[error("Invalid QoS level: {0}")]
    InvalidQos(u8),

    /// Request could not be queued for the event loop
    #[error("MQTT client request failed: {0}")]
    Client(#[from] rumqttc::ClientError),

    /// Transport or protocol failure reported by the event loop
    #[error("MQTT connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrokerError::InvalidQos(7);
        assert_eq!(err.to_string(), "Invalid QoS level: 7");
    }

    #[test]
    fn test_utf8_error_names_topic() {
        let bytes = [0xff_u8, 0xfe];
        let source = std::str::from_utf8(&bytes).unwrap_err();
        let err = BrokerError::InvalidUtf8 {
            topic: "StA/message".to_string(),
            source,
        };
        assert!(err.to_string().contains("StA/message"));
    }
}
