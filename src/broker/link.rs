//! Broker link: the client handle shared with the GUI.

use std::fmt;
use std::time::Duration;

use rumqttc::{AsyncClient, ConnectReturnCode, EventLoop, MqttOptions, QoS};
use tracing::{debug, info, warn};

use super::error::{BrokerError, Result};
use super::Publisher;
use crate::config::BrokerConfig;

/// Capacity of the client → event loop request channel
const REQUEST_CAPACITY: usize = 64;

/// Handle onto the single broker connection
///
/// Cheap to clone; every clone feeds the same event loop. The event loop
/// itself is driven by the background task in [`super::task`].
#[derive(Clone)]
pub struct BrokerLink {
    client: AsyncClient,
    subscribe_topic: String,
    publish_topic: String,
    qos: QoS,
    retain: bool,
}

impl BrokerLink {
    /// Build the client and its (not yet polled) event loop.
    ///
    /// No network traffic happens until the event loop is polled.
    pub fn open(config: &BrokerConfig) -> Result<(Self, EventLoop)> {
        let qos = qos_from_level(config.qos)?;
        let client_id = config
            .client_id
            .clone()
            .unwrap_or_else(generate_client_id);

        let mut options = MqttOptions::new(client_id.clone(), config.host.clone(), config.port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
        options.set_clean_session(true);

        debug!(
            "MQTT client {} -> {}:{} (keep-alive {}s)",
            client_id, config.host, config.port, config.keep_alive_secs
        );

        let (client, eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);

        Ok((
            Self {
                client,
                subscribe_topic: config.subscribe_topic.clone(),
                publish_topic: config.publish_topic.clone(),
                qos,
                retain: config.retain,
            },
            eventloop,
        ))
    }

    /// Topic inbound status messages arrive on
    pub fn subscribe_topic(&self) -> &str {
        &self.subscribe_topic
    }

    /// Topic every publish goes to, regardless of the topic the caller names
    pub fn publish_topic(&self) -> &str {
        &self.publish_topic
    }

    /// Connection handshake finished, successfully or not.
    ///
    /// The subscribe request is queued whatever the result code says.
    pub fn on_connect(&self, code: ConnectReturnCode) {
        info!("Connected with result code {}", result_code(code));

        if let Err(e) = self.client.try_subscribe(self.subscribe_topic.clone(), self.qos) {
            warn!("Failed to subscribe to {}: {}", self.subscribe_topic, e);
        }
    }

    /// Decode an inbound payload for display.
    pub fn on_message(&self, topic: &str, payload: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(payload).map_err(|source| BrokerError::InvalidUtf8 {
            topic: topic.to_string(),
            source,
        })?;

        info!("Received from {}: {}", self.subscribe_topic, text);
        Ok(text.to_string())
    }
}

impl Publisher for BrokerLink {
    fn publish(&self, topic: &str, message: &str) {
        match self.client.try_publish(
            self.publish_topic.clone(),
            self.qos,
            self.retain,
            message.as_bytes().to_vec(),
        ) {
            Ok(()) => info!("Published to {}: {}", topic, message),
            Err(e) => warn!("Failed to publish to {}: {}", self.publish_topic, e),
        }
    }
}

impl fmt::Debug for BrokerLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerLink")
            .field("subscribe_topic", &self.subscribe_topic)
            .field("publish_topic", &self.publish_topic)
            .field("qos", &self.qos)
            .field("retain", &self.retain)
            .finish_non_exhaustive()
    }
}

fn qos_from_level(level: u8) -> Result<QoS> {
    match level {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        other => Err(BrokerError::InvalidQos(other)),
    }
}

fn generate_client_id() -> String {
    format!("mqtt-pointer-{}", uuid::Uuid::new_v4().simple())
}

/// Numeric MQTT 3.1.1 CONNACK return code
pub(crate) fn result_code(code: ConnectReturnCode) -> u8 {
    code as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::loopback;

    #[test]
    fn test_open_uses_configured_topics() {
        let (link, _eventloop) = BrokerLink::open(&BrokerConfig::default()).unwrap();
        assert_eq!(link.subscribe_topic(), "StA/message");
        assert_eq!(link.publish_topic(), "StA/data");
        assert_eq!(link.qos, QoS::AtMostOnce);
        assert!(!link.retain);
    }

    #[test]
    fn test_open_rejects_invalid_qos() {
        let config = BrokerConfig {
            qos: 5,
            ..BrokerConfig::default()
        };
        assert!(matches!(
            BrokerLink::open(&config),
            Err(BrokerError::InvalidQos(5))
        ));
    }

    #[test]
    fn test_generated_client_ids_are_unique() {
        let a = generate_client_id();
        let b = generate_client_id();
        assert!(a.starts_with("mqtt-pointer-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_result_codes() {
        assert_eq!(result_code(ConnectReturnCode::Success), 0);
        assert_eq!(result_code(ConnectReturnCode::NotAuthorized), 5);
    }

    #[test]
    fn test_on_message_decodes_utf8() {
        let (link, _eventloop) = BrokerLink::open(&BrokerConfig::default()).unwrap();
        assert_eq!(link.on_message("StA/message", b"hello").unwrap(), "hello");
    }

    #[test]
    fn test_on_message_rejects_invalid_utf8() {
        let (link, _eventloop) = BrokerLink::open(&BrokerConfig::default()).unwrap();
        let err = link.on_message("StA/message", &[0xc3, 0x28]).unwrap_err();
        assert!(matches!(err, BrokerError::InvalidUtf8 { .. }));
    }

    /// Poll the event loop in the background, ignoring its events.
    fn drive(mut eventloop: EventLoop) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { while eventloop.poll().await.is_ok() {} })
    }

    #[tokio::test]
    async fn test_publish_goes_to_fixed_topic() {
        let (listener, config) = loopback::bind().await;
        let (link, eventloop) = BrokerLink::open(&config).unwrap();
        let driver = drive(eventloop);
        let mut stream = loopback::accept(&listener, loopback::ACCEPTED).await;

        link.publish("ignored/topic", "1.0,2.0");

        let sent = loopback::read_until(&mut stream, &["StA/data", "1.0,2.0"]).await;
        assert!(!sent.contains("ignored/topic"));
        driver.abort();
    }

    #[tokio::test]
    async fn test_on_connect_with_refusal_still_subscribes() {
        let (listener, config) = loopback::bind().await;
        let (link, eventloop) = BrokerLink::open(&config).unwrap();

        // Queued before any connection exists; only this call can produce the SUBSCRIBE
        link.on_connect(ConnectReturnCode::NotAuthorized);

        let driver = drive(eventloop);
        let mut stream = loopback::accept(&listener, loopback::ACCEPTED).await;

        loopback::read_until(&mut stream, &["StA/message"]).await;
        driver.abort();
    }
}
