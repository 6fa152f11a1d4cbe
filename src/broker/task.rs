//! Background network task
//!
//! Drives the MQTT event loop and hands everything the GUI needs over a
//! channel, so widget state is only ever touched on the GUI thread.
//!
//! ```text
//! EventLoop::poll()
//!   ├─> CONNACK          -> BrokerLink::on_connect -> BrokerEvent::Connected
//!   ├─> PUBLISH          -> BrokerLink::on_message -> BrokerEvent::Message
//!   ├─> refused CONNACK  -> BrokerLink::on_connect (subscribe anyway)
//!   └─> transport error  -> fatal before first CONNACK, reconnect after
//! ```

use std::time::Duration;

use futures::channel::mpsc;
use futures::{SinkExt, Stream};
use rumqttc::{ConnectionError, Event, EventLoop, Packet};
use tracing::{debug, error, trace, warn};

use super::link::BrokerLink;
use crate::config::BrokerConfig;

/// Pause before the event loop is polled again after a dropped connection
pub const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Buffer between the network task and the GUI
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Events delivered from the network task to the GUI thread
#[derive(Debug, Clone)]
pub enum BrokerEvent {
    /// Broker acknowledged the connection; publishing is now possible
    Connected(BrokerLink),
    /// Decoded payload from the subscribed topic
    Message(String),
    /// Could not establish the initial connection
    ConnectFailed(String),
}

/// What the task should do after an event loop error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorAction {
    /// Give up and report a startup failure
    Abort,
    /// Poll again after [`RECONNECT_DELAY`]
    Reconnect,
}

/// Startup failures are fatal; once connected, the client just reconnects.
pub(crate) fn error_action(connected_once: bool) -> ErrorAction {
    if connected_once {
        ErrorAction::Reconnect
    } else {
        ErrorAction::Abort
    }
}

/// Turn one event loop notification into an optional GUI event.
///
/// `connected_once` flips on the first successful CONNACK.
pub(crate) fn dispatch(
    link: &BrokerLink,
    event: Event,
    connected_once: &mut bool,
) -> Option<BrokerEvent> {
    match event {
        Event::Incoming(Packet::ConnAck(ack)) => {
            link.on_connect(ack.code);
            *connected_once = true;
            Some(BrokerEvent::Connected(link.clone()))
        }
        Event::Incoming(Packet::Publish(publish)) => {
            match link.on_message(&publish.topic, &publish.payload) {
                Ok(text) => Some(BrokerEvent::Message(text)),
                Err(e) => {
                    warn!("Skipping message: {}", e);
                    None
                }
            }
        }
        other => {
            trace!("MQTT event: {:?}", other);
            None
        }
    }
}

/// Connect to the broker and stream its events.
///
/// Meant for `iced::Subscription::run_with`, which keeps a single instance
/// of the task alive for as long as the config stays the same.
pub fn connect(config: &BrokerConfig) -> impl Stream<Item = BrokerEvent> {
    let config = config.clone();

    iced::stream::channel(
        EVENT_CHANNEL_CAPACITY,
        move |mut output: mpsc::Sender<BrokerEvent>| async move {
            let (link, eventloop) = match BrokerLink::open(&config) {
                Ok(opened) => opened,
                Err(e) => {
                    error!("Failed to create MQTT client: {}", e);
                    let _ = output.send(BrokerEvent::ConnectFailed(e.to_string())).await;
                    return;
                }
            };

            debug!("Connecting to broker {}:{}", config.host, config.port);
            run(link, eventloop, output).await;
        },
    )
}

async fn run(link: BrokerLink, mut eventloop: EventLoop, mut output: mpsc::Sender<BrokerEvent>) {
    let mut connected_once = false;

    loop {
        let event = match eventloop.poll().await {
            Ok(event) => dispatch(&link, event, &mut connected_once),
            Err(e) => {
                if let ConnectionError::ConnectionRefused(code) = &e {
                    link.on_connect(*code);
                }

                match error_action(connected_once) {
                    ErrorAction::Abort => {
                        error!("Could not connect to broker: {}", e);
                        let _ = output.send(BrokerEvent::ConnectFailed(e.to_string())).await;
                        return;
                    }
                    ErrorAction::Reconnect => {
                        warn!("Broker connection lost: {}; reconnecting", e);
                        tokio::time::sleep(RECONNECT_DELAY).await;
                        None
                    }
                }
            }
        };

        if let Some(event) = event {
            if output.send(event).await.is_err() {
                debug!("GUI gone, stopping network task");
                return;
            }
        }
    }
}
