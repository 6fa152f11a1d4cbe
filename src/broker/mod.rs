//! MQTT broker link
//!
//! One connection per process. Inbound messages on the subscribed topic are
//! turned into status text for the GUI; pointer positions go out through the
//! [`Publisher`] seam.
//!
//! # Architecture
//!
//! ```text
//! GUI thread                         network task (tokio)
//!   PointerSurface ──publish──> BrokerLink ──requests──> EventLoop ──> broker
//!   PointerApp <──BrokerEvent── task::connect <──events── EventLoop <── broker
//! ```

pub mod error;
pub mod link;
pub mod task;

#[cfg(test)]
pub(crate) mod loopback;

pub use error::{BrokerError, Result};
pub use link::BrokerLink;
pub use task::{connect, BrokerEvent, RECONNECT_DELAY};

/// Outbound half of the broker link, as seen by the display surface
///
/// Fire-and-forget: implementations queue the message and return
/// immediately. Failures are logged, never returned.
#[cfg_attr(test, mockall::automock)]
pub trait Publisher {
    /// Publish `message`. `topic` is what the caller asked for; the link
    /// decides where the message actually goes.
    fn publish(&self, topic: &str, message: &str);
}
