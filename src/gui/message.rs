//! GUI message types
//!
//! Pointer input and broker events both arrive as messages, so all state
//! changes happen inside `PointerApp::update` on the GUI thread.

use iced::Point;

use crate::broker::BrokerEvent;

/// Main application message type
#[derive(Debug, Clone)]
pub enum Message {
    /// Pointer moved; position is relative to the canvas origin
    PointerMoved(Point),
    /// Event from the broker network task
    Broker(BrokerEvent),
}
