//! Pointer window built on iced's Elm Architecture.
//!
//! A fixed 600×600 canvas tracks the mouse with a single red marker; a
//! status label underneath shows the last broker message. Broker events reach
//! the GUI as messages from a subscription, never by touching widgets from
//! the network task.

pub mod app;
pub mod message;
pub mod surface;
pub mod theme;

pub use app::{FatalSlot, PointerApp};
pub use message::Message;
pub use surface::{Marker, PointerSurface, StatusText};
