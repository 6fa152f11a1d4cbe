//! # mqtt-pointer
//!
//! Mouse-driven pointer canvas that publishes normalized coordinates over MQTT.
//!
//! A red marker follows the mouse across a 600×600 canvas. Every movement
//! publishes the marker position, mapped onto ±4.905, to `StA/data`. A label
//! under the canvas shows the last payload received on `StA/message`.
//!
//! # Architecture
//!
//! ```text
//! mqtt-pointer
//!   ├─> PointerApp (composition root, iced application)
//!   │     ├─> PointerSurface (canvas, marker, status label)
//!   │     └─> BrokerLink (publish handle, set once connected)
//!   └─> broker::connect (network task, runs as an iced subscription)
//! ```
//!
//! # Data Flow
//!
//! **Outbound:** Mouse → canvas::Program → PointerSurface → transform → BrokerLink → broker
//!
//! **Inbound:** broker → EventLoop → BrokerEvent → PointerApp::update → status label

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Application configuration
pub mod config;

/// MQTT broker link and network task
pub mod broker;

/// Pointer window
pub mod gui;

/// Screen-to-physical coordinate transform
pub mod transform;

/// Utility functions
pub mod utils;
