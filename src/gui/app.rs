//! Main iced Application implementation for mqtt-pointer
//!
//! Implements the Elm Architecture pattern: State -> View -> Message -> Update -> State.
//! `PointerApp` is the composition root: it owns the display surface, the
//! broker handle and the configuration for the life of the process.

use std::sync::Arc;

use iced::{Element, Subscription, Task};
use parking_lot::Mutex;
use tracing::{error, info};

use crate::broker::{self, BrokerEvent, BrokerLink, Publisher};
use crate::config::Config;
use crate::gui::message::Message;
use crate::gui::surface::PointerSurface;

/// Slot the GUI fills when the initial broker connection fails
///
/// Read by `main` after the event loop returns to pick the exit status.
pub type FatalSlot = Arc<Mutex<Option<String>>>;

/// Application state
pub struct PointerApp {
    config: Config,
    surface: PointerSurface,
    link: Option<BrokerLink>,
    fatal: FatalSlot,
}

impl PointerApp {
    /// Build the initial state. The broker connection starts with the subscription.
    pub fn new(config: Config, fatal: FatalSlot) -> (Self, Task<Message>) {
        let surface = PointerSurface::new(
            config.broker.publish_topic.clone(),
            config.display.hide_cursor,
        );

        let app = Self {
            config,
            surface,
            link: None,
            fatal,
        };

        (app, Task::none())
    }

    /// Window title
    pub fn title(&self) -> String {
        self.config.display.title.clone()
    }

    /// Display surface (marker + status label)
    pub fn surface(&self) -> &PointerSurface {
        &self.surface
    }

    /// Whether the broker has acknowledged the connection
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    /// Apply one message
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PointerMoved(position) => {
                let publisher = self.link.as_ref().map(|link| link as &dyn Publisher);
                self.surface.handle_pointer_move(position, publisher);
                Task::none()
            }

            Message::Broker(BrokerEvent::Connected(link)) => {
                info!(
                    "Broker {}:{} ready (in: {}, out: {})",
                    self.config.broker.host,
                    self.config.broker.port,
                    link.subscribe_topic(),
                    link.publish_topic()
                );
                self.link = Some(link);
                Task::none()
            }
            Message::Broker(BrokerEvent::Message(text)) => {
                self.surface.update_status(&text);
                Task::none()
            }
            Message::Broker(BrokerEvent::ConnectFailed(reason)) => {
                error!("Startup connection failed, closing window: {}", reason);
                *self.fatal.lock() = Some(reason);
                iced::exit()
            }
        }
    }

    /// Render the canvas and status label
    pub fn view(&self) -> Element<'_, Message> {
        self.surface.view()
    }

    /// Broker network task, restarted only if the broker config changes
    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::run_with(self.config.broker.clone(), broker::connect).map(Message::Broker)
    }
}

#[cfg(test)]
mod tests {
    use iced::Point;

    use super::*;

    fn app() -> (PointerApp, FatalSlot) {
        let fatal = FatalSlot::default();
        let (app, _task) = PointerApp::new(Config::default(), fatal.clone());
        (app, fatal)
    }

    #[test]
    fn test_initial_state() {
        let (app, _fatal) = app();
        assert_eq!(app.title(), "Studienarbeit MAUC, MQTT Steuerung");
        assert_eq!(app.surface().status(), "Init");
        assert!(!app.is_connected());
    }

    #[test]
    fn test_inbound_message_updates_status() {
        let (mut app, _fatal) = app();
        let _ = app.update(Message::Broker(BrokerEvent::Message("hello".to_string())));
        assert_eq!(app.surface().status(), "Total hello");

        let _ = app.update(Message::Broker(BrokerEvent::Message("42".to_string())));
        assert_eq!(app.surface().status(), "Total 42");
    }

    #[test]
    fn test_pointer_move_before_connect_draws_marker() {
        let (mut app, _fatal) = app();
        let _ = app.update(Message::PointerMoved(Point::new(300.0, 300.0)));
        assert_eq!(
            app.surface().marker().map(|m| m.center),
            Some(Point::new(303.0, 307.0))
        );
    }

    #[test]
    fn test_connected_stores_link() {
        let (mut app, _fatal) = app();
        let (link, _eventloop) = BrokerLink::open(&Config::default().broker).unwrap();

        let _ = app.update(Message::Broker(BrokerEvent::Connected(link)));
        assert!(app.is_connected());

        // Publishing through the stored link only queues the request
        let _ = app.update(Message::PointerMoved(Point::new(10.0, 20.0)));
        assert!(app.surface().marker().is_some());
    }

    #[test]
    fn test_connect_failure_records_fatal_error() {
        let (mut app, fatal) = app();
        let _ = app.update(Message::Broker(BrokerEvent::ConnectFailed(
            "connection refused".to_string(),
        )));
        assert_eq!(fatal.lock().as_deref(), Some("connection refused"));
    }
}
