//! Display surface: the pointer canvas and the status label below it.

use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::widget::{column, container, text};
use iced::{mouse, Element, Length, Point, Rectangle, Renderer, Theme};
use tracing::debug;

use crate::broker::Publisher;
use crate::gui::message::Message;
use crate::gui::theme::{self, colors};
use crate::transform::{offset_position, CoordinatePair, CANVAS_SIZE};

/// Marker radius in pixels
pub const MARKER_RADIUS: f32 = 10.0;

/// Label text before the first broker message arrives
pub const INITIAL_STATUS: &str = "Init";

/// Prefix put in front of every received payload
pub const STATUS_PREFIX: &str = "Total ";

/// Height reserved for the status label under the canvas
pub const STATUS_BAR_HEIGHT: f32 = 28.0;

/// The single shape drawn on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Center, already shifted by the marker offset
    pub center: Point,
}

impl Marker {
    /// Radius shared by every marker
    pub const RADIUS: f32 = MARKER_RADIUS;

    fn path(&self) -> Path {
        Path::circle(self.center, Self::RADIUS)
    }
}

/// Text shown in the status label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusText(String);

impl StatusText {
    /// Replace the label with `"Total " + s`.
    pub fn set(&mut self, s: &str) {
        self.0 = format!("{STATUS_PREFIX}{s}");
    }

    /// Current label text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StatusText {
    fn default() -> Self {
        Self(INITIAL_STATUS.to_string())
    }
}

/// Canvas state plus the status label
pub struct PointerSurface {
    marker: Option<Marker>,
    status: StatusText,
    publish_topic: String,
    hide_cursor: bool,
    cache: Cache,
}

impl PointerSurface {
    /// Empty canvas (no marker yet) with the initial label text.
    pub fn new(publish_topic: impl Into<String>, hide_cursor: bool) -> Self {
        Self {
            marker: None,
            status: StatusText::default(),
            publish_topic: publish_topic.into(),
            hide_cursor,
            cache: Cache::new(),
        }
    }

    /// Marker currently on the canvas, if the pointer has moved at all
    pub fn marker(&self) -> Option<Marker> {
        self.marker
    }

    /// Current status label text
    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    /// Move the marker under the pointer and publish the derived pair.
    ///
    /// `position` is relative to the canvas origin. Without a publisher
    /// (broker not acknowledged yet) the marker still moves.
    pub fn handle_pointer_move(
        &mut self,
        position: Point,
        publisher: Option<&dyn Publisher>,
    ) -> CoordinatePair {
        let (x, y) = offset_position(f64::from(position.x), f64::from(position.y));

        // Replacing the Option drops the previous marker; the cache clear
        // erases it from the next frame.
        self.marker = Some(Marker {
            center: Point::new(x as f32, y as f32),
        });
        self.cache.clear();

        let pair = CoordinatePair::from_screen(x, y);
        let message = pair.to_string();

        match publisher {
            Some(publisher) => publisher.publish(&self.publish_topic, &message),
            None => debug!("Broker not connected yet, not publishing {}", message),
        }

        pair
    }

    /// Replace the status label with the prefixed payload.
    pub fn update_status(&mut self, s: &str) {
        self.status.set(s);
    }

    /// Canvas above, status label below.
    pub fn view(&self) -> Element<'_, Message> {
        let size = CANVAS_SIZE as f32;

        let canvas = Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size));

        let label = text(self.status.as_str())
            .size(theme::STATUS_TEXT_SIZE)
            .style(|_theme| text::Style {
                color: Some(colors::TEXT_PRIMARY),
            });

        container(column![
            canvas,
            container(label)
                .center_x(Length::Fill)
                .height(Length::Fixed(STATUS_BAR_HEIGHT))
                .padding(4),
        ])
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(colors::BACKGROUND)),
            ..Default::default()
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

impl canvas::Program<Message> for PointerSurface {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let position = cursor.position_in(bounds)?;
                Some(canvas::Action::publish(Message::PointerMoved(position)))
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame: &mut Frame| {
            frame.fill_rectangle(Point::ORIGIN, frame.size(), colors::BACKGROUND);

            if let Some(marker) = self.marker {
                let circle = marker.path();
                frame.fill(&circle, colors::MARKER_FILL);
                frame.stroke(
                    &circle,
                    Stroke::default()
                        .with_color(colors::MARKER_OUTLINE)
                        .with_width(theme::MARKER_STROKE_WIDTH),
                );
            }
        });

        vec![geometry]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.hide_cursor && cursor.is_over(bounds) {
            mouse::Interaction::Hidden
        } else {
            mouse::Interaction::default()
        }
    }
}
