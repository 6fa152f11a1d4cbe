//! Colors for the pointer canvas.

/// Fixed palette: white surface, red marker with black outline.
pub mod colors {
    use iced::Color;

    /// Canvas and status bar background
    pub const BACKGROUND: Color = Color::WHITE;

    /// Marker disc
    pub const MARKER_FILL: Color = Color::from_rgb(1.0, 0.0, 0.0);
    /// Marker rim
    pub const MARKER_OUTLINE: Color = Color::BLACK;

    /// Status label
    pub const TEXT_PRIMARY: Color = Color::BLACK;
}

/// Marker outline width in pixels
pub const MARKER_STROKE_WIDTH: f32 = 1.0;

/// Status label font size
pub const STATUS_TEXT_SIZE: f32 = 14.0;
