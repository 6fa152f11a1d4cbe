//! Screen-to-physical coordinate transform
//!
//! Maps a pointer position on the 600×600 canvas onto the ±4.905 range the
//! downstream consumer works in. The origin moves to the canvas center and
//! the x axis is mirrored:
//!
//! ```text
//! x_new = -(x_screen - 300) * 4.905 / 300
//! y_new =  (y_screen - 300) * 4.905 / 300
//! ```
//!
//! `x_screen`/`y_screen` are the marker position, i.e. the raw pointer
//! position shifted by [`MARKER_OFFSET`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Edge length of the square drawing surface in pixels
pub const CANVAS_SIZE: f64 = 600.0;

/// Canvas center on both axes
pub const CENTER: f64 = CANVAS_SIZE / 2.0;

/// Half-width of the physical range published to the broker
pub const PHYSICAL_RANGE: f64 = 4.905;

/// Physical units per pixel
pub const SCALE: f64 = PHYSICAL_RANGE / CENTER;

/// Shift applied to the raw pointer position so the marker sits under the cursor tip
pub const MARKER_OFFSET: (f64, f64) = (3.0, 7.0);

/// Apply the marker offset to a raw pointer position.
pub fn offset_position(x: f64, y: f64) -> (f64, f64) {
    (x + MARKER_OFFSET.0, y + MARKER_OFFSET.1)
}

/// Normalized coordinate pair sent to the broker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePair {
    /// Mirrored horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl CoordinatePair {
    /// Transform an (already offset) screen position.
    pub fn from_screen(x_screen: f64, y_screen: f64) -> Self {
        Self {
            x: -(x_screen - CENTER) * SCALE,
            y: (y_screen - CENTER) * SCALE,
        }
    }

    /// Inverse of [`CoordinatePair::from_screen`].
    pub fn to_screen(self) -> (f64, f64) {
        (CENTER - self.x / SCALE, CENTER + self.y / SCALE)
    }

    /// Whether both components lie inside `[-PHYSICAL_RANGE, PHYSICAL_RANGE]`.
    pub fn in_range(self) -> bool {
        let range = -PHYSICAL_RANGE..=PHYSICAL_RANGE;
        range.contains(&self.x) && range.contains(&self.y)
    }
}

impl fmt::Display for CoordinatePair {
    // Debug formatting keeps a trailing `.0` on integral values, which is
    // what existing consumers of the topic were written against.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?},{:?}", self.x, self.y)
    }
}

/// Error parsing a `"<x>,<y>"` payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePairError {
    /// No comma separator present
    #[error("missing ',' separator in {0:?}")]
    MissingSeparator(String),

    /// A component is not a float
    #[error("invalid {axis} component: {value:?}")]
    InvalidComponent {
        /// Which half failed ("x" or "y")
        axis: &'static str,
        /// The offending text
        value: String,
    },
}

impl FromStr for CoordinatePair {
    type Err = ParsePairError;

    /// Splits on the first comma, the way subscribers of the topic do.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| ParsePairError::MissingSeparator(s.to_string()))?;

        let parse = |axis, value: &str| {
            value
                .parse::<f64>()
                .map_err(|_| ParsePairError::InvalidComponent {
                    axis,
                    value: value.to_string(),
                })
        };

        Ok(Self {
            x: parse("x", x)?,
            y: parse("y", y)?,
        })
    }
}
