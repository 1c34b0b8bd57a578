//! Scatter marker shapes.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use serde::{Deserialize, Serialize};

use super::primitives::{draw_circle, draw_cross, draw_rect, draw_triangle};

/// Largest marker diameter in pixels. Bigger sizes draw at this size.
pub const MAX_MARKER_SIZE: f32 = 256.0;

/// Glyph used to draw one scatter point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    /// Filled disc.
    #[default]
    Circle,
    /// Filled axis-aligned square.
    Square,
    /// Filled triangle pointing up.
    Triangle,
    /// Diagonal cross.
    Cross,
}

impl MarkerShape {
    /// Rasterize a marker of `size` pixels (diameter) centered on `(x, y)`.
    pub fn draw(self, fb: &mut Framebuffer, x: f32, y: f32, size: f32, color: Rgba) {
        let cx = x.round() as i32;
        let cy = y.round() as i32;
        let radius = (size.min(MAX_MARKER_SIZE) / 2.0).floor() as i32;

        match self {
            Self::Circle => draw_circle(fb, cx, cy, radius, color),
            Self::Square => {
                let side = (2 * radius + 1) as u32;
                draw_rect(fb, cx - radius, cy - radius, side, side, color);
            }
            Self::Triangle => draw_triangle(fb, cx, cy, radius, color),
            Self::Cross => draw_cross(fb, cx, cy, radius, color),
        }
    }

    /// Short lowercase name, as written in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Cross => "cross",
        }
    }
}
