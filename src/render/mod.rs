//! Rendering backends and rasterization.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: Fast non-antialiased line drawing
//! - **Midpoint Circle**: Filled circle rendering
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod marker;
mod primitives;

pub use marker::{MarkerShape, MAX_MARKER_SIZE};
pub use primitives::{
    draw_circle, draw_cross, draw_line, draw_rect, draw_rect_outline, draw_triangle,
};
