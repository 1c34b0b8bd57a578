//! High-level plot types.
//!
//! Provides the placement figure with a builder API.

mod scatter;

pub use scatter::{PlacementPlot, SeriesStyle};
