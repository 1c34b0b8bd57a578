//! # Placement-Viz
//!
//! Scatter-plot visualizer for cell and I/O pad placement files.
//!
//! A placement file holds one `<id> <x> <y>` record per line. Records whose id starts
//! with `p` are I/O pads, everything else is a cell. Loading a file counts how many
//! coordinates fall inside the validity region (`[0, 101] × [0, 99]` by default), and
//! the figure shows every record on shared axes with one marker series per class.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use placement_viz::prelude::*;
//!
//! let plotter = Plotter::new(Classifier::PadPrefix)
//!     .target(Target::File("placement.svg".into()));
//!
//! let counter = plotter.plot("design.kiaPad")?;
//! assert!(counter.valid <= counter.total);
//! # Ok::<(), placement_viz::Error>(())
//! ```
//!
//! ## Outputs
//!
//! - Interactive terminal viewer (feature `viewer`, on by default)
//! - PNG and SVG files
//! - Terminal previews (ASCII, half-block, 24-bit color)
//!
//! SIMD reductions for data extents come from [trueno](https://crates.io/crates/trueno).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and hex parsing.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives in data space.
pub mod geometry;

/// Scale functions, data extents and tick placement.
pub mod scale;

// ============================================================================
// Placement Modules
// ============================================================================

/// Placement file parsing, classification and validity counting.
pub mod placement;

/// Figure configuration loaded from YAML.
pub mod config;

/// The plot operation.
pub mod plotter;

// ============================================================================
// Rendering Modules
// ============================================================================

/// High-level plot types.
pub mod plots;

/// Rasterization primitives and marker shapes.
pub mod render;

/// Output encoders (PNG, SVG, terminal).
pub mod output;

/// Interactive terminal viewer.
#[cfg(feature = "viewer")]
#[cfg_attr(docsrs, doc(cfg(feature = "viewer")))]
pub mod viewer;

/// Log subscriber setup for the command-line tool.
pub mod logging;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for placement-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use placement_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::PlotConfig;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::Point;
    pub use crate::output::TerminalMode;
    pub use crate::placement::{Classifier, Placement, PointSet, Record, ValidityCounter, ValidityRegion};
    pub use crate::plots::{PlacementPlot, SeriesStyle};
    pub use crate::plotter::{Plotter, Target};
    pub use crate::render::MarkerShape;
    pub use crate::scale::{Extent, LinearScale, Scale};
}

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
