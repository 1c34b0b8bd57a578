//! The fixed validity rectangle and the counts printed after a run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Inclusive rectangle a placed coordinate must fall in to count as valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidityRegion {
    /// Smallest valid x.
    pub x_min: f64,
    /// Largest valid x.
    pub x_max: f64,
    /// Smallest valid y.
    pub y_min: f64,
    /// Largest valid y.
    pub y_max: f64,
}

impl Default for ValidityRegion {
    /// `[0, 101] × [0, 99]`.
    fn default() -> Self {
        Self { x_min: 0.0, x_max: 101.0, y_min: 0.0, y_max: 99.0 }
    }
}

impl ValidityRegion {
    /// Whether `point` lies inside, boundary included.
    ///
    /// Bounds are compared directly so an infinite bound stays unbounded and `x_max`
    /// itself is always inside. NaN coordinates are never contained.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }
}

/// Running totals over all records. `valid <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidityCounter {
    /// Records seen.
    pub total: usize,
    /// Records inside the validity region.
    pub valid: usize,
}

impl ValidityCounter {
    /// Count one coordinate.
    pub fn count(&mut self, region: &ValidityRegion, point: Point) {
        self.total += 1;
        if region.contains(point) {
            self.valid += 1;
        }
    }

    /// Records outside the region.
    #[must_use]
    pub const fn invalid(&self) -> usize {
        self.total - self.valid
    }
}

impl fmt::Display for ValidityCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total cells (including I/O pads): {}, valid: {}", self.total, self.valid)
    }
}
