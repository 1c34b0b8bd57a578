//! Scale functions for data-to-visual mappings.
//!
//! Scales transform placement coordinates to pixel positions, and [`Extent`] / [`ticks`]
//! decide what part of the placement a figure shows.

use crate::error::{Error, Result};
use crate::geometry::Point;
use trueno::Vector;

/// Fraction of the data span added on each side of an axis.
pub const AXIS_PADDING: f64 = 0.05;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Position of `value` along the domain, 0 at `domain_min` and 1 at `domain_max`.
    fn fraction(&self, value: f64) -> f64 {
        let span = self.domain_max - self.domain_min;
        if span.is_finite() {
            (value - self.domain_min) / span
        } else {
            // Domains near the f64 limits overflow their span; halves stay finite
            (value / 2.0 - self.domain_min / 2.0) / (self.domain_max / 2.0 - self.domain_min / 2.0)
        }
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = self.fraction(value);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Visible data bounds of a figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Lower and upper x bound.
    pub x: (f64, f64),
    /// Lower and upper y bound.
    pub y: (f64, f64),
}

impl Default for Extent {
    fn default() -> Self {
        Self { x: (0.0, 1.0), y: (0.0, 1.0) }
    }
}

impl Extent {
    /// Compute padded bounds covering every finite point.
    ///
    /// Non-finite points are ignored. With no finite points the unit square is used,
    /// and an axis whose values are all equal is widened to ±0.5.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let (xs, ys): (Vec<f64>, Vec<f64>) =
            points.into_iter().filter(|p| p.is_finite()).map(|p| (p.x, p.y)).unzip();

        if xs.is_empty() {
            return Self::default();
        }

        Self { x: padded(min_max(&xs)), y: padded(min_max(&ys)) }
    }

    /// Shrink or grow around the center by `zoom` and shift by a fraction of the span.
    #[must_use]
    pub fn view(&self, zoom: f64, pan: (f64, f64)) -> Self {
        let axis = |(lo, hi): (f64, f64), shift: f64| {
            let half = hi / 2.0 - lo / 2.0;
            let center = clamp_finite(midpoint(lo, hi) + shift * 2.0 * half);
            (clamp_finite(center - half / zoom), clamp_finite(center + half / zoom))
        };
        Self { x: axis(self.x, pan.0), y: axis(self.y, pan.1) }
    }
}

/// Min/max over a non-empty column.
///
/// Columns that survive the round trip through `f32` use the SIMD reduction. Anything
/// else (huge magnitudes, fine fractions) is folded in `f64` so no two coordinates merge.
#[allow(clippy::float_cmp)]
fn min_max(values: &[f64]) -> (f64, f64) {
    let narrowed: Option<Vec<f32>> = values
        .iter()
        .map(|&v| {
            let n = v as f32;
            (f64::from(n) == v).then_some(n)
        })
        .collect();

    if let Some(narrowed) = narrowed {
        let vec = Vector::from_vec(narrowed);
        let min = vec.min().unwrap_or(f32::NAN);
        let max = vec.max().unwrap_or(f32::NAN);
        if min.is_finite() && max.is_finite() {
            return (f64::from(min), f64::from(max));
        }
    }

    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        // ±0.5, or a few ulps when 0.5 vanishes against the magnitude
        let half = 0.5f64.max(lo.abs() * f64::EPSILON * 4.0);
        return (clamp_finite(lo - half), clamp_finite(hi + half));
    }
    let pad = hi * AXIS_PADDING - lo * AXIS_PADDING;
    (clamp_finite(lo - pad), clamp_finite(hi + pad))
}

/// Midpoint of `lo` and `hi` without overflowing.
#[must_use]
pub fn midpoint(lo: f64, hi: f64) -> f64 {
    lo / 2.0 + hi / 2.0
}

fn clamp_finite(value: f64) -> f64 {
    value.clamp(f64::MIN, f64::MAX)
}

/// Pick a step of 1, 2 or 5 times a power of ten giving roughly `target` intervals.
#[must_use]
pub fn nice_step(span: f64, target: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;

    let nice = if residual < 1.5 {
        1.0
    } else if residual < 3.0 {
        2.0
    } else if residual < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Most ticks one axis may carry.
pub const MAX_TICKS: usize = 64;

/// Nice step for ticks over `[lo, hi]`, even when `hi - lo` overflows.
#[must_use]
pub fn tick_step(lo: f64, hi: f64, target: usize) -> f64 {
    let span = hi - lo;
    if span.is_finite() {
        nice_step(span, target)
    } else {
        nice_step(hi / 2.0 - lo / 2.0, (target / 2).max(1))
    }
}

/// Tick positions inside `[lo, hi]` on a nice step.
///
/// Empty when a bound is not finite or the step is too fine to resolve at this magnitude.
#[must_use]
pub fn ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
        return Vec::new();
    }
    let step = tick_step(lo, hi, target);
    let first = (lo / step).ceil();
    let last = (hi / step).floor();
    if !(first.is_finite() && last.is_finite()) || last - first > MAX_TICKS as f64 {
        return Vec::new();
    }
    let count = (last - first).max(-1.0) as i64 + 1;
    (0..count).map(|i| (first + i as f64) * step).collect()
}

/// Format a tick value with just enough decimals for the step.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    if value.abs() >= 1e9 {
        return format!("{value:e}");
    }
    let decimals = if step >= 1.0 { 0 } else { (-step.log10()).ceil() as usize };
    // Avoid printing "-0"
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{value:.decimals$}")
}
