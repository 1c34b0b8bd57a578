//! Placement scatter plot.
//!
//! One figure holds every series of a [`Placement`](crate::placement::Placement) on
//! shared axes. The raster renderer draws frame, grid, ticks, markers and legend
//! swatches. The vector renderer adds every piece of text.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::output::{SvgElement, SvgEncoder, TextAnchor};
use crate::placement::PointSet;
use crate::render::{draw_line, draw_rect, draw_rect_outline, MarkerShape, MAX_MARKER_SIZE};
use crate::scale::{format_tick, tick_step, ticks, Extent, LinearScale, Scale};

const X_LABEL: &str = "X";
const Y_LABEL: &str = "Y";
/// Roughly how many ticks each axis gets.
const TICK_TARGET: usize = 6;
/// Tick mark length in pixels.
const TICK_LEN: f64 = 5.0;
const GRID_COLOR: Rgba = Rgba::rgb(232, 232, 232);
const LEGEND_ROW: f64 = 18.0;
const LEGEND_PAD: f64 = 8.0;
const LEGEND_SWATCH: f32 = 8.0;
const TITLE_FONT: f32 = 16.0;
const LABEL_FONT: f32 = 13.0;
const TICK_FONT: f32 = 11.0;

/// How the points of one series are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    /// Marker fill.
    pub color: Rgba,
    /// Marker glyph.
    pub shape: MarkerShape,
    /// Marker diameter in pixels.
    pub size: f32,
}

impl SeriesStyle {
    /// Small blue circles for the single-series variant.
    pub const SINGLE: Self = Self::new(Rgba::CELL_BLUE, MarkerShape::Circle, 3.0);
    /// Blue circles for cells.
    pub const CELLS: Self = Self::new(Rgba::CELL_BLUE, MarkerShape::Circle, 4.0);
    /// Red squares for I/O pads.
    pub const PADS: Self = Self::new(Rgba::PAD_RED, MarkerShape::Square, 6.0);

    /// Create a style.
    #[must_use]
    pub const fn new(color: Rgba, shape: MarkerShape, size: f32) -> Self {
        Self { color, shape, size }
    }
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self::CELLS
    }
}

/// One named series with its style.
#[derive(Debug, Clone)]
struct Series {
    name: String,
    points: Vec<Point>,
    style: SeriesStyle,
}

/// Builder for placement scatter figures.
#[derive(Debug, Clone)]
pub struct PlacementPlot {
    series: Vec<Series>,
    title: String,
    width: u32,
    height: u32,
    margin: u32,
}

impl Default for PlacementPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementPlot {
    /// Create an empty figure.
    #[must_use]
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            title: String::new(),
            width: 800,
            height: 600,
            margin: 60,
        }
    }

    /// Set the figure title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the margin between figure edge and plot frame.
    #[must_use]
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Append a series. Empty sets still get a legend entry.
    #[must_use]
    pub fn series(mut self, set: &PointSet, style: SeriesStyle) -> Self {
        self.series.push(Series { name: set.name.clone(), points: set.points.clone(), style });
        self
    }

    /// Number of series, empty ones included.
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Total number of points over all series.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Data bounds shown by the figure.
    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent::from_points(self.series.iter().flat_map(|s| s.points.iter()))
    }

    fn layout(&self) -> Result<Layout> {
        let m = self.margin;
        if self.width <= m.saturating_mul(2) || self.height <= m.saturating_mul(2) {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }

        let extent = self.extent();
        let left = f64::from(m);
        let right = f64::from(self.width - m);
        let top = f64::from(m);
        let bottom = f64::from(self.height - m);

        Ok(Layout {
            x: LinearScale::new(extent.x, (left, right))?,
            y: LinearScale::new(extent.y, (bottom, top))?,
            x_ticks: Axis::new(extent.x),
            y_ticks: Axis::new(extent.y),
            left,
            right,
            top,
            bottom,
        })
    }

    /// Render onto an existing framebuffer sized like the figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the margin leaves no room for the plot area.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let layout = self.layout()?;
        fb.clear(Rgba::WHITE);

        for &x in &layout.x_ticks.values {
            let px = layout.x.scale(x) as i32;
            draw_line(fb, px, layout.top as i32, px, layout.bottom as i32, GRID_COLOR);
            draw_line(fb, px, layout.bottom as i32, px, (layout.bottom + TICK_LEN) as i32, Rgba::BLACK);
        }
        for &y in &layout.y_ticks.values {
            let py = layout.y.scale(y) as i32;
            draw_line(fb, layout.left as i32, py, layout.right as i32, py, GRID_COLOR);
            draw_line(fb, (layout.left - TICK_LEN) as i32, py, layout.left as i32, py, Rgba::BLACK);
        }

        draw_rect_outline(
            fb,
            layout.left as i32,
            layout.top as i32,
            (layout.right - layout.left) as u32 + 1,
            (layout.bottom - layout.top) as u32 + 1,
            Rgba::BLACK,
            1,
        );

        for series in &self.series {
            let style = series.style;
            for point in series.points.iter().filter(|p| p.is_finite()) {
                let (px, py) = layout.project(*point);
                style.shape.draw(fb, px, py, style.size, style.color);
            }
        }

        // Legend: a boxed column of swatches in the top-right corner
        let legend = self.legend_box(&layout, 0.0);
        draw_rect(fb, legend.x as i32, legend.y as i32, legend.width as u32, legend.height as u32, Rgba::WHITE);
        draw_rect_outline(
            fb,
            legend.x as i32,
            legend.y as i32,
            legend.width as u32,
            legend.height as u32,
            Rgba::rgb(160, 160, 160),
            1,
        );
        for (row, series) in self.series.iter().enumerate() {
            let (sx, sy) = legend.swatch_center(row);
            series.style.shape.draw(fb, sx, sy, LEGEND_SWATCH.max(series.style.size), series.style.color);
        }

        Ok(())
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or leave no plot area.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        self.render(&mut fb)?;
        Ok(fb)
    }

    /// Render as an SVG document, text included.
    ///
    /// # Errors
    ///
    /// Returns an error if the margin leaves no room for the plot area.
    pub fn to_svg(&self) -> Result<SvgEncoder> {
        let layout = self.layout()?;
        let mut svg = SvgEncoder::new(self.width, self.height).title(self.title.clone());
        let (left, right, top, bottom) =
            (layout.left as f32, layout.right as f32, layout.top as f32, layout.bottom as f32);

        for &x in &layout.x_ticks.values {
            let px = layout.x.scale(x) as f32;
            svg = svg
                .line(px, top, px, bottom, GRID_COLOR, 1.0)
                .line(px, bottom, px, bottom + TICK_LEN as f32, Rgba::BLACK, 1.0)
                .text_anchored(
                    px,
                    bottom + TICK_LEN as f32 + TICK_FONT + 2.0,
                    &format_tick(x, layout.x_ticks.step),
                    TICK_FONT,
                    Rgba::BLACK,
                    TextAnchor::Middle,
                );
        }
        for &y in &layout.y_ticks.values {
            let py = layout.y.scale(y) as f32;
            svg = svg
                .line(left, py, right, py, GRID_COLOR, 1.0)
                .line(left - TICK_LEN as f32, py, left, py, Rgba::BLACK, 1.0)
                .text_anchored(
                    left - TICK_LEN as f32 - 3.0,
                    py + TICK_FONT / 3.0,
                    &format_tick(y, layout.y_ticks.step),
                    TICK_FONT,
                    Rgba::BLACK,
                    TextAnchor::End,
                );
        }

        svg.add_element(SvgElement::Rect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
            fill: None,
            stroke: Some(Rgba::BLACK),
            stroke_width: 1.0,
        });

        for series in &self.series {
            for point in series.points.iter().filter(|p| p.is_finite()) {
                let (px, py) = layout.project(*point);
                for element in marker_elements(series.style, series.style.size, px, py) {
                    svg.add_element(element);
                }
            }
        }

        let center_x = (left + right) / 2.0;
        let center_y = (top + bottom) / 2.0;
        let m = self.margin as f32;
        svg = svg
            .text_anchored(center_x, m / 2.0, &self.title, TITLE_FONT, Rgba::BLACK, TextAnchor::Middle)
            .text_anchored(
                center_x,
                self.height as f32 - m / 4.0,
                X_LABEL,
                LABEL_FONT,
                Rgba::BLACK,
                TextAnchor::Middle,
            );
        svg.add_element(SvgElement::Text {
            x: m / 4.0 + LABEL_FONT / 2.0,
            y: center_y,
            text: Y_LABEL.to_string(),
            font_size: LABEL_FONT,
            fill: Rgba::BLACK,
            anchor: TextAnchor::Middle,
            rotate: Some(-90.0),
        });

        let widest = self.series.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);
        let legend = self.legend_box(&layout, widest as f64 * f64::from(LABEL_FONT) * 0.6);
        svg.add_element(SvgElement::Rect {
            x: legend.x as f32,
            y: legend.y as f32,
            width: legend.width as f32,
            height: legend.height as f32,
            fill: Some(Rgba::WHITE.with_alpha(230)),
            stroke: Some(Rgba::rgb(160, 160, 160)),
            stroke_width: 1.0,
        });
        for (row, series) in self.series.iter().enumerate() {
            let (sx, sy) = legend.swatch_center(row);
            for element in marker_elements(series.style, LEGEND_SWATCH.max(series.style.size), sx, sy) {
                svg.add_element(element);
            }
            svg = svg.text_anchored(
                sx + LEGEND_SWATCH + 4.0,
                sy + LABEL_FONT / 3.0,
                &series.name,
                LABEL_FONT,
                Rgba::BLACK,
                TextAnchor::Start,
            );
        }

        Ok(svg)
    }

    fn legend_box(&self, layout: &Layout, text_width: f64) -> LegendBox {
        let swatch = self
            .series
            .iter()
            .map(|s| f64::from(s.style.size.clamp(LEGEND_SWATCH, MAX_MARKER_SIZE)))
            .fold(f64::from(LEGEND_SWATCH), f64::max);
        let text = if text_width > 0.0 { text_width + 4.0 } else { 0.0 };
        let width = (swatch + text + 2.0 * LEGEND_PAD).ceil();
        let height = (self.series.len() as f64 * LEGEND_ROW + LEGEND_PAD).ceil();

        LegendBox {
            x: layout.right - LEGEND_PAD - width,
            y: layout.top + LEGEND_PAD,
            width,
            height,
            swatch,
        }
    }
}

/// Pixel geometry of one rendered figure.
struct Layout {
    x: LinearScale,
    y: LinearScale,
    x_ticks: Axis,
    y_ticks: Axis,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Layout {
    fn project(&self, point: Point) -> (f32, f32) {
        (self.x.scale(point.x) as f32, self.y.scale(point.y) as f32)
    }
}

struct Axis {
    step: f64,
    values: Vec<f64>,
}

impl Axis {
    fn new((lo, hi): (f64, f64)) -> Self {
        Self { step: tick_step(lo, hi, TICK_TARGET), values: ticks(lo, hi, TICK_TARGET) }
    }
}

struct LegendBox {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    swatch: f64,
}

impl LegendBox {
    fn swatch_center(&self, row: usize) -> (f32, f32) {
        let cx = self.x + LEGEND_PAD + self.swatch / 2.0;
        let cy = self.y + LEGEND_PAD / 2.0 + (row as f64 + 0.5) * LEGEND_ROW;
        (cx as f32, cy as f32)
    }
}

/// Vector glyph for one marker.
fn marker_elements(style: SeriesStyle, size: f32, cx: f32, cy: f32) -> Vec<SvgElement> {
    let r = size / 2.0;
    let fill = style.color;
    match style.shape {
        MarkerShape::Circle => vec![SvgElement::Circle { cx, cy, r, fill }],
        MarkerShape::Square => vec![SvgElement::Rect {
            x: cx - r,
            y: cy - r,
            width: size,
            height: size,
            fill: Some(fill),
            stroke: None,
            stroke_width: 0.0,
        }],
        MarkerShape::Triangle => vec![SvgElement::Polygon {
            points: vec![(cx, cy - r), (cx + r, cy + r), (cx - r, cy + r)],
            fill,
        }],
        MarkerShape::Cross => vec![
            SvgElement::Line { x1: cx - r, y1: cy - r, x2: cx + r, y2: cy + r, stroke: fill, stroke_width: 1.5 },
            SvgElement::Line { x1: cx - r, y1: cy + r, x2: cx + r, y2: cy - r, stroke: fill, stroke_width: 1.5 },
        ],
    }
}
