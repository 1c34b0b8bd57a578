//! Terminal output encoder (ASCII/Unicode/ANSI).
//!
//! Renders a placement figure as text so it can be previewed over SSH or piped into a
//! log. Downsampling keeps the darkest pixel of each character block: markers are a
//! few pixels wide and would vanish under nearest-neighbour sampling.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::str::FromStr;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    Ascii,
    /// Unicode half-block characters (2x vertical resolution)
    #[default]
    HalfBlock,
    /// Space cells with ANSI 24-bit background color
    TrueColor,
}

impl TerminalMode {
    /// Every mode, in the order shown by `--help`.
    pub const ALL: [Self; 3] = [Self::Ascii, Self::HalfBlock, Self::TrueColor];

    /// Command-line name of the mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::HalfBlock => "half-block",
            Self::TrueColor => "truecolor",
        }
    }
}

impl FromStr for TerminalMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Rendering(format!("unknown terminal mode '{s}'")))
    }
}

/// Terminal encoder configuration.
#[derive(Debug, Clone, Default)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    width: Option<u32>,
    height: Option<u32>,
}

impl TerminalEncoder {
    /// ASCII grayscale ramp from dark to light (10 levels).
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Columns used when no width is given.
    const DEFAULT_COLUMNS: u32 = 80;

    /// Create a new terminal encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the target width in characters.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width.max(1));
        self
    }

    /// Set the target height in lines.
    /// If not set, calculates from width to preserve aspect ratio.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height.max(1));
        self
    }

    /// Render a framebuffer to a string.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        match self.mode {
            TerminalMode::Ascii => self.render_ascii(fb),
            TerminalMode::HalfBlock => self.render_half_block(fb),
            TerminalMode::TrueColor => self.render_true_color(fb),
        }
    }

    /// Write the rendered text to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails, e.g. on a closed pipe.
    pub fn write_to<W: Write>(&self, fb: &Framebuffer, mut out: W) -> Result<()> {
        out.write_all(self.render(fb).as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn render_ascii(&self, fb: &Framebuffer) -> String {
        let grid = Grid::new(fb, self.dimensions(fb, 2.0));
        let mut output = String::with_capacity((grid.cols + 1) as usize * grid.rows as usize);

        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let luma = relative_luma(grid.sample(fb, col, row));
                output.push(Self::ASCII_RAMP[luma_to_index(luma, Self::ASCII_RAMP.len())]);
            }
            output.push('\n');
        }

        output
    }

    /// Each character covers two vertical samples: ▀ takes the upper one as
    /// foreground and the lower one as background.
    fn render_half_block(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.dimensions(fb, 1.0);
        // Round up to even height for half-blocks
        let grid = Grid::new(fb, (cols, (rows + 1) & !1));
        let mut output = String::with_capacity((grid.cols * 40 + 5) as usize * (grid.rows / 2) as usize);

        for row in (0..grid.rows).step_by(2) {
            for col in 0..grid.cols {
                let top = grid.sample(fb, col, row);
                let bottom = grid.sample(fb, col, row + 1);
                let _ = write!(
                    output,
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                    top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                );
            }
            output.push_str("\x1b[0m\n");
        }

        output
    }

    fn render_true_color(&self, fb: &Framebuffer) -> String {
        let grid = Grid::new(fb, self.dimensions(fb, 2.0));
        let mut output = String::with_capacity((grid.cols * 20 + 5) as usize * grid.rows as usize);

        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let c = grid.sample(fb, col, row);
                let _ = write!(output, "\x1b[48;2;{};{};{}m ", c.r, c.g, c.b);
            }
            output.push_str("\x1b[0m\n");
        }

        output
    }

    /// Target size in characters, preserving the figure's aspect ratio.
    /// `char_aspect` is the height/width ratio of one character cell.
    fn dimensions(&self, fb: &Framebuffer, char_aspect: f32) -> (u32, u32) {
        let fb_aspect = fb.width() as f32 / fb.height() as f32;

        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, ((w as f32 / fb_aspect / char_aspect).round() as u32).max(1)),
            (None, Some(h)) => (((h as f32 * fb_aspect * char_aspect).round() as u32).max(1), h),
            (None, None) => {
                let w = Self::DEFAULT_COLUMNS.min(fb.width());
                (w, ((w as f32 / fb_aspect / char_aspect).round() as u32).max(1))
            }
        }
    }
}

/// Character grid laid over the framebuffer.
struct Grid {
    cols: u32,
    rows: u32,
    cell_w: f32,
    cell_h: f32,
}

impl Grid {
    fn new(fb: &Framebuffer, (cols, rows): (u32, u32)) -> Self {
        Self {
            cols,
            rows,
            cell_w: fb.width() as f32 / cols as f32,
            cell_h: fb.height() as f32 / rows as f32,
        }
    }

    /// Darkest pixel in the block under `(col, row)`.
    fn sample(&self, fb: &Framebuffer, col: u32, row: u32) -> Rgba {
        let x0 = (col as f32 * self.cell_w) as u32;
        let y0 = (row as f32 * self.cell_h) as u32;
        let x1 = (((col + 1) as f32 * self.cell_w).ceil() as u32).clamp(x0 + 1, fb.width());
        let y1 = (((row + 1) as f32 * self.cell_h).ceil() as u32).clamp(y0 + 1, fb.height());

        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter_map(|(x, y)| fb.get_pixel(x, y))
            .min_by(|a, b| relative_luma(*a).total_cmp(&relative_luma(*b)))
            .unwrap_or(Rgba::BLACK)
    }
}

/// Rec. 709 luminance in `[0, 1]`.
fn relative_luma(pixel: Rgba) -> f32 {
    0.2126 * (f32::from(pixel.r) / 255.0)
        + 0.7152 * (f32::from(pixel.g) / 255.0)
        + 0.0722 * (f32::from(pixel.b) / 255.0)
}

fn luma_to_index(luma: f32, levels: usize) -> usize {
    ((luma * (levels - 1) as f32).round() as usize).min(levels - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw_circle;

    fn solid(width: u32, height: u32, color: Rgba) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height).expect("framebuffer creation should succeed");
        fb.clear(color);
        fb
    }

    #[test]
    fn test_ascii_render_white() {
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(5).render(&solid(10, 10, Rgba::WHITE));

        assert!(output.contains('@'));
        assert!(!output.contains(' '));
    }

    #[test]
    fn test_ascii_render_black() {
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(5).render(&solid(10, 10, Rgba::BLACK));

        assert!(output.chars().filter(|c| *c != '\n').all(|c| c == ' '));
    }

    #[test]
    fn test_small_marker_survives_downsampling() {
        let mut fb = solid(400, 400, Rgba::WHITE);
        draw_circle(&mut fb, 203, 197, 2, Rgba::CELL_BLUE);

        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(20).height(10).render(&fb);
        let marks = output.chars().filter(|c| *c != '@' && *c != '\n').count();
        assert!(marks >= 1, "marker should leave a trace:\n{output}");
    }

    #[test]
    fn test_half_block_contains_ansi() {
        let output =
            TerminalEncoder::new().mode(TerminalMode::HalfBlock).width(5).render(&solid(10, 10, Rgba::PAD_RED));

        assert!(output.contains("\x1b[38;2;214;39;40m"));
        assert!(output.contains('▀'));
        assert!(output.contains("\x1b[0m"));
    }

    #[test]
    fn test_true_color_contains_escapes() {
        let output =
            TerminalEncoder::new().mode(TerminalMode::TrueColor).width(5).render(&solid(10, 10, Rgba::CELL_BLUE));

        assert!(output.contains("48;2;31;119;180"));
    }

    #[test]
    fn test_aspect_ratio_preservation() {
        let fb = solid(200, 100, Rgba::WHITE);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(40).render(&fb);

        // 2:1 figure with 2:1 character cells gives ~10 lines
        let lines = output.lines().count();
        assert!((8..=12).contains(&lines));
    }

    #[test]
    fn test_custom_dimensions() {
        let fb = solid(100, 100, Rgba::WHITE);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(20).height(10).render(&fb);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0].len(), 20);
    }

    #[test]
    fn test_default_width_capped_at_80() {
        let fb = solid(1000, 100, Rgba::WHITE);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).render(&fb);

        assert!(output.lines().all(|line| line.len() <= 80));
    }

    #[test]
    fn test_write_to_matches_render() {
        let fb = solid(20, 20, Rgba::PAD_RED);
        let encoder = TerminalEncoder::new().mode(TerminalMode::TrueColor).width(4);
        let mut sink = Vec::new();
        encoder.write_to(&fb, &mut sink).unwrap();

        assert_eq!(String::from_utf8(sink).unwrap(), encoder.render(&fb));
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in TerminalMode::ALL {
            assert_eq!(mode.name().parse::<TerminalMode>().unwrap(), mode);
        }
        assert_eq!("ASCII".parse::<TerminalMode>().unwrap(), TerminalMode::Ascii);
        assert!("sixel".parse::<TerminalMode>().is_err());
    }
}
