//! Primitive rendering functions.
//!
//! Implements rasterization algorithms for basic geometric shapes.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm (non-antialiased).
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `x0`, `y0` - Start coordinates
/// * `x1`, `y1` - End coordinates
/// * `color` - Line color
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.paint_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    // Clip the part left of / above the buffer instead of shifting the rect
    let (x, width) = clip_start(x, width);
    let (y, height) = clip_start(y, height);
    fb.fill_rect(x, y, width, height, color);
}

fn clip_start(start: i32, len: u32) -> (u32, u32) {
    if start >= 0 {
        (start as u32, len)
    } else {
        (0, len.saturating_sub(start.unsigned_abs()))
    }
}

/// Draw a rectangle outline.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let thickness = thickness.max(1);
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;

    // Top edge
    fb.fill_rect(x, y, width, thickness, color);
    // Bottom edge
    if height > thickness {
        fb.fill_rect(x, y + height - thickness, width, thickness, color);
    }
    // Left edge
    if height > 2 * thickness {
        fb.fill_rect(x, y + thickness, thickness, height - 2 * thickness, color);
    }
    // Right edge
    if width > thickness && height > 2 * thickness {
        fb.fill_rect(x + width - thickness, y + thickness, thickness, height - 2 * thickness, color);
    }
}

// ============================================================================
// Circle Drawing
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `cx`, `cy` - Center coordinates
/// * `radius` - Circle radius in pixels
/// * `color` - Fill color
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.paint_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    // Scan lines are collected first so translucent colors are painted once per pixel
    let mut spans: Vec<(i32, i32)> = vec![(i32::MAX, i32::MIN); (2 * radius + 1) as usize];
    let mut widen = |dy: i32, half: i32| {
        let span = &mut spans[(dy + radius) as usize];
        span.0 = span.0.min(-half);
        span.1 = span.1.max(half);
    };

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        widen(y, x);
        widen(-y, x);
        widen(x, y);
        widen(-x, y);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }

    for (i, (lo, hi)) in spans.into_iter().enumerate() {
        if lo <= hi {
            draw_horizontal_line(fb, cx + lo, cx + hi, cy + i as i32 - radius, color);
        }
    }
}

/// Draw a filled triangle pointing up, centered on `(cx, cy)`.
pub fn draw_triangle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        draw_circle(fb, cx, cy, radius, color);
        return;
    }

    let top = cy - radius;
    let height = 2 * radius;
    for row in 0..=height {
        // Half-width grows linearly from the apex to the base
        let half = (row * radius) / height;
        draw_horizontal_line(fb, cx - half, cx + half, top + row, color);
    }
}

/// Draw an `x` cross of the given half-size.
pub fn draw_cross(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    let r = radius.max(1);
    draw_line(fb, cx - r, cy - r, cx + r, cy + r, color);
    draw_line(fb, cx - r, cy + r, cx + r, cy - r, color);
}

/// Helper to draw a horizontal line (used by filled shapes).
#[inline]
fn draw_horizontal_line(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }

    let x_start = x1.max(0);
    let x_end = (x2 + 1).min(fb.width() as i32);

    if color.a == 255 {
        if x_start < x_end {
            fb.fill_rect(x_start as u32, y as u32, (x_end - x_start) as u32, 1, color);
        }
    } else {
        for x in x_start..x_end {
            fb.blend_pixel(x as u32, y as u32, color);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Framebuffer {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = canvas();
        draw_line(&mut fb, 10, 50, 90, 50, Rgba::BLACK);

        assert_eq!(fb.get_pixel(10, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut fb = canvas();
        draw_line(&mut fb, 10, 10, 90, 90, Rgba::BLACK);

        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 90), Some(Rgba::BLACK));
    }

    #[test]
    fn test_line_out_of_bounds() {
        let mut fb = canvas();
        // Line that goes out of bounds should not panic
        draw_line(&mut fb, -10, -10, 110, 110, Rgba::BLACK);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_rect() {
        let mut fb = canvas();
        draw_rect(&mut fb, 20, 20, 30, 30, Rgba::PAD_RED);

        assert_eq!(fb.get_pixel(25, 25), Some(Rgba::PAD_RED));
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_rect_clips_negative_origin() {
        let mut fb = canvas();
        draw_rect(&mut fb, -5, -5, 10, 10, Rgba::PAD_RED);
        assert_eq!(fb.count_color(Rgba::PAD_RED), 25);
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut fb = canvas();
        draw_rect_outline(&mut fb, 20, 20, 30, 30, Rgba::PAD_RED, 2);

        assert_eq!(fb.get_pixel(20, 20), Some(Rgba::PAD_RED));
        assert_eq!(fb.get_pixel(35, 35), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_circle() {
        let mut fb = canvas();
        draw_circle(&mut fb, 50, 50, 20, Rgba::CELL_BLUE);

        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::CELL_BLUE));
        assert_eq!(fb.get_pixel(70, 50), Some(Rgba::CELL_BLUE));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_circle_zero_radius() {
        let mut fb = canvas();
        draw_circle(&mut fb, 50, 50, 0, Rgba::PAD_RED);

        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::PAD_RED));
        assert_eq!(fb.count_color(Rgba::PAD_RED), 1);
    }

    #[test]
    fn test_translucent_circle_blends_once() {
        let mut fb = canvas();
        let translucent = Rgba::new(0, 0, 0, 128);
        draw_circle(&mut fb, 50, 50, 5, translucent);

        // Every covered pixel gets the same single blend
        let center = fb.get_pixel(50, 50).unwrap();
        assert_eq!(fb.get_pixel(54, 50), Some(center));
        assert_eq!(fb.get_pixel(50, 46), Some(center));
    }

    #[test]
    fn test_draw_triangle() {
        let mut fb = canvas();
        draw_triangle(&mut fb, 50, 50, 10, Rgba::rgb(44, 160, 44));

        assert_eq!(fb.get_pixel(50, 40), Some(Rgba::rgb(44, 160, 44)));
        assert_eq!(fb.get_pixel(41, 60), Some(Rgba::rgb(44, 160, 44)));
        assert_eq!(fb.get_pixel(41, 41), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_cross() {
        let mut fb = canvas();
        draw_cross(&mut fb, 50, 50, 4, Rgba::BLACK);

        assert_eq!(fb.get_pixel(46, 46), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(54, 46), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 46), Some(Rgba::WHITE));
    }
}
