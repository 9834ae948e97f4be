//! Circle rasterization on top of [`RenderContext`] primitives.
//!
//! Both routines draw with whatever color the context currently holds.

use crate::backend::RenderContext;

/// Filled disk: every pixel `(cx + dx, cy + dy)` with `dx² + dy² <= r²`.
///
/// Emitted as one horizontal span per row.
pub fn fill_circle<R: RenderContext>(ctx: &mut R, cx: i32, cy: i32, radius: i32) {
    if radius < 0 {
        return;
    }
    let r2 = radius as i64 * radius as i64;
    for dy in -radius..=radius {
        let half = (r2 - dy as i64 * dy as i64).isqrt() as i32;
        ctx.draw_line(cx - half, cy + dy, cx + half, cy + dy);
    }
}

/// Ring outline: `thickness` midpoint circles of radius `r, r - 1, ...`.
///
/// Each ring is plotted on its own, 8-way symmetric, with no de-duplication
/// of shared points. Rings whose radius falls below zero are skipped.
pub fn draw_circle_outline<R: RenderContext>(
    ctx: &mut R,
    cx: i32,
    cy: i32,
    radius: i32,
    thickness: i32,
) {
    for t in 0..thickness.max(0) {
        let r = radius - t;
        if r < 0 {
            break;
        }
        let mut x = r;
        let mut y = 0;
        let mut err = 0;

        while x >= y {
            ctx.draw_point(cx + x, cy + y);
            ctx.draw_point(cx + y, cy + x);
            ctx.draw_point(cx - y, cy + x);
            ctx.draw_point(cx - x, cy + y);
            ctx.draw_point(cx - x, cy - y);
            ctx.draw_point(cx - y, cy - x);
            ctx.draw_point(cx + y, cy - x);
            ctx.draw_point(cx + x, cy - y);

            if err <= 0 {
                y += 1;
                err += 2 * y + 1;
            }
            if err > 0 {
                x -= 1;
                err -= 2 * x + 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Canvas;
    use crate::types::Color;

    fn lit(c: &Canvas) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..c.height() as i32 {
            for x in 0..c.width() as i32 {
                if c.pixel(x, y) == Some(Color::WHITE) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_fill_circle_matches_euclidean_test() {
        let mut c = Canvas::new(21, 21);
        c.set_draw_color(Color::WHITE);
        fill_circle(&mut c, 10, 10, 6);

        for y in 0..21 {
            for x in 0..21 {
                let (dx, dy) = (x - 10, y - 10);
                let inside = dx * dx + dy * dy <= 36;
                assert_eq!(c.pixel(x, y) == Some(Color::WHITE), inside, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_fill_circle_zero_radius_is_single_point() {
        let mut c = Canvas::new(3, 3);
        c.set_draw_color(Color::WHITE);
        fill_circle(&mut c, 1, 1, 0);
        assert_eq!(lit(&c), vec![(1, 1)]);
    }

    #[test]
    fn test_outline_leaves_center_empty() {
        let mut c = Canvas::new(21, 21);
        c.set_draw_color(Color::WHITE);
        draw_circle_outline(&mut c, 10, 10, 8, 3);

        assert_eq!(c.pixel(10, 10), Some(Color::BLACK));
        assert_eq!(c.pixel(18, 10), Some(Color::WHITE));
        assert_eq!(c.pixel(17, 10), Some(Color::WHITE));
        assert_eq!(c.pixel(16, 10), Some(Color::WHITE));
        assert_eq!(c.pixel(15, 10), Some(Color::BLACK));
        assert_eq!(c.pixel(10, 2), Some(Color::WHITE));
    }

    #[test]
    fn test_outline_thickness_past_radius_stops() {
        let mut c = Canvas::new(5, 5);
        c.set_draw_color(Color::WHITE);
        draw_circle_outline(&mut c, 2, 2, 1, 10);
        // radius 1 ring plus radius 0 ring (the center)
        assert_eq!(c.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(c.pixel(3, 2), Some(Color::WHITE));
        assert_eq!(c.pixel(4, 2), Some(Color::BLACK));
    }
}
