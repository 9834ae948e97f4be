//! Software canvas - an RGBA framebuffer implementing [`RenderContext`].
//!
//! # Design Decisions
//!
//! - **Flat storage**: `Vec<Color>` with row-major indexing (`y * width + x`).
//! - **Clipping**: every primitive is clipped to the canvas bounds.
//! - **Alpha blending**: all draws are source-over blended.
//! - **Textures**: a texture is just an owned [`Surface`]; copies use
//!   nearest-neighbor scaling.

use super::RenderContext;
use crate::error::{Result, SequenceError};
use crate::types::{Color, Rect, Surface};

/// Largest texture edge accepted by [`Canvas::create_texture`].
pub const MAX_TEXTURE_SIZE: u32 = 16384;

/// A 2D buffer of RGBA pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    draw_color: Color,
    frames: u64,
}

impl Canvas {
    /// Create a new canvas filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
            draw_color: Color::WHITE,
            frames: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of frames presented so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Pixel at (x, y), or `None` out of bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.index(x as u32, y as u32)])
        } else {
            None
        }
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Blend a color over one pixel.
    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        self.pixels[idx] = Color::blend(color, self.pixels[idx]);
    }

    /// Clip a rect to the canvas. Returns (x1, y1, x2, y2) exclusive.
    fn clip(&self, rect: Rect) -> Option<(i32, i32, i32, i32)> {
        let x1 = rect.x.max(0);
        let y1 = rect.y.max(0);
        let x2 = rect.x.saturating_add(rect.w).min(self.width as i32);
        let y2 = rect.y.saturating_add(rect.h).min(self.height as i32);
        if x2 <= x1 || y2 <= y1 {
            None
        } else {
            Some((x1, y1, x2, y2))
        }
    }
}

impl RenderContext for Canvas {
    type Texture = Surface;

    fn clear(&mut self, color: Color) {
        let color = color.with_alpha(255);
        for px in &mut self.pixels {
            *px = color;
        }
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn fill_rect(&mut self, rect: Rect) {
        let Some((x1, y1, x2, y2)) = self.clip(rect) else {
            return;
        };
        let color = self.draw_color;

        // Fast path for opaque fill
        if color.is_opaque() {
            for row in y1..y2 {
                let start = self.index(x1 as u32, row as u32);
                let end = self.index(x2 as u32, row as u32);
                self.pixels[start..end].fill(color);
            }
            return;
        }
        if color.is_transparent() {
            return;
        }

        for row in y1..y2 {
            for col in x1..x2 {
                self.plot(col, row, color);
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let x2 = rect.x + rect.w - 1;
        let y2 = rect.y + rect.h - 1;
        let color = self.draw_color;

        for col in rect.x..=x2 {
            self.plot(col, rect.y, color);
            if y2 != rect.y {
                self.plot(col, y2, color);
            }
        }
        for row in (rect.y + 1)..y2 {
            self.plot(rect.x, row, color);
            if x2 != rect.x {
                self.plot(x2, row, color);
            }
        }
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let color = self.draw_color;

        // Bresenham, all octants
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.plot(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.plot(x, y, self.draw_color);
    }

    fn create_texture(&mut self, surface: &Surface) -> Result<Surface> {
        if surface.is_empty() {
            return Err(SequenceError::UploadFailed("surface has no pixels".into()));
        }
        if surface.width() > MAX_TEXTURE_SIZE || surface.height() > MAX_TEXTURE_SIZE {
            return Err(SequenceError::UploadFailed(format!(
                "texture {}x{} exceeds {}px",
                surface.width(),
                surface.height(),
                MAX_TEXTURE_SIZE
            )));
        }
        Ok(surface.clone())
    }

    fn copy(&mut self, texture: &Surface, src: Option<Rect>, dst: Rect) {
        let src = src.unwrap_or(Rect::new(0, 0, texture.width() as i32, texture.height() as i32));
        if src.is_empty() || dst.is_empty() {
            return;
        }
        let Some((x1, y1, x2, y2)) = self.clip(dst) else {
            return;
        };

        for row in y1..y2 {
            let sy = src.y + (row - dst.y) * src.h / dst.h;
            for col in x1..x2 {
                let sx = src.x + (col - dst.x) * src.w / dst.w;
                if sx < 0 || sy < 0 {
                    continue;
                }
                if let Some(color) = texture.get(sx as u32, sy as u32) {
                    self.plot(col, row, color);
                }
            }
        }
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}
