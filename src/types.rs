//! Core types for sequence-screen.
//!
//! Plain value types shared by the registries, the input system and every
//! render backend. They carry no behavior beyond small arithmetic helpers.

use serde::{Deserialize, Serialize};

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
/// Serialized as a `[r, g, b, a]` array in layout files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Transparent color.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Check if color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Check if color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Border shade derived from a fill color: each RGB channel halved,
    /// alpha forced opaque.
    #[inline]
    pub const fn darker(&self) -> Self {
        Self::new(self.r / 2, self.g / 2, self.b / 2, 255)
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Alpha blend src over dst (Porter-Duff "over" operation).
    #[inline]
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_opaque() {
            return src;
        }
        if src.is_transparent() {
            return dst;
        }

        let sa = src.a as i32;
        let da = dst.a as i32;
        let inv_sa = 255 - sa;

        // out_a = src_a + dst_a * (1 - src_a)
        let out_a = sa + (da * inv_sa) / 255;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }

        // out_rgb = (src_rgb * src_a + dst_rgb * dst_a * (1 - src_a)) / out_a
        let channel = |s: u8, d: u8| -> u8 {
            let v = (s as i32 * sa + d as i32 * da * inv_sa / 255) / out_a;
            v.clamp(0, 255) as u8
        };

        Self {
            r: channel(src.r, dst.r),
            g: channel(src.g, dst.g),
            b: channel(src.b, dst.b),
            a: out_a.clamp(0, 255) as u8,
        }
    }

    /// Scale alpha by a coverage factor in `0.0..=1.0` (glyph antialiasing).
    #[inline]
    pub fn with_coverage(self, coverage: f32) -> Self {
        let a = (self.a as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(a)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

// =============================================================================
// Rect
// =============================================================================

/// Integer rectangle: top-left corner plus size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive hit test: points on the right and bottom edges
    /// (`x + w`, `y + h`) count as inside.
    #[inline]
    pub const fn contains_inclusive(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && px <= self.x.saturating_add(self.w)
            && py >= self.y
            && py <= self.y.saturating_add(self.h)
    }

    /// Rect shrunk by `n` pixels on every side.
    #[inline]
    pub const fn inset(&self, n: i32) -> Self {
        Self::new(self.x + n, self.y + n, self.w - 2 * n, self.h - 2 * n)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

// =============================================================================
// Surface
// =============================================================================

/// Decoded RGBA pixel data in row-major order.
///
/// Produced by image decoders and font engines, handed to the render
/// context for texture creation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Surface {
    /// Create a surface filled with a single color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels. Returns `None` when the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Alpha-blend a color over the pixel at (x, y). Out of bounds is ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = Color::blend(color, self.pixels[idx]);
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

// =============================================================================
// Text limits
// =============================================================================

/// Longest sequence name kept, in bytes.
pub const MAX_NAME_LEN: usize = 63;

/// Longest text content kept, in bytes.
pub const MAX_TEXT_LEN: usize = 255;

/// Longest placeholder kept, in bytes.
pub const MAX_PLACEHOLDER_LEN: usize = 127;

/// Truncate to at most `max` bytes without splitting a character.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}
