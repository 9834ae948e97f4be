//! Font engine over `ab_glyph`.
//!
//! Fonts are loaded from TrueType/OpenType files and rasterized on the CPU
//! into RGBA surfaces, one glyph run per call. Glyph coverage becomes the
//! alpha of the requested color.

use std::path::Path;

use ab_glyph::{point, Font, FontArc, FontVec, GlyphId, PxScale, ScaleFont};

use super::FontEngine;
use crate::error::{Result, SequenceError};
use crate::types::{Color, Surface};

/// An open font at a fixed pixel size.
#[derive(Clone)]
pub struct GlyphFont {
    font: FontArc,
    size: u32,
}

impl GlyphFont {
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    fn scale(&self) -> PxScale {
        PxScale::from(self.size as f32)
    }
}

impl std::fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFont").field("size", &self.size).finish()
    }
}

/// Loads fonts from disk and renders text with `ab_glyph`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlyphFonts;

impl GlyphFonts {
    /// Horizontal pen positions for every char, plus the total advance.
    fn layout(font: &GlyphFont, text: &str) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = font.font.as_scaled(font.scale());
        let mut caret = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                caret += scaled.kern(prev, id);
            }
            glyphs.push((id, caret));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }

        (glyphs, caret)
    }
}

impl FontEngine for GlyphFonts {
    type Font = GlyphFont;

    fn open(&self, path: &Path, size: u32) -> Result<GlyphFont> {
        let fail = |reason: String| SequenceError::FontLoadFailed {
            path: path.to_path_buf(),
            reason,
        };
        if size == 0 {
            return Err(fail("font size must be positive".into()));
        }
        let bytes = std::fs::read(path).map_err(|e| fail(e.to_string()))?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| fail(e.to_string()))?;
        Ok(GlyphFont {
            font: FontArc::new(font),
            size,
        })
    }

    fn render_text(&self, font: &GlyphFont, text: &str, color: Color) -> Option<Surface> {
        if text.is_empty() {
            return None;
        }
        let (width, height) = self.measure_text(font, text);
        if width == 0 || height == 0 {
            return None;
        }

        let scaled = font.font.as_scaled(font.scale());
        let ascent = scaled.ascent();
        let (glyphs, _) = Self::layout(font, text);
        let mut surface = Surface::new(width, height, Color::TRANSPARENT);

        for (id, x) in glyphs {
            let glyph = id.with_scale_and_position(font.scale(), point(x, ascent));
            let Some(outlined) = font.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                surface.blend_pixel(px, py, color.with_coverage(coverage));
            });
        }

        Some(surface)
    }

    fn measure_text(&self, font: &GlyphFont, text: &str) -> (u32, u32) {
        let scaled = font.font.as_scaled(font.scale());
        let (_, advance) = Self::layout(font, text);
        (advance.ceil().max(0.0) as u32, scaled.height().ceil().max(0.0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_font_fails() {
        let err = GlyphFonts.open(Path::new("/no/such/font.ttf"), 16).unwrap_err();
        assert!(matches!(err, SequenceError::FontLoadFailed { .. }));
    }

    #[test]
    fn test_open_invalid_font_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        assert!(GlyphFonts.open(&path, 16).is_err());
    }

    #[test]
    fn test_open_zero_size_fails() {
        let err = GlyphFonts.open(Path::new("/whatever.ttf"), 0).unwrap_err();
        assert!(err.to_string().contains("size"));
    }
}
