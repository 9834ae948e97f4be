//! Image decoding over the `image` crate.

use std::path::Path;

use super::ImageDecoder;
use crate::error::{Result, SequenceError};
use crate::types::{Color, Surface};

/// Decodes PNG and JPEG files from disk into RGBA surfaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFiles;

impl ImageDecoder for ImageFiles {
    fn decode(&self, path: &Path) -> Result<Surface> {
        let img = image::open(path).map_err(|e| SequenceError::DecodeFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| Color::new(p[0], p[1], p[2], p[3]))
            .collect();

        Surface::from_pixels(width, height, pixels).ok_or_else(|| SequenceError::DecodeFailed {
            path: path.to_path_buf(),
            reason: "pixel buffer size mismatch".into(),
        })
    }
}
