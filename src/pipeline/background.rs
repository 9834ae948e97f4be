//! Full-screen background image.

use std::path::Path;

use tracing::{info, warn};

use crate::backend::{ImageDecoder, RenderContext};
use crate::error::Result;
use crate::types::Rect;

/// A background texture drawn at its decoded size from the origin.
#[derive(Debug)]
pub struct Background<T> {
    texture: T,
    width: u32,
    height: u32,
}

impl<T> Background<T> {
    /// Decode and upload a background image.
    pub fn load<R, D>(ctx: &mut R, decoder: &D, path: impl AsRef<Path>) -> Result<Self>
    where
        R: RenderContext<Texture = T>,
        D: ImageDecoder,
    {
        let path = path.as_ref();
        info!("Loading background image: {}", path.display());

        let surface = decoder.decode(path).inspect_err(|e| warn!("{}", e))?;
        let texture = ctx.create_texture(&surface).inspect_err(|e| warn!("{}", e))?;

        info!("Background image size: {}x{}", surface.width(), surface.height());
        Ok(Self {
            texture,
            width: surface.width(),
            height: surface.height(),
        })
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Where the background lands on screen.
    #[inline]
    pub fn dest_rect(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn draw<R>(&self, ctx: &mut R)
    where
        R: RenderContext<Texture = T>,
    {
        ctx.copy(&self.texture, None, self.dest_rect());
    }
}
