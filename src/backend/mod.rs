//! Backend seams - the collaborators the core draws and loads through.
//!
//! The registries never talk to a window, a decoder or a font rasterizer
//! directly. They go through these traits:
//!
//! - [`RenderContext`] - immediate-mode drawing plus texture creation
//! - [`ImageDecoder`] - image file to [`Surface`]
//! - [`FontEngine`] - open fonts, rasterize and measure UTF-8 text
//! - [`Clock`] - monotonic milliseconds for cursor blinking
//! - [`TextCapture`] - start/stop text composition around focus changes
//!
//! Provided implementations:
//!
//! - [`Canvas`] - software RGBA framebuffer
//! - [`ImageFiles`] - decoder over the `image` crate
//! - [`GlyphFonts`] - font engine over `ab_glyph`
//! - [`SystemClock`] / [`ManualClock`]

mod canvas;
mod clock;
mod font;
mod image_files;

pub use canvas::*;
pub use clock::*;
pub use font::*;
pub use image_files::*;

use std::path::Path;

use crate::error::Result;
use crate::types::{Color, Rect, Surface};

// =============================================================================
// Render Context
// =============================================================================

/// Immediate-mode 2D drawing surface.
///
/// Primitive draws use the current draw color set by
/// [`set_draw_color`](RenderContext::set_draw_color) and alpha-blend over
/// what is already there.
pub trait RenderContext {
    /// Renderer-bound texture. Dropping it releases the texture.
    type Texture;

    /// Fill the whole target with an opaque color.
    fn clear(&mut self, color: Color);

    fn set_draw_color(&mut self, color: Color);

    /// Filled rectangle.
    fn fill_rect(&mut self, rect: Rect);

    /// 1px rectangle outline.
    fn draw_rect(&mut self, rect: Rect);

    /// Line between two points, both endpoints included.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    fn draw_point(&mut self, x: i32, y: i32);

    /// Upload decoded pixels as a texture.
    fn create_texture(&mut self, surface: &Surface) -> Result<Self::Texture>;

    /// Copy `src` (whole texture when `None`) of a texture to `dst`,
    /// stretching as needed.
    fn copy(&mut self, texture: &Self::Texture, src: Option<Rect>, dst: Rect);

    /// Finish the frame.
    fn present(&mut self);
}

// =============================================================================
// Asset collaborators
// =============================================================================

/// Image file decoding.
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<Surface>;
}

/// Font opening, text rasterization and measurement.
pub trait FontEngine {
    /// An open font at a fixed pixel size. Dropping it closes the font.
    type Font;

    fn open(&self, path: &Path, size: u32) -> Result<Self::Font>;

    /// Rasterize a UTF-8 string. `None` when there is nothing to draw.
    fn render_text(&self, font: &Self::Font, text: &str, color: Color) -> Option<Surface>;

    /// Width and height the string would occupy when rendered.
    fn measure_text(&self, font: &Self::Font, text: &str) -> (u32, u32);
}

// =============================================================================
// Input environment
// =============================================================================

/// Monotonic time source, in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Text composition (IME / printable text) on and off.
///
/// Bracketing calls issued by the input system when a field gains focus or
/// all fields lose it.
pub trait TextCapture {
    fn begin_capture(&mut self);
    fn end_capture(&mut self);
}

/// Everything the input system needs from its environment.
pub trait InputHost: Clock + TextCapture {}

impl<H: Clock + TextCapture + ?Sized> InputHost for H {}

/// Render a string through a font engine into a fresh texture.
///
/// Returns the texture and its size, or `None` if the engine produced
/// nothing or the upload failed.
pub(crate) fn text_texture<R, E>(
    ctx: &mut R,
    fonts: &E,
    font: &E::Font,
    text: &str,
    color: Color,
) -> Option<(R::Texture, u32, u32)>
where
    R: RenderContext,
    E: FontEngine,
{
    let surface = fonts.render_text(font, text, color)?;
    let (w, h) = (surface.width(), surface.height());
    match ctx.create_texture(&surface) {
        Ok(texture) => Some((texture, w, h)),
        Err(e) => {
            tracing::debug!("text texture upload failed: {}", e);
            None
        }
    }
}
