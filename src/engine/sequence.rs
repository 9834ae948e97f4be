//! Rectangular screen element ("sequence").
//!
//! A sequence is a colored panel with an optional centered label, drop
//! shadow, stretched image, or text-input behavior. Each sequence owns its
//! font and image outright; replacing either drops the old one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::backend::{text_texture, FontEngine, ImageDecoder, RenderContext};
use crate::error::Result;
use crate::input::{draw_input_field, InputField};
use crate::types::{truncate_str, Color, Rect, MAX_NAME_LEN, MAX_TEXT_LEN};

/// Default drop-shadow offset, in pixels.
pub const DEFAULT_SHADOW_OFFSET: (i32, i32) = (2, 2);

/// Default drop-shadow color (translucent black).
pub const DEFAULT_SHADOW_COLOR: Color = Color::new(0, 0, 0, 180);

// =============================================================================
// Spec
// =============================================================================

/// Creation parameters for a [`Sequence`].
///
/// Also the on-disk shape of a rectangle entry in a layout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceSpec {
    pub id: i32,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub color: Color,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// Image stretched over the rect once the screen is built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
    /// Turns the sequence into a text-input field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputSpec>,
}

/// Input-field part of a [`SequenceSpec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    #[serde(default)]
    pub placeholder: String,
}

fn default_font_size() -> u32 {
    16
}

impl SequenceSpec {
    pub fn new(id: i32, name: impl Into<String>, rect: Rect, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            color,
            text: String::new(),
            font_size: default_font_size(),
            image: None,
            input: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    pub fn with_input(mut self, placeholder: impl Into<String>) -> Self {
        self.input = Some(InputSpec {
            placeholder: placeholder.into(),
        });
        self
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// =============================================================================
// Sequence
// =============================================================================

/// A loaded image and the size it was decoded at.
#[derive(Debug)]
pub struct SequenceImage<T> {
    texture: T,
    width: u32,
    height: u32,
}

impl<T> SequenceImage<T> {
    #[inline]
    pub fn texture(&self) -> &T {
        &self.texture
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Rectangular screen element.
///
/// `T` is the render context's texture type, `F` the font engine's font type.
#[derive(Debug)]
pub struct Sequence<T, F> {
    id: i32,
    name: String,
    rect: Rect,
    color: Color,
    text: String,
    pub shadow_offset: (i32, i32),
    pub shadow_color: Color,
    pub text_color: Color,
    font: Option<F>,
    font_path: Option<PathBuf>,
    font_size: u32,
    visible: bool,
    image: Option<SequenceImage<T>>,
    pub(crate) input: Option<InputField>,
}

impl<T, F> Sequence<T, F> {
    pub(crate) fn from_spec(spec: &SequenceSpec) -> Self {
        Self {
            id: spec.id,
            name: truncate_str(&spec.name, MAX_NAME_LEN),
            rect: spec.rect(),
            color: spec.color,
            text: truncate_str(&spec.text, MAX_TEXT_LEN),
            shadow_offset: DEFAULT_SHADOW_OFFSET,
            shadow_color: DEFAULT_SHADOW_COLOR,
            text_color: Color::WHITE,
            font: None,
            font_path: None,
            font_size: spec.font_size,
            visible: true,
            image: None,
            input: None,
        }
    }

    #[inline]
    pub fn id(&self) -> i32 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn font(&self) -> Option<&F> {
        self.font.as_ref()
    }

    #[inline]
    pub fn font_path(&self) -> Option<&Path> {
        self.font_path.as_deref()
    }

    #[inline]
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    #[inline]
    pub fn image(&self) -> Option<&SequenceImage<T>> {
        self.image.as_ref()
    }

    /// Input-field state, if this sequence is an input field.
    #[inline]
    pub fn input(&self) -> Option<&InputField> {
        self.input.as_ref()
    }

    /// Name plus mutable input state, borrowed together.
    pub(crate) fn input_parts(&mut self) -> Option<(&str, &mut InputField)> {
        let field = self.input.as_mut()?;
        Some((&self.name, field))
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        self.input.is_some()
    }

    #[inline]
    pub fn is_focused(&self) -> bool {
        self.input.as_ref().is_some_and(|f| f.focused())
    }

    /// Replace the label, truncated to 255 bytes.
    pub fn set_text(&mut self, text: &str) {
        self.text = truncate_str(text, MAX_TEXT_LEN);
    }

    /// Move the top-left corner. Size is unchanged.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Turn this sequence into an empty input field.
    ///
    /// The cursor starts visible with its blink timer seeded to `now_ms`.
    /// A field that already has focus keeps it, so text capture stays in
    /// step with the focus state.
    pub fn enable_input(&mut self, placeholder: &str, now_ms: u64) {
        let mut field = InputField::new(placeholder, now_ms);
        field.focused = self.is_focused();
        self.input = Some(field);
        info!("Input enabled on sequence '{}'", self.name);
    }

    /// Open a font and make it this sequence's font.
    ///
    /// The previous font is dropped only once the new one is open, so a
    /// failure leaves font, path and size untouched.
    pub fn load_font<E>(&mut self, engine: &E, path: impl AsRef<Path>, size: u32) -> Result<()>
    where
        E: FontEngine<Font = F>,
    {
        let path = path.as_ref();
        let font = engine.open(path, size).inspect_err(|e| {
            warn!("Font load failed for sequence '{}': {}", self.name, e);
        })?;

        self.font = Some(font);
        self.font_path = Some(path.to_path_buf());
        self.font_size = size;
        info!(
            "Font loaded for sequence '{}': {} (size {})",
            self.name,
            path.display(),
            size
        );
        Ok(())
    }

    /// Decode an image and upload it as this sequence's texture.
    ///
    /// Replaces (and drops) any previous image. On failure the previous
    /// image stays in place.
    pub fn load_image<R, D>(&mut self, ctx: &mut R, decoder: &D, path: impl AsRef<Path>) -> Result<()>
    where
        R: RenderContext<Texture = T>,
        D: ImageDecoder,
    {
        let path = path.as_ref();
        info!("Loading image for sequence '{}': {}", self.name, path.display());

        let surface = decoder.decode(path).inspect_err(|e| warn!("{}", e))?;
        let texture = ctx.create_texture(&surface).inspect_err(|e| warn!("{}", e))?;

        self.image = Some(SequenceImage {
            texture,
            width: surface.width(),
            height: surface.height(),
        });
        info!(
            "Image loaded for sequence '{}' ({}x{})",
            self.name,
            surface.width(),
            surface.height()
        );
        Ok(())
    }

    /// Draw this sequence if visible.
    ///
    /// Input fields use their own look. Everything else is a filled rect, a
    /// border in [`Color::darker`] of the fill, the image stretched over the
    /// rect, then the label: shadow pass first, main pass on top.
    pub fn draw<R, E>(&self, ctx: &mut R, fonts: &E)
    where
        R: RenderContext<Texture = T>,
        E: FontEngine<Font = F>,
    {
        if !self.visible {
            return;
        }
        if let Some(field) = &self.input {
            draw_input_field(self, field, ctx, fonts);
            return;
        }

        ctx.set_draw_color(self.color);
        ctx.fill_rect(self.rect);
        ctx.set_draw_color(self.color.darker());
        ctx.draw_rect(self.rect);

        if let Some(image) = &self.image {
            ctx.copy(&image.texture, None, self.rect);
        }

        self.draw_label(ctx, fonts);
    }

    fn draw_label<R, E>(&self, ctx: &mut R, fonts: &E)
    where
        R: RenderContext<Texture = T>,
        E: FontEngine<Font = F>,
    {
        let Some(font) = &self.font else {
            return;
        };
        if self.text.is_empty() {
            return;
        }

        let passes = [
            (self.shadow_color, self.shadow_offset),
            (self.text_color, (0, 0)),
        ];
        for (color, (dx, dy)) in passes {
            let Some((texture, w, h)) = text_texture(ctx, fonts, font, &self.text, color) else {
                continue;
            };
            let (w, h) = (w as i32, h as i32);
            let dst = Rect::new(
                self.rect.x + (self.rect.w - w) / 2 + dx,
                self.rect.y + (self.rect.h - h) / 2 + dy,
                w,
                h,
            );
            ctx.copy(&texture, None, dst);
        }
    }
}
