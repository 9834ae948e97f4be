//! Round sequences - circular screen elements and their registry.
//!
//! Same create/lookup/update contract as the rectangular registry, without
//! images or input fields. A round sequence is a filled disk or a ring,
//! optionally with a label centered on its middle (no shadow).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::raster::{draw_circle_outline, fill_circle};
use crate::backend::{text_texture, FontEngine, RenderContext};
use crate::error::{EntityKind, Result, SequenceError};
use crate::types::{truncate_str, Color, Rect, MAX_NAME_LEN, MAX_TEXT_LEN};

/// Most round sequences a registry will hold.
pub const MAX_ROUND_SEQUENCES: usize = 50;

/// Ring thickness used when a round sequence is not filled.
pub const DEFAULT_OUTLINE_THICKNESS: i32 = 3;

// =============================================================================
// Spec
// =============================================================================

/// Creation parameters for a [`RoundSequence`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSpec {
    pub id: i32,
    pub name: String,
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
    pub color: Color,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_filled")]
    pub filled: bool,
}

fn default_font_size() -> u32 {
    16
}

fn default_filled() -> bool {
    true
}

impl RoundSpec {
    pub fn new(id: i32, name: impl Into<String>, center: (i32, i32), radius: i32, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            center_x: center.0,
            center_y: center.1,
            radius,
            color,
            text: String::new(),
            font_size: default_font_size(),
            filled: true,
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

    pub fn outline(mut self) -> Self {
        self.filled = false;
        self
    }
}

// =============================================================================
// Round Sequence
// =============================================================================

#[derive(Debug)]
pub struct RoundSequence<F> {
    id: i32,
    name: String,
    center: (i32, i32),
    radius: i32,
    color: Color,
    text: String,
    pub text_color: Color,
    font: Option<F>,
    font_size: u32,
    visible: bool,
    pub filled: bool,
    pub outline_thickness: i32,
}

impl<F> RoundSequence<F> {
    fn from_spec(spec: &RoundSpec) -> Self {
        Self {
            id: spec.id,
            name: truncate_str(&spec.name, MAX_NAME_LEN),
            center: (spec.center_x, spec.center_y),
            radius: spec.radius.max(0),
            color: spec.color,
            text: truncate_str(&spec.text, MAX_TEXT_LEN),
            text_color: Color::WHITE,
            font: None,
            font_size: spec.font_size,
            visible: true,
            filled: spec.filled,
            outline_thickness: DEFAULT_OUTLINE_THICKNESS,
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
    pub fn center(&self) -> (i32, i32) {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
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
    pub fn font(&self) -> Option<&F> {
        self.font.as_ref()
    }

    #[inline]
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = truncate_str(text, MAX_TEXT_LEN);
    }

    pub fn set_position(&mut self, center_x: i32, center_y: i32) {
        self.center = (center_x, center_y);
    }

    /// Negative radii clamp to zero.
    pub fn set_radius(&mut self, radius: i32) {
        self.radius = radius.max(0);
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Open a font for the label. A failure keeps the previous font.
    pub fn load_font<E>(&mut self, engine: &E, path: impl AsRef<Path>, size: u32) -> Result<()>
    where
        E: FontEngine<Font = F>,
    {
        let path = path.as_ref();
        let font = engine.open(path, size).inspect_err(|e| {
            warn!("Font load failed for round sequence '{}': {}", self.name, e);
        })?;
        self.font = Some(font);
        self.font_size = size;
        info!(
            "Font loaded for round sequence '{}': {} (size {})",
            self.name,
            path.display(),
            size
        );
        Ok(())
    }

    /// Draw the disk or ring, then the centered label.
    pub fn draw<R, E>(&self, ctx: &mut R, fonts: &E)
    where
        R: RenderContext,
        E: FontEngine<Font = F>,
    {
        if !self.visible {
            return;
        }

        let (cx, cy) = self.center;
        ctx.set_draw_color(self.color);
        if self.filled {
            fill_circle(ctx, cx, cy, self.radius);
        } else {
            draw_circle_outline(ctx, cx, cy, self.radius, self.outline_thickness);
        }

        let Some(font) = &self.font else {
            return;
        };
        if self.text.is_empty() {
            return;
        }
        if let Some((texture, w, h)) = text_texture(ctx, fonts, font, &self.text, self.text_color) {
            let (w, h) = (w as i32, h as i32);
            ctx.copy(&texture, None, Rect::new(cx - w / 2, cy - h / 2, w, h));
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Insertion-ordered collection of up to [`MAX_ROUND_SEQUENCES`] round
/// sequences.
#[derive(Debug)]
pub struct RoundRegistry<F> {
    entries: Vec<RoundSequence<F>>,
    by_id: HashMap<i32, usize>,
    by_name: HashMap<String, usize>,
}

impl<F> RoundRegistry<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_ROUND_SEQUENCES),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Reset to zero round sequences. Idempotent.
    pub fn init(&mut self) {
        self.entries.clear();
        self.by_id.clear();
        self.by_name.clear();
        info!("Round sequences system initialized");
    }

    pub fn create(&mut self, spec: &RoundSpec) -> Result<usize> {
        if self.entries.len() >= MAX_ROUND_SEQUENCES {
            warn!("Maximum round sequences limit reached ({})", MAX_ROUND_SEQUENCES);
            return Err(SequenceError::CapacityExceeded {
                kind: EntityKind::RoundSequence,
                limit: MAX_ROUND_SEQUENCES,
            });
        }
        if self.by_id.contains_key(&spec.id) {
            warn!("Round sequence with ID {} already exists", spec.id);
            return Err(SequenceError::DuplicateId {
                kind: EntityKind::RoundSequence,
                id: spec.id,
            });
        }

        let index = self.entries.len();
        let seq = RoundSequence::from_spec(spec);
        self.by_id.insert(seq.id, index);
        self.by_name.entry(seq.name.clone()).or_insert(index);
        info!(
            "Created round sequence: ID={}, Name='{}' at ({}, {}) radius={}",
            seq.id, seq.name, seq.center.0, seq.center.1, seq.radius
        );
        self.entries.push(seq);
        Ok(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&RoundSequence<F>> {
        self.entries.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut RoundSequence<F>> {
        self.entries.get_mut(index)
    }

    pub fn find_by_id(&self, id: i32) -> Option<&RoundSequence<F>> {
        let index = self.lookup_id(id)?;
        self.entries.get(index)
    }

    pub fn find_by_id_mut(&mut self, id: i32) -> Option<&mut RoundSequence<F>> {
        let index = self.lookup_id(id)?;
        self.entries.get_mut(index)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&RoundSequence<F>> {
        let index = self.lookup_name(name)?;
        self.entries.get(index)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut RoundSequence<F>> {
        let index = self.lookup_name(name)?;
        self.entries.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundSequence<F>> {
        self.entries.iter()
    }

    fn lookup_id(&self, id: i32) -> Option<usize> {
        let found = self.by_id.get(&id).copied();
        if found.is_none() {
            warn!("Round sequence with ID {} not found", id);
        }
        found
    }

    fn lookup_name(&self, name: &str) -> Option<usize> {
        let found = self.by_name.get(&truncate_str(name, MAX_NAME_LEN)).copied();
        if found.is_none() {
            warn!("Round sequence with name '{}' not found", name);
        }
        found
    }

    pub fn set_text(&mut self, id: i32, text: &str) -> bool {
        self.update(id, |s| s.set_text(text))
    }

    pub fn set_position(&mut self, id: i32, center_x: i32, center_y: i32) -> bool {
        self.update(id, |s| s.set_position(center_x, center_y))
    }

    pub fn set_radius(&mut self, id: i32, radius: i32) -> bool {
        self.update(id, |s| s.set_radius(radius))
    }

    pub fn set_color(&mut self, id: i32, color: Color) -> bool {
        self.update(id, |s| s.set_color(color))
    }

    pub fn set_visible(&mut self, id: i32, visible: bool) -> bool {
        self.update(id, |s| s.set_visible(visible))
    }

    fn update(&mut self, id: i32, apply: impl FnOnce(&mut RoundSequence<F>)) -> bool {
        match self.find_by_id_mut(id) {
            Some(seq) => {
                apply(seq);
                true
            }
            None => false,
        }
    }

    /// Load `path` into every round sequence with a label. Returns the
    /// number of successes.
    pub fn load_font_for_all<E>(&mut self, engine: &E, path: impl AsRef<Path>) -> usize
    where
        E: FontEngine<Font = F>,
    {
        let path = path.as_ref();
        let mut loaded = 0;
        for seq in self.entries.iter_mut().filter(|s| !s.text.is_empty()) {
            let size = seq.font_size;
            if seq.load_font(engine, path, size).is_ok() {
                loaded += 1;
            }
        }
        info!("Font loaded for {} round sequences", loaded);
        loaded
    }

    pub fn draw_all<R, E>(&self, ctx: &mut R, fonts: &E)
    where
        R: RenderContext,
        E: FontEngine<Font = F>,
    {
        for seq in &self.entries {
            seq.draw(ctx, fonts);
        }
    }

    /// Drop every font, then reset to empty.
    pub fn teardown(&mut self) {
        let count = self.entries.len();
        self.init();
        info!("Round sequences cleaned up ({} released)", count);
    }
}

impl<F> Default for RoundRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}
