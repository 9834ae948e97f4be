//! Sequence Registry - fixed-capacity store of rectangular elements.
//!
//! Manages:
//! - Insertion-ordered storage (insertion order is draw order)
//! - ID → index lookup (unique, enforced at creation)
//! - Name → index lookup (first match wins)
//! - Bulk font loading, drawing and teardown
//!
//! Input-field operations (focus, blink, event routing) live in
//! [`crate::input`] as further `impl` blocks on [`SequenceRegistry`].

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use super::sequence::{Sequence, SequenceSpec};
use crate::backend::{FontEngine, RenderContext};
use crate::error::{EntityKind, Result, SequenceError};
use crate::input::{EditUnit, CURSOR_BLINK_MS};
use crate::types::{truncate_str, Color, MAX_NAME_LEN};

/// Most sequences a registry will hold.
pub const MAX_SEQUENCES: usize = 100;

// =============================================================================
// Registry
// =============================================================================

/// Insertion-ordered collection of up to [`MAX_SEQUENCES`] sequences.
#[derive(Debug)]
pub struct SequenceRegistry<T, F> {
    pub(crate) entries: Vec<Sequence<T, F>>,
    by_id: HashMap<i32, usize>,
    by_name: HashMap<String, usize>,
    pub(crate) blink_interval_ms: u64,
    pub(crate) edit_unit: EditUnit,
}

impl<T, F> SequenceRegistry<T, F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_SEQUENCES),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
            blink_interval_ms: CURSOR_BLINK_MS,
            edit_unit: EditUnit::default(),
        }
    }

    /// Reset to zero sequences. Idempotent.
    pub fn init(&mut self) {
        self.entries.clear();
        self.by_id.clear();
        self.by_name.clear();
        info!("Sequences system initialized");
    }

    /// Create a sequence from `spec` and return its index.
    ///
    /// Fails without side effects on a duplicate id or a full registry.
    /// Only the geometry, color, label and font size of `spec` are used;
    /// images and input fields are attached afterwards.
    pub fn create(&mut self, spec: &SequenceSpec) -> Result<usize> {
        if self.entries.len() >= MAX_SEQUENCES {
            warn!("Maximum sequences limit reached ({})", MAX_SEQUENCES);
            return Err(SequenceError::CapacityExceeded {
                kind: EntityKind::Sequence,
                limit: MAX_SEQUENCES,
            });
        }
        if self.by_id.contains_key(&spec.id) {
            warn!("Sequence with ID {} already exists", spec.id);
            return Err(SequenceError::DuplicateId {
                kind: EntityKind::Sequence,
                id: spec.id,
            });
        }

        let index = self.entries.len();
        let seq = Sequence::from_spec(spec);
        self.by_id.insert(seq.id(), index);
        self.by_name.entry(seq.name().to_string()).or_insert(index);

        let r = seq.rect();
        info!(
            "Created sequence: ID={}, Name='{}' at ({}, {}) size {}x{}",
            seq.id(),
            seq.name(),
            r.x,
            r.y,
            r.w,
            r.h
        );
        self.entries.push(seq);
        Ok(index)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sequence at an index returned by [`create`](Self::create).
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Sequence<T, F>> {
        self.entries.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Sequence<T, F>> {
        self.entries.get_mut(index)
    }

    /// Index of the sequence with this id. Silent on a miss.
    #[inline]
    pub fn index_of(&self, id: i32) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn find_by_id(&self, id: i32) -> Option<&Sequence<T, F>> {
        let index = self.lookup_id(id)?;
        self.entries.get(index)
    }

    pub fn find_by_id_mut(&mut self, id: i32) -> Option<&mut Sequence<T, F>> {
        let index = self.lookup_id(id)?;
        self.entries.get_mut(index)
    }

    /// First sequence created with this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Sequence<T, F>> {
        let index = self.lookup_name(name)?;
        self.entries.get(index)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Sequence<T, F>> {
        let index = self.lookup_name(name)?;
        self.entries.get_mut(index)
    }

    /// Like [`find_by_id`](Self::find_by_id), as a `Result`.
    pub fn require(&self, id: i32) -> Result<&Sequence<T, F>> {
        self.find_by_id(id)
            .ok_or_else(|| SequenceError::not_found(EntityKind::Sequence, id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sequence<T, F>> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Sequence<T, F>> {
        self.entries.iter_mut()
    }

    fn lookup_id(&self, id: i32) -> Option<usize> {
        let found = self.index_of(id);
        if found.is_none() {
            warn!("Sequence with ID {} not found", id);
        }
        found
    }

    fn lookup_name(&self, name: &str) -> Option<usize> {
        // Names are stored truncated, so look up the same way
        let key = truncate_str(name, MAX_NAME_LEN);
        let found = self.by_name.get(&key).copied();
        if found.is_none() {
            warn!("Sequence with name '{}' not found", name);
        }
        found
    }

    // =========================================================================
    // Id-keyed updates (false when the id is absent)
    // =========================================================================

    pub fn set_text(&mut self, id: i32, text: &str) -> bool {
        self.update(id, |s| s.set_text(text))
    }

    pub fn set_position(&mut self, id: i32, x: i32, y: i32) -> bool {
        self.update(id, |s| s.set_position(x, y))
    }

    pub fn set_color(&mut self, id: i32, color: Color) -> bool {
        self.update(id, |s| s.set_color(color))
    }

    pub fn set_visible(&mut self, id: i32, visible: bool) -> bool {
        self.update(id, |s| s.set_visible(visible))
    }

    fn update(&mut self, id: i32, apply: impl FnOnce(&mut Sequence<T, F>)) -> bool {
        match self.find_by_id_mut(id) {
            Some(seq) => {
                apply(seq);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Bulk operations
    // =========================================================================

    /// Load `path` into every sequence that has a label, each at its own
    /// font size. Returns how many loads succeeded.
    pub fn load_font_for_all<E>(&mut self, engine: &E, path: impl AsRef<Path>) -> usize
    where
        E: FontEngine<Font = F>,
    {
        let path = path.as_ref();
        let mut loaded = 0;
        for seq in self.entries.iter_mut().filter(|s| !s.text().is_empty()) {
            let size = seq.font_size();
            if seq.load_font(engine, path, size).is_ok() {
                loaded += 1;
            }
        }
        info!("Font loaded for {} sequences", loaded);
        loaded
    }

    /// Draw every visible sequence in insertion order.
    pub fn draw_all<R, E>(&self, ctx: &mut R, fonts: &E)
    where
        R: RenderContext<Texture = T>,
        E: FontEngine<Font = F>,
    {
        for seq in &self.entries {
            seq.draw(ctx, fonts);
        }
    }

    /// Drop every font and image, then reset to empty.
    pub fn teardown(&mut self) {
        let count = self.entries.len();
        self.init();
        info!("Sequences cleaned up ({} released)", count);
    }

    // =========================================================================
    // Input settings
    // =========================================================================

    /// Cursor blink half-period, in milliseconds.
    #[inline]
    pub fn blink_interval_ms(&self) -> u64 {
        self.blink_interval_ms
    }

    pub fn set_blink_interval_ms(&mut self, ms: u64) {
        self.blink_interval_ms = ms;
    }

    #[inline]
    pub fn edit_unit(&self) -> EditUnit {
        self.edit_unit
    }

    pub fn set_edit_unit(&mut self, unit: EditUnit) {
        self.edit_unit = unit;
    }
}

impl<T, F> Default for SequenceRegistry<T, F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rect, Surface};

    type Registry = SequenceRegistry<Surface, u32>;

    fn spec(id: i32, name: &str) -> SequenceSpec {
        SequenceSpec::new(id, name, Rect::new(0, 0, 10, 10), Color::WHITE)
    }

    #[test]
    fn test_create_returns_insertion_index() {
        let mut reg = Registry::new();
        assert_eq!(reg.create(&spec(10, "a")).unwrap(), 0);
        assert_eq!(reg.create(&spec(3, "b")).unwrap(), 1);
        let ids: Vec<i32> = reg.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![10, 3]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut reg = Registry::new();
        reg.create(&spec(1, "a")).unwrap();
        let err = reg.create(&spec(1, "b")).unwrap_err();
        assert!(matches!(err, SequenceError::DuplicateId { id: 1, .. }));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.find_by_id(1).unwrap().name(), "a");
    }

    #[test]
    fn test_capacity() {
        let mut reg = Registry::new();
        for id in 0..MAX_SEQUENCES as i32 {
            reg.create(&spec(id, "s")).unwrap();
        }
        for id in 1000..1005 {
            let err = reg.create(&spec(id, "s")).unwrap_err();
            assert!(matches!(err, SequenceError::CapacityExceeded { limit: 100, .. }));
        }
        assert_eq!(reg.len(), MAX_SEQUENCES);
    }

    #[test]
    fn test_find_by_name_first_match_wins() {
        let mut reg = Registry::new();
        reg.create(&spec(1, "twin")).unwrap();
        reg.create(&spec(2, "twin")).unwrap();
        assert_eq!(reg.find_by_name("twin").unwrap().id(), 1);
        assert!(reg.find_by_name("nobody").is_none());
    }

    #[test]
    fn test_find_by_long_name() {
        let mut reg = Registry::new();
        let long = "x".repeat(80);
        reg.create(&spec(1, &long)).unwrap();
        assert_eq!(reg.find_by_name(&long).unwrap().id(), 1);
    }

    #[test]
    fn test_id_keyed_setters() {
        let mut reg = Registry::new();
        reg.create(&spec(4, "a")).unwrap();

        assert!(reg.set_text(4, "hello"));
        assert!(reg.set_position(4, 7, 8));
        assert!(reg.set_color(4, Color::BLACK));
        assert!(reg.set_visible(4, false));

        let s = reg.find_by_id(4).unwrap();
        assert_eq!(s.text(), "hello");
        assert_eq!((s.rect().x, s.rect().y), (7, 8));
        assert_eq!(s.color(), Color::BLACK);
        assert!(!s.visible());

        assert!(!reg.set_text(99, "nope"));
        assert!(!reg.set_visible(99, true));
    }

    #[test]
    fn test_require_reports_not_found() {
        let reg = Registry::new();
        let err = reg.require(12).unwrap_err();
        assert_eq!(err.to_string(), "sequence '12' not found");
    }

    #[test]
    fn test_init_is_idempotent_and_teardown_empties() {
        let mut reg = Registry::new();
        reg.init();
        reg.init();
        assert!(reg.is_empty());

        reg.create(&spec(1, "a")).unwrap();
        reg.teardown();
        assert!(reg.is_empty());
        assert!(reg.find_by_id(1).is_none());
        // ids are free again
        assert!(reg.create(&spec(1, "a")).is_ok());
    }
}
