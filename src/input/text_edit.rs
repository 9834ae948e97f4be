//! Text buffer editing.
//!
//! The buffer is a flat byte sequence with a byte cursor. Insertion is
//! always atomic (a whole composed string at once). Navigation and deletion
//! step by one [`EditUnit`]: a single byte, or a whole grapheme cluster.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Byte budget of an input buffer. Inserts must keep the length below it.
pub const MAX_INPUT_LEN: usize = 255;

/// Step size for cursor movement and deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditUnit {
    /// One byte per step. Multi-byte characters can be split.
    #[default]
    Byte,
    /// One extended grapheme cluster per step.
    Grapheme,
}

/// Editable byte buffer with a cursor in `0..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    bytes: Vec<u8>,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Cursor position, in bytes.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Contents as text. Split characters show as U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Contents left of the cursor, as text.
    pub fn before_cursor(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes[..self.cursor])
    }

    /// Insert at the cursor and move the cursor past the inserted bytes.
    ///
    /// Rejected (returns `false`, nothing changes) when the result would
    /// reach [`MAX_INPUT_LEN`] bytes.
    pub fn insert(&mut self, text: &str) -> bool {
        if self.bytes.len() + text.len() >= MAX_INPUT_LEN {
            return false;
        }
        let at = self.cursor;
        self.bytes.splice(at..at, text.bytes());
        self.cursor += text.len();
        true
    }

    /// Remove the unit before the cursor. No-op at 0.
    pub fn backspace(&mut self, unit: EditUnit) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.prev_boundary(unit);
        self.bytes.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    /// Remove the unit at the cursor. No-op at the end.
    pub fn delete(&mut self, unit: EditUnit) -> bool {
        if self.cursor >= self.bytes.len() {
            return false;
        }
        let end = self.next_boundary(unit);
        self.bytes.drain(self.cursor..end);
        true
    }

    pub fn move_left(&mut self, unit: EditUnit) {
        self.cursor = self.prev_boundary(unit);
    }

    pub fn move_right(&mut self, unit: EditUnit) {
        self.cursor = self.next_boundary(unit);
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.bytes.len();
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self, unit: EditUnit) -> usize {
        if self.cursor == 0 {
            return 0;
        }
        match (unit, std::str::from_utf8(&self.bytes)) {
            (EditUnit::Grapheme, Ok(s)) => s
                .grapheme_indices(true)
                .map(|(i, _)| i)
                .take_while(|&i| i < self.cursor)
                .last()
                .unwrap_or(0),
            // Byte mode, or bytes that no longer form valid UTF-8
            _ => self.cursor - 1,
        }
    }

    fn next_boundary(&self, unit: EditUnit) -> usize {
        let len = self.bytes.len();
        if self.cursor >= len {
            return len;
        }
        match (unit, std::str::from_utf8(&self.bytes)) {
            (EditUnit::Grapheme, Ok(s)) => s
                .grapheme_indices(true)
                .map(|(i, _)| i)
                .find(|&i| i > self.cursor)
                .unwrap_or(len),
            _ => self.cursor + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> TextBuffer {
        let mut b = TextBuffer::new();
        assert!(b.insert(text));
        b
    }

    #[test]
    fn test_insert_then_two_backspaces() {
        let mut b = buffer("abc");
        assert_eq!(b.cursor(), 3);
        b.backspace(EditUnit::Byte);
        b.backspace(EditUnit::Byte);
        assert_eq!(b.text(), "a");
        assert_eq!(b.cursor(), 1);
    }

    #[test]
    fn test_insert_in_the_middle_shifts_tail() {
        let mut b = buffer("ad");
        b.move_left(EditUnit::Byte);
        b.insert("bc");
        assert_eq!(b.text(), "abcd");
        assert_eq!(b.cursor(), 3);
    }

    #[test]
    fn test_cursor_clamps() {
        let mut b = buffer("hello");
        b.home();
        assert_eq!(b.cursor(), 0);
        b.move_left(EditUnit::Byte);
        assert_eq!(b.cursor(), 0);
        b.end();
        assert_eq!(b.cursor(), 5);
        b.move_right(EditUnit::Byte);
        assert_eq!(b.cursor(), 5);
    }

    #[test]
    fn test_backspace_at_start_and_delete_at_end_are_noops() {
        let mut b = buffer("xy");
        assert!(!b.delete(EditUnit::Byte));
        b.home();
        assert!(!b.backspace(EditUnit::Byte));
        assert_eq!(b.text(), "xy");
    }

    #[test]
    fn test_delete_removes_at_cursor() {
        let mut b = buffer("abc");
        b.home();
        b.move_right(EditUnit::Byte);
        assert!(b.delete(EditUnit::Byte));
        assert_eq!(b.text(), "ac");
        assert_eq!(b.cursor(), 1);
    }

    #[test]
    fn test_overflow_guard() {
        let mut b = buffer(&"a".repeat(250));
        // 250 + 5 = 255 is already too long
        assert!(!b.insert("bbbbb"));
        assert_eq!(b.len(), 250);
        assert_eq!(b.cursor(), 250);
        // 250 + 4 = 254 fits
        assert!(b.insert("bbbb"));
        assert_eq!(b.len(), 254);
        assert!(!b.insert("c"));
    }

    #[test]
    fn test_byte_mode_splits_multibyte() {
        let mut b = buffer("é");
        assert_eq!(b.len(), 2);
        b.backspace(EditUnit::Byte);
        assert_eq!(b.len(), 1);
        assert_eq!(b.text(), "\u{FFFD}");
    }

    #[test]
    fn test_grapheme_mode_keeps_clusters_whole() {
        // 'e' + combining acute, then a flag (two regional indicators)
        let mut b = buffer("ae\u{301}\u{1F1EB}\u{1F1F7}");
        b.backspace(EditUnit::Grapheme);
        assert_eq!(b.text(), "ae\u{301}");
        b.move_left(EditUnit::Grapheme);
        assert_eq!(b.cursor(), 1);
        b.delete(EditUnit::Grapheme);
        assert_eq!(b.text(), "a");
        b.move_right(EditUnit::Grapheme);
        assert_eq!(b.cursor(), 1);
    }

    #[test]
    fn test_before_cursor() {
        let mut b = buffer("hello");
        b.move_left(EditUnit::Byte);
        b.move_left(EditUnit::Byte);
        assert_eq!(b.before_cursor(), "hel");
    }

    #[test]
    fn test_edit_unit_serde() {
        let unit: EditUnit = serde_json::from_str("\"grapheme\"").unwrap();
        assert_eq!(unit, EditUnit::Grapheme);
        assert_eq!(EditUnit::default(), EditUnit::Byte);
    }
}
