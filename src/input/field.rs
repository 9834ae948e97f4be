//! Per-sequence input-field state.

use std::borrow::Cow;

use super::text_edit::TextBuffer;
use crate::types::{truncate_str, MAX_PLACEHOLDER_LEN};

/// Input-field extension of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub(crate) focused: bool,
    pub(crate) buffer: TextBuffer,
    placeholder: String,
    pub(crate) cursor_visible: bool,
    /// Clock time of the last blink toggle, in ms.
    pub(crate) cursor_timer: u64,
}

impl InputField {
    /// Empty, unfocused field with a visible cursor.
    pub fn new(placeholder: &str, now_ms: u64) -> Self {
        Self {
            focused: false,
            buffer: TextBuffer::new(),
            placeholder: truncate_str(placeholder, MAX_PLACEHOLDER_LEN),
            cursor_visible: true,
            cursor_timer: now_ms,
        }
    }

    #[inline]
    pub fn focused(&self) -> bool {
        self.focused
    }

    #[inline]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// What the user has typed so far.
    pub fn text(&self) -> Cow<'_, str> {
        self.buffer.text()
    }

    #[inline]
    pub fn cursor_pos(&self) -> usize {
        self.buffer.cursor()
    }

    #[inline]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    #[inline]
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    #[inline]
    pub fn cursor_timer(&self) -> u64 {
        self.cursor_timer
    }

    /// Show the cursor and restart its blink period.
    pub(crate) fn reset_blink(&mut self, now_ms: u64) {
        self.cursor_visible = true;
        self.cursor_timer = now_ms;
    }
}
