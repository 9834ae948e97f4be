//! Cursor blink timing.
//!
//! No timers of its own: the application calls
//! [`SequenceRegistry::tick_cursor_blink`] once per frame with the current
//! clock reading. A late tick toggles once and restarts the period from
//! that tick, so there is no catch-up burst.

use super::field::InputField;
use crate::engine::SequenceRegistry;

/// Default blink half-period, in milliseconds.
pub const CURSOR_BLINK_MS: u64 = 500;

impl InputField {
    /// Toggle the cursor if a full interval passed since the last toggle.
    pub(crate) fn tick(&mut self, now_ms: u64, interval_ms: u64) -> bool {
        if now_ms.saturating_sub(self.cursor_timer) < interval_ms {
            return false;
        }
        self.cursor_visible = !self.cursor_visible;
        self.cursor_timer = now_ms;
        true
    }
}

impl<T, F> SequenceRegistry<T, F> {
    /// Advance the blink state of every focused field.
    ///
    /// Unfocused fields are left alone.
    pub fn tick_cursor_blink(&mut self, now_ms: u64) {
        let interval = self.blink_interval_ms;
        for field in self.entries.iter_mut().filter_map(|s| s.input.as_mut()) {
            if field.focused {
                field.tick(now_ms, interval);
            }
        }
    }
}
