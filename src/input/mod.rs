//! Text input - editable fields on top of rectangular sequences.
//!
//! A sequence becomes an input field through
//! [`SequenceRegistry::enable_input`](crate::engine::SequenceRegistry::enable_input).
//! From then on the registry routes pointer, text and key events to it:
//!
//! - **Focus**: at most one field is focused across the whole registry
//! - **Editing**: insertion at the cursor, Backspace/Delete, cursor keys
//! - **Blink**: the cursor toggles every blink interval while focused
//! - **Tab**: cycles focus through the visible fields in insertion order
//!
//! Escape is not handled here; the application decides whether it means
//! "unfocus" or "quit".
//!
//! # Example
//!
//! ```ignore
//! for event in events {
//!     if !screen.sequences.route_event(&event, &mut host) {
//!         app_handles(event);
//!     }
//! }
//! screen.sequences.tick_cursor_blink(host.now_ms());
//! ```

mod cursor;
mod draw;
mod field;
mod focus;
mod router;
mod text_edit;

pub use cursor::CURSOR_BLINK_MS;
pub(crate) use draw::draw_input_field;
pub use field::*;
pub use text_edit::*;

// =============================================================================
// Events
// =============================================================================

/// Keys the input system and the application care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    KeypadEnter,
    Tab,
    Backspace,
    Delete,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Other,
}

bitflags::bitflags! {
    /// Keyboard modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifier: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        const SUPER = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// One event from the host environment, in screen pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    MouseDown { button: MouseButton, x: i32, y: i32 },
    MouseUp { button: MouseButton, x: i32, y: i32 },
    /// Composed printable text, possibly several bytes long.
    Text(String),
    KeyDown { key: Key, modifiers: Modifier },
    Resize { width: u16, height: u16 },
    Quit,
}

impl InputEvent {
    /// Key-down with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifier::NONE,
        }
    }

    /// Primary-button press.
    pub fn click(x: i32, y: i32) -> Self {
        Self::MouseDown {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}
