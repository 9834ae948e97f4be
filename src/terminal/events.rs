//! Crossterm event conversion.
//!
//! Terminal coordinates are cells; the screen works in canvas pixels.
//! [`PixelScale`] maps a cell to the canvas pixel at its center.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

use crate::input::{InputEvent, Key, Modifier, MouseButton};

// =============================================================================
// Scaling
// =============================================================================

/// Cell grid to canvas pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelScale {
    cols: u16,
    rows: u16,
    width: u32,
    height: u32,
}

impl PixelScale {
    pub fn new(cols: u16, rows: u16, width: u32, height: u32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            width,
            height,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    #[inline]
    pub fn cells(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Canvas pixel under the center of a cell.
    pub fn to_pixel(&self, col: u16, row: u16) -> (i32, i32) {
        let x = (2 * col as u64 + 1) * self.width as u64 / (2 * self.cols as u64);
        let y = (2 * row as u64 + 1) * self.height as u64 / (2 * self.rows as u64);
        (x as i32, y as i32)
    }
}

// =============================================================================
// Conversion
// =============================================================================

/// Convert one crossterm event into zero or more screen events.
///
/// A printable key yields a key-down, followed by a text event when text
/// capture is on. Ctrl+C is a quit request.
pub fn convert_event(event: CrosstermEvent, scale: &PixelScale, capturing: bool) -> Vec<InputEvent> {
    match event {
        CrosstermEvent::Key(key) => convert_key_event(key, capturing),
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse, scale).into_iter().collect(),
        CrosstermEvent::Resize(width, height) => vec![InputEvent::Resize { width, height }],
        CrosstermEvent::Paste(text) if capturing => vec![InputEvent::Text(text)],
        _ => Vec::new(),
    }
}

fn convert_key_event(event: CrosstermKeyEvent, capturing: bool) -> Vec<InputEvent> {
    if event.kind == KeyEventKind::Release {
        return Vec::new();
    }
    let modifiers = convert_modifiers(event.modifiers);
    if modifiers.contains(Modifier::CTRL) && matches!(event.code, KeyCode::Char('c' | 'C')) {
        return vec![InputEvent::Quit];
    }

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => Key::Other,
    };

    let mut events = vec![InputEvent::KeyDown { key, modifiers }];
    if let Key::Char(c) = key {
        let plain = !modifiers.intersects(Modifier::CTRL | Modifier::ALT | Modifier::SUPER);
        if capturing && plain {
            events.push(InputEvent::Text(c.to_string()));
        }
    }
    events
}

fn convert_mouse_event(event: CrosstermMouseEvent, scale: &PixelScale) -> Option<InputEvent> {
    let (x, y) = scale.to_pixel(event.column, event.row);
    match event.kind {
        MouseEventKind::Down(btn) => Some(InputEvent::MouseDown {
            button: convert_mouse_button(btn),
            x,
            y,
        }),
        MouseEventKind::Up(btn) => Some(InputEvent::MouseUp {
            button: convert_mouse_button(btn),
            x,
            y,
        }),
        _ => None,
    }
}

fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifier {
    let mut out = Modifier::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        out |= Modifier::SHIFT;
    }
    if mods.contains(KeyModifiers::ALT) {
        out |= Modifier::ALT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        out |= Modifier::CTRL;
    }
    if mods.contains(KeyModifiers::SUPER) {
        out |= Modifier::SUPER;
    }
    out
}

// =============================================================================
// Polling
// =============================================================================

/// Wait up to `timeout` for input, then drain everything already queued.
///
/// Events come back unconverted: whether a key also yields text depends on
/// focus, which can change while earlier events in the batch are handled.
pub fn poll_events(timeout: Duration) -> io::Result<Vec<CrosstermEvent>> {
    let mut events = Vec::new();
    if !event::poll(timeout)? {
        return Ok(events);
    }
    loop {
        events.push(event::read()?);
        if !event::poll(Duration::ZERO)? {
            break;
        }
    }
    Ok(events)
}
