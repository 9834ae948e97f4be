//! Event routing into input fields.
//!
//! [`SequenceRegistry::route_event`] is the first stop for every host
//! event. It returns `true` when the event was used by an input field;
//! anything else is left for the application.

use tracing::debug;

use super::{InputEvent, Key, MouseButton};
use crate::backend::InputHost;
use crate::engine::SequenceRegistry;

impl<T, F> SequenceRegistry<T, F> {
    /// Dispatch one event to the input fields.
    ///
    /// - Primary press: focus the first visible field under the pointer
    ///   (edges inclusive), or unfocus everything on a miss.
    /// - Text: insert at the focused field's cursor, dropped on overflow.
    /// - Keys, only while a field is focused: Backspace, Delete, Left,
    ///   Right, Home, End, Enter (confirm and unfocus), Tab (next field).
    pub fn route_event<H: InputHost + ?Sized>(&mut self, event: &InputEvent, host: &mut H) -> bool {
        match event {
            InputEvent::MouseDown {
                button: MouseButton::Left,
                x,
                y,
            } => self.route_press(*x, *y, host),
            InputEvent::Text(text) => self.route_text(text),
            InputEvent::KeyDown { key, .. } => self.route_key(*key, host),
            _ => false,
        }
    }

    /// Index of the first visible input field containing the point.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<usize> {
        self.entries
            .iter()
            .position(|s| s.is_input() && s.visible() && s.rect().contains_inclusive(x, y))
    }

    fn route_press<H: InputHost + ?Sized>(&mut self, x: i32, y: i32, host: &mut H) -> bool {
        match self.hit_test(x, y) {
            Some(index) => self.focus(index, host),
            None => {
                self.unfocus_all(host);
                false
            }
        }
    }

    fn route_text(&mut self, text: &str) -> bool {
        let Some((name, field)) = self.focused_field_mut() else {
            return false;
        };
        if !field.buffer.insert(text) {
            debug!("Input '{}' full, dropped {} bytes", name, text.len());
        }
        true
    }

    fn route_key<H: InputHost + ?Sized>(&mut self, key: Key, host: &mut H) -> bool {
        let unit = self.edit_unit;
        let Some((_, field)) = self.focused_field_mut() else {
            return false;
        };
        let buffer = &mut field.buffer;

        match key {
            Key::Backspace => {
                buffer.backspace(unit);
            }
            Key::Delete => {
                buffer.delete(unit);
            }
            Key::Left => buffer.move_left(unit),
            Key::Right => buffer.move_right(unit),
            Key::Home => buffer.home(),
            Key::End => buffer.end(),
            Key::Enter | Key::KeypadEnter => self.confirm_focused(host),
            Key::Tab => self.focus_next(host),
            _ => return false,
        }
        true
    }

    /// Move focus to the next visible input field after the focused one,
    /// wrapping around. Stays put when there is no other candidate.
    pub fn focus_next<H: InputHost + ?Sized>(&mut self, host: &mut H) {
        let Some(current) = self.focused() else {
            return;
        };
        let count = self.entries.len();
        let next = (1..count)
            .map(|step| (current + step) % count)
            .find(|&i| self.entries[i].is_input() && self.entries[i].visible());

        if let Some(next) = next {
            self.focus(next, host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Clock, TextCapture};
    use crate::engine::SequenceSpec;
    use crate::input::{EditUnit, Modifier};
    use crate::types::{Color, Rect, Surface};

    #[derive(Default)]
    struct Host {
        now: u64,
    }

    impl Clock for Host {
        fn now_ms(&self) -> u64 {
            self.now
        }
    }

    impl TextCapture for Host {
        fn begin_capture(&mut self) {}
        fn end_capture(&mut self) {}
    }

    type Registry = SequenceRegistry<Surface, ()>;

    /// Three input fields A, B, C stacked vertically, plus a plain panel.
    fn fields() -> Registry {
        let mut reg = Registry::new();
        for (id, name) in [(1, "A"), (2, "panel"), (3, "B"), (4, "C")] {
            let rect = Rect::new(10, id * 100, 200, 40);
            reg.create(&SequenceSpec::new(id, name, rect, Color::BLACK)).unwrap();
        }
        for id in [1, 3, 4] {
            reg.enable_input(id, "", 0);
        }
        reg
    }

    fn focused_name(reg: &Registry) -> Option<&str> {
        reg.focused_sequence().map(|s| s.name())
    }

    fn type_text(reg: &mut Registry, host: &mut Host, text: &str) {
        reg.route_event(&InputEvent::text(text), host);
    }

    #[test]
    fn test_press_focuses_and_miss_unfocuses() {
        let mut reg = fields();
        let mut host = Host::default();

        assert!(reg.route_event(&InputEvent::click(20, 110), &mut host));
        assert_eq!(focused_name(&reg), Some("A"));

        // press inside B while A is focused
        assert!(reg.route_event(&InputEvent::click(50, 320), &mut host));
        assert_eq!(focused_name(&reg), Some("B"));
        assert_eq!(reg.iter().filter(|s| s.is_focused()).count(), 1);

        // press on the plain panel is a miss
        assert!(!reg.route_event(&InputEvent::click(50, 220), &mut host));
        assert_eq!(reg.focused(), None);
    }

    #[test]
    fn test_press_edges_are_inclusive() {
        let mut reg = fields();
        let mut host = Host::default();
        reg.route_event(&InputEvent::click(210, 140), &mut host);
        assert_eq!(focused_name(&reg), Some("A"));
        reg.route_event(&InputEvent::click(211, 140), &mut host);
        assert_eq!(reg.focused(), None);
    }

    #[test]
    fn test_press_skips_hidden_fields() {
        let mut reg = fields();
        reg.set_visible(1, false);
        assert_eq!(reg.hit_test(20, 110), None);
    }

    #[test]
    fn test_right_button_is_ignored() {
        let mut reg = fields();
        let mut host = Host::default();
        let press = InputEvent::MouseDown {
            button: MouseButton::Right,
            x: 20,
            y: 110,
        };
        assert!(!reg.route_event(&press, &mut host));
        assert_eq!(reg.focused(), None);
    }

    #[test]
    fn test_text_without_focus_is_dropped() {
        let mut reg = fields();
        let mut host = Host::default();
        assert!(!reg.route_event(&InputEvent::text("x"), &mut host));
        assert!(reg.iter().filter_map(|s| s.input()).all(|f| f.text().is_empty()));
    }

    #[test]
    fn test_typing_and_editing_keys() {
        let mut reg = fields();
        let mut host = Host::default();
        reg.focus(0, &mut host);

        type_text(&mut reg, &mut host, "abc");
        reg.route_event(&InputEvent::key(Key::Backspace), &mut host);
        reg.route_event(&InputEvent::key(Key::Backspace), &mut host);
        let field = reg.focused_field().unwrap();
        assert_eq!(field.text(), "a");
        assert_eq!(field.cursor_pos(), 1);

        type_text(&mut reg, &mut host, "hello");
        reg.route_event(&InputEvent::key(Key::Home), &mut host);
        reg.route_event(&InputEvent::key(Key::Delete), &mut host);
        assert_eq!(reg.focused_field().unwrap().text(), "hello");
        assert_eq!(reg.focused_field().unwrap().cursor_pos(), 0);

        reg.route_event(&InputEvent::key(Key::End), &mut host);
        reg.route_event(&InputEvent::key(Key::Right), &mut host);
        assert_eq!(reg.focused_field().unwrap().cursor_pos(), 5);
    }

    #[test]
    fn test_overflow_keeps_buffer_and_cursor() {
        let mut reg = fields();
        let mut host = Host::default();
        reg.focus(0, &mut host);
        type_text(&mut reg, &mut host, &"x".repeat(254));
        type_text(&mut reg, &mut host, "y");

        let field = reg.focused_field().unwrap();
        assert_eq!(field.buffer().len(), 254);
        assert_eq!(field.cursor_pos(), 254);
    }

    #[test]
    fn test_enter_confirms_and_unfocuses() {
        let mut reg = fields();
        let mut host = Host::default();
        reg.focus(2, &mut host);
        type_text(&mut reg, &mut host, "Ana");
        assert!(reg.route_event(&InputEvent::key(Key::Enter), &mut host));
        assert_eq!(reg.focused(), None);
        assert_eq!(reg.find_by_name("B").unwrap().input().unwrap().text(), "Ana");
    }

    #[test]
    fn test_tab_cycles_and_wraps() {
        let mut reg = fields();
        let mut host = Host::default();
        reg.focus(0, &mut host);

        let tab = InputEvent::key(Key::Tab);
        reg.route_event(&tab, &mut host);
        assert_eq!(focused_name(&reg), Some("B"));
        reg.route_event(&tab, &mut host);
        assert_eq!(focused_name(&reg), Some("C"));
        reg.route_event(&tab, &mut host);
        assert_eq!(focused_name(&reg), Some("A"));
    }

    #[test]
    fn test_tab_with_single_visible_field_stays() {
        let mut reg = fields();
        let mut host = Host::default();
        reg.set_visible(3, false);
        reg.set_visible(4, false);
        reg.focus(0, &mut host);
        reg.route_event(&InputEvent::key(Key::Tab), &mut host);
        assert_eq!(focused_name(&reg), Some("A"));
    }

    #[test]
    fn test_keys_without_focus_are_not_consumed() {
        let mut reg = fields();
        let mut host = Host::default();
        assert!(!reg.route_event(&InputEvent::key(Key::Backspace), &mut host));
        assert!(!reg.route_event(&InputEvent::key(Key::Tab), &mut host));
    }

    #[test]
    fn test_escape_and_chars_pass_through_while_focused() {
        let mut reg = fields();
        let mut host = Host::default();
        reg.focus(0, &mut host);
        assert!(!reg.route_event(&InputEvent::key(Key::Escape), &mut host));
        let plus = InputEvent::KeyDown {
            key: Key::Char('+'),
            modifiers: Modifier::SHIFT,
        };
        assert!(!reg.route_event(&plus, &mut host));
        assert_eq!(reg.focused(), Some(0));
    }

    #[test]
    fn test_grapheme_unit_backspace() {
        let mut reg = fields();
        reg.set_edit_unit(EditUnit::Grapheme);
        let mut host = Host::default();
        reg.focus(0, &mut host);
        type_text(&mut reg, &mut host, "né");
        reg.route_event(&InputEvent::key(Key::Backspace), &mut host);
        assert_eq!(reg.focused_field().unwrap().text(), "n");
    }
}
