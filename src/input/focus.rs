//! Focus management for input fields.
//!
//! Focus lives on the fields themselves (`InputField::focused`); these
//! operations keep the "at most one focused field" rule by always clearing
//! every field before focusing a new one.

use tracing::{debug, info};

use super::field::InputField;
use crate::backend::{InputHost, TextCapture};
use crate::engine::{Sequence, SequenceRegistry};

impl<T, F> SequenceRegistry<T, F> {
    /// Turn the sequence with `id` into an input field.
    ///
    /// Returns `false` when no such sequence exists.
    pub fn enable_input(&mut self, id: i32, placeholder: &str, now_ms: u64) -> bool {
        match self.find_by_id_mut(id) {
            Some(seq) => {
                seq.enable_input(placeholder, now_ms);
                true
            }
            None => false,
        }
    }

    /// Focus the input field at `index`.
    ///
    /// Does nothing (and returns `false`) for a missing index or a sequence
    /// that is not an input field. Otherwise every other field loses focus,
    /// the cursor restarts visible, and the host starts capturing text.
    pub fn focus<H: InputHost + ?Sized>(&mut self, index: usize, host: &mut H) -> bool {
        if !self.entries.get(index).is_some_and(Sequence::is_input) {
            return false;
        }

        self.unfocus_all(host);

        let now = host.now_ms();
        let Some(seq) = self.entries.get_mut(index) else {
            return false;
        };
        if let Some(field) = seq.input.as_mut() {
            field.focused = true;
            field.reset_blink(now);
        }
        host.begin_capture();
        debug!("Input focused: '{}'", seq.name());
        true
    }

    /// Clear focus on every field and stop text capture.
    pub fn unfocus_all<H: TextCapture + ?Sized>(&mut self, host: &mut H) {
        for seq in self.entries.iter_mut().filter(|s| s.is_focused()) {
            if let Some(field) = seq.input.as_ref() {
                debug!("Input unfocused: '{}' | content: \"{}\"", seq.name(), field.text());
            }
            if let Some(field) = seq.input.as_mut() {
                field.focused = false;
            }
        }
        host.end_capture();
    }

    /// Index of the focused field, if any.
    pub fn focused(&self) -> Option<usize> {
        self.entries.iter().position(Sequence::is_focused)
    }

    /// The focused sequence, if any.
    pub fn focused_sequence(&self) -> Option<&Sequence<T, F>> {
        self.focused().and_then(|i| self.entries.get(i))
    }

    /// Input state of the focused field, if any.
    pub fn focused_field(&self) -> Option<&InputField> {
        self.focused_sequence().and_then(Sequence::input)
    }

    pub(crate) fn focused_field_mut(&mut self) -> Option<(&str, &mut InputField)> {
        let index = self.focused()?;
        let seq = self.entries.get_mut(index)?;
        seq.input_parts()
    }

    /// Log the focused field's content and drop focus.
    pub(crate) fn confirm_focused<H: TextCapture + ?Sized>(&mut self, host: &mut H) {
        if let Some(seq) = self.focused_sequence() {
            let content = seq.input().map(|f| f.text().into_owned()).unwrap_or_default();
            info!("Input confirmed in '{}': \"{}\"", seq.name(), content);
        }
        self.unfocus_all(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Clock;
    use crate::engine::SequenceSpec;
    use crate::types::{Color, Rect, Surface};

    #[derive(Default)]
    struct Host {
        now: u64,
        capturing: bool,
        begins: usize,
    }

    impl Clock for Host {
        fn now_ms(&self) -> u64 {
            self.now
        }
    }

    impl TextCapture for Host {
        fn begin_capture(&mut self) {
            self.capturing = true;
            self.begins += 1;
        }

        fn end_capture(&mut self) {
            self.capturing = false;
        }
    }

    fn registry() -> SequenceRegistry<Surface, ()> {
        let mut reg = SequenceRegistry::new();
        for id in 1..=3 {
            let spec = SequenceSpec::new(id, format!("f{id}"), Rect::new(0, id * 20, 50, 10), Color::BLACK);
            reg.create(&spec).unwrap();
        }
        reg.enable_input(1, "one", 0);
        reg.enable_input(2, "two", 0);
        reg
    }

    fn focused_count(reg: &SequenceRegistry<Surface, ()>) -> usize {
        reg.iter().filter(|s| s.is_focused()).count()
    }

    #[test]
    fn test_enable_input_unknown_id() {
        let mut reg = registry();
        assert!(!reg.enable_input(42, "x", 0));
    }

    #[test]
    fn test_focus_moves_between_fields() {
        let mut reg = registry();
        let mut host = Host {
            now: 1000,
            ..Host::default()
        };

        assert!(reg.focus(0, &mut host));
        assert_eq!(reg.focused(), Some(0));
        assert!(host.capturing);

        assert!(reg.focus(1, &mut host));
        assert_eq!(reg.focused(), Some(1));
        assert_eq!(focused_count(&reg), 1);
        assert_eq!(reg.focused_field().unwrap().cursor_timer(), 1000);
    }

    #[test]
    fn test_focus_non_input_is_noop() {
        let mut reg = registry();
        let mut host = Host::default();
        reg.focus(0, &mut host);

        assert!(!reg.focus(2, &mut host));
        assert!(!reg.focus(99, &mut host));
        assert_eq!(reg.focused(), Some(0));
        assert_eq!(host.begins, 1);
    }

    #[test]
    fn test_unfocus_all_stops_capture() {
        let mut reg = registry();
        let mut host = Host::default();
        reg.focus(1, &mut host);
        reg.unfocus_all(&mut host);
        assert_eq!(reg.focused(), None);
        assert_eq!(focused_count(&reg), 0);
        assert!(!host.capturing);
    }

    #[test]
    fn test_focus_resets_blink() {
        let mut reg = registry();
        let mut host = Host::default();
        reg.focus(0, &mut host);
        reg.tick_cursor_blink(600);
        assert!(!reg.focused_field().unwrap().cursor_visible());

        host.now = 700;
        reg.focus(0, &mut host);
        let field = reg.focused_field().unwrap();
        assert!(field.cursor_visible());
        assert_eq!(field.cursor_timer(), 700);
    }

    #[test]
    fn test_reenabling_focused_field_keeps_focus() {
        let mut reg = registry();
        let mut host = Host::default();
        reg.focus(0, &mut host);
        reg.route_event(&crate::input::InputEvent::text("abc"), &mut host);

        assert!(reg.enable_input(1, "again", 50));
        assert_eq!(reg.focused(), Some(0));
        assert!(host.capturing);
        let field = reg.focused_field().unwrap();
        assert_eq!(field.text(), "");
        assert_eq!(field.cursor_timer(), 50);

        // a second enable on an unfocused field stays unfocused
        assert!(reg.enable_input(2, "two", 50));
        assert_eq!(focused_count(&reg), 1);
    }
}
