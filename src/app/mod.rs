//! Application glue - the keys the screen itself does not handle.
//!
//! Every event goes to the input fields first. What they leave behind is
//! interpreted here:
//!
//! | Key        | Effect                                            |
//! |------------|---------------------------------------------------|
//! | Escape     | unfocus the field, or quit when nothing is focused |
//! | `+` / `=`  | volume +5 (no field focused)                      |
//! | `-` / `_`  | volume -5 (no field focused)                      |
//! | `p` / `r`  | pause / resume music (no field focused)           |

mod soundtrack;
#[cfg(feature = "audio")]
mod speaker;

pub use soundtrack::*;
#[cfg(feature = "audio")]
pub use speaker::SpeakerOutput;

use tracing::info;

use crate::backend::{FontEngine, InputHost, RenderContext};
use crate::input::{InputEvent, Key};
use crate::pipeline::Screen;
use crate::types::Color;

/// Name of the round sequence that shows the music volume.
pub const VOLUME_INDICATOR: &str = "volume_indicator";

/// Indicator color for a volume level.
pub fn volume_indicator_color(volume: i32) -> Color {
    if volume < 40 {
        Color::new(50, 100, 50, 40)
    } else if volume < 80 {
        Color::new(100, 100, 50, 40)
    } else {
        Color::new(100, 50, 50, 40)
    }
}

#[derive(Debug)]
pub struct App<T, F> {
    pub screen: Screen<T, F>,
    pub soundtrack: Soundtrack,
    running: bool,
    indicator: Option<usize>,
}

impl<T, F> App<T, F> {
    pub fn new(screen: Screen<T, F>, soundtrack: Soundtrack) -> Self {
        let indicator = screen.rounds.iter().position(|r| r.name() == VOLUME_INDICATOR);
        Self {
            screen,
            soundtrack,
            running: true,
            indicator,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Route one event through the input fields, then the app keys.
    pub fn handle_event<H: InputHost + ?Sized>(&mut self, event: &InputEvent, host: &mut H) {
        if self.screen.sequences.route_event(event, host) {
            return;
        }
        match event {
            InputEvent::Quit => self.stop(),
            InputEvent::KeyDown { key, .. } => self.handle_key(*key, host),
            _ => {}
        }
    }

    fn handle_key<H: InputHost + ?Sized>(&mut self, key: Key, host: &mut H) {
        let focused = self.screen.sequences.focused().is_some();
        match key {
            Key::Escape if focused => self.screen.sequences.unfocus_all(host),
            Key::Escape => {
                info!("Escape pressed, quitting");
                self.stop();
            }
            _ if focused => {}
            Key::Char('+' | '=') => self.soundtrack.change_volume(VOLUME_STEP),
            Key::Char('-' | '_') => self.soundtrack.change_volume(-VOLUME_STEP),
            Key::Char('p' | 'P') => self.soundtrack.pause(),
            Key::Char('r' | 'R') => self.soundtrack.resume(),
            _ => {}
        }
    }

    /// Per-frame state: cursor blink and the volume indicator.
    pub fn update(&mut self, now_ms: u64) {
        self.screen.sequences.tick_cursor_blink(now_ms);

        let volume = self.soundtrack.volume();
        if let Some(round) = self.indicator.and_then(|i| self.screen.rounds.get_mut(i)) {
            round.set_text(&volume.to_string());
            round.set_color(volume_indicator_color(volume));
        }
    }

    pub fn render<R, E>(&self, ctx: &mut R, fonts: &E)
    where
        R: RenderContext<Texture = T>,
        E: FontEngine<Font = F>,
    {
        self.screen.render_frame(ctx, fonts);
    }

    /// Stop the music and release every screen resource.
    pub fn teardown(&mut self) {
        info!("Cleaning up...");
        self.soundtrack.teardown();
        self.screen.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Clock, TextCapture};
    use crate::engine::{RoundSpec, SequenceSpec};
    use crate::types::{Rect, Surface};

    #[derive(Default)]
    struct Host {
        capturing: bool,
    }

    impl Clock for Host {
        fn now_ms(&self) -> u64 {
            0
        }
    }

    impl TextCapture for Host {
        fn begin_capture(&mut self) {
            self.capturing = true;
        }
        fn end_capture(&mut self) {
            self.capturing = false;
        }
    }

    fn app() -> App<Surface, ()> {
        let mut screen = Screen::new();
        let field = SequenceSpec::new(7, "field", Rect::new(0, 0, 100, 40), Color::BLACK);
        screen.sequences.create(&field).unwrap();
        screen.sequences.enable_input(7, "", 0);
        let indicator = RoundSpec::new(100, VOLUME_INDICATOR, (200, 50), 40, Color::BLACK).with_text("?");
        screen.rounds.create(&indicator).unwrap();
        App::new(screen, Soundtrack::new(Box::new(LogOutput::default()), 32))
    }

    #[test]
    fn test_quit_event_stops() {
        let mut app = app();
        app.handle_event(&InputEvent::Quit, &mut Host::default());
        assert!(!app.is_running());
    }

    #[test]
    fn test_escape_unfocuses_before_quitting() {
        let mut app = app();
        let mut host = Host::default();
        app.handle_event(&InputEvent::click(10, 10), &mut host);
        assert!(host.capturing);

        app.handle_event(&InputEvent::key(Key::Escape), &mut host);
        assert!(app.is_running());
        assert_eq!(app.screen.sequences.focused(), None);
        assert!(!host.capturing);

        app.handle_event(&InputEvent::key(Key::Escape), &mut host);
        assert!(!app.is_running());
    }

    #[test]
    fn test_volume_keys_only_without_focus() {
        let mut app = app();
        let mut host = Host::default();
        app.handle_event(&InputEvent::key(Key::Char('=')), &mut host);
        app.handle_event(&InputEvent::key(Key::Char('+')), &mut host);
        assert_eq!(app.soundtrack.volume(), 42);
        app.handle_event(&InputEvent::key(Key::Char('_')), &mut host);
        assert_eq!(app.soundtrack.volume(), 37);

        app.handle_event(&InputEvent::click(10, 10), &mut host);
        app.handle_event(&InputEvent::key(Key::Char('-')), &mut host);
        app.handle_event(&InputEvent::text("-"), &mut host);
        assert_eq!(app.soundtrack.volume(), 37);
        assert_eq!(app.screen.sequences.focused_field().unwrap().text(), "-");
    }

    #[test]
    fn test_update_refreshes_indicator() {
        let mut app = app();
        app.soundtrack.set_volume(57);
        app.update(0);
        let round = app.screen.rounds.find_by_name(VOLUME_INDICATOR).unwrap();
        assert_eq!(round.text(), "57");
        assert_eq!(round.color(), Color::new(100, 100, 50, 40));
    }

    #[test]
    fn test_indicator_color_thresholds() {
        assert_eq!(volume_indicator_color(0), Color::new(50, 100, 50, 40));
        assert_eq!(volume_indicator_color(39), Color::new(50, 100, 50, 40));
        assert_eq!(volume_indicator_color(40), Color::new(100, 100, 50, 40));
        assert_eq!(volume_indicator_color(79), Color::new(100, 100, 50, 40));
        assert_eq!(volume_indicator_color(80), Color::new(100, 50, 50, 40));
        assert_eq!(volume_indicator_color(128), Color::new(100, 50, 50, 40));
    }
}
