//! sequence-screen - runs a layout in the terminal.
//!
//! ```text
//! sequence-screen [layout.json]
//! ```
//!
//! Without an argument the built-in demo layout is used. Logs go to
//! `sequence-screen.log`; set `RUST_LOG` for more detail.

use std::env;
use std::io;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use sequence_screen::backend::{Canvas, Clock, GlyphFonts, ImageFiles};
use sequence_screen::config::ScreenConfig;
use sequence_screen::input::InputEvent;
use sequence_screen::logging::{self, DEFAULT_LOG_FILE};
use sequence_screen::pipeline::Screen;
use sequence_screen::terminal::{
    convert_event, poll_events, HalfBlockPresenter, PixelScale, TerminalHost, TerminalSession,
};
use sequence_screen::{App, LogOutput, MusicOutput, Soundtrack};
#[cfg(feature = "audio")]
use sequence_screen::SpeakerOutput;

/// Frame delay, about 60 frames per second.
const FRAME: Duration = Duration::from_millis(16);

const CONTROLS: &[&str] = &[
    "ESC         - Unfocus input, or quit",
    "+ / -       - Volume up / down (5)",
    "P / R       - Pause / resume music",
    "Click       - Focus input field",
    "Tab         - Next input field",
    "Enter       - Confirm input",
    "Ctrl+C      - Quit",
];

/// Speaker output, or a log-only stand-in when no device opens.
#[cfg(feature = "audio")]
fn music_output() -> Box<dyn MusicOutput> {
    match SpeakerOutput::new() {
        Ok(output) => Box::new(output),
        Err(e) => {
            warn!("{}; music will only be logged", e);
            Box::new(LogOutput::default())
        }
    }
}

#[cfg(not(feature = "audio"))]
fn music_output() -> Box<dyn MusicOutput> {
    Box::new(LogOutput::default())
}

fn main() -> anyhow::Result<()> {
    logging::init(DEFAULT_LOG_FILE).context("failed to set up logging")?;

    let config = match env::args_os().nth(1) {
        Some(path) => ScreenConfig::load(&path)?,
        None => ScreenConfig::builtin()?,
    };
    info!("Starting '{}'", config.window.title);

    let fonts = GlyphFonts;
    let mut canvas = Canvas::new(config.window.width, config.window.height);
    let mut host = TerminalHost::new();

    let mut screen = Screen::new();
    let report = screen.build(&config, &mut canvas, &ImageFiles, &fonts, host.now_ms());
    if !report.errors.is_empty() {
        warn!("{} layout entries could not be fully loaded", report.errors.len());
    }

    let mut soundtrack = Soundtrack::new(music_output(), config.music.volume);
    if let Some(path) = &config.music.path {
        if soundtrack.load(path).is_ok() {
            soundtrack.play();
        }
    }

    let mut app = App::new(screen, soundtrack);
    for line in CONTROLS {
        info!("{}", line);
    }

    let mut session = TerminalSession::enter().context("failed to set up terminal")?;
    session.set_title(&config.window.title).ok();
    let (cols, rows) = session.size().context("failed to read terminal size")?;
    let mut scale = PixelScale::new(cols, rows, canvas.width(), canvas.height());
    let mut presenter = HalfBlockPresenter::new();
    let mut stdout = io::stdout();

    while app.is_running() {
        for raw in poll_events(FRAME)? {
            for event in convert_event(raw, &scale, host.is_capturing()) {
                if let InputEvent::Resize { width, height } = event {
                    scale.resize(width, height);
                }
                app.handle_event(&event, &mut host);
            }
        }

        app.update(host.now_ms());
        app.render(&mut canvas, &fonts);

        let (cols, rows) = scale.cells();
        presenter.present(&canvas, cols, rows, &mut stdout)?;
    }

    app.teardown();
    session.leave().context("failed to restore terminal")?;
    info!("Bye");
    Ok(())
}
