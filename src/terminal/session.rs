//! Terminal setup and teardown.

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
    SetTitle,
};
use tracing::{debug, warn};

/// Raw mode, alternate screen, hidden cursor and mouse capture for as long
/// as the session lives.
#[derive(Debug)]
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    /// Take over the terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut session = Self { active: true };
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, EnableMouseCapture, Clear(ClearType::All)) {
            // undo raw mode before reporting
            session.leave().ok();
            return Err(e);
        }
        debug!("Terminal session started");
        Ok(session)
    }

    /// Window title, for terminals that show one.
    pub fn set_title(&self, title: &str) -> io::Result<()> {
        execute!(io::stdout(), SetTitle(title))
    }

    /// Current size in cells.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Give the terminal back. Safe to call more than once.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut out = io::stdout();
        let restored = execute!(out, DisableMouseCapture, Show, LeaveAlternateScreen);
        out.flush().ok();
        disable_raw_mode()?;
        debug!("Terminal session ended");
        restored
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}
