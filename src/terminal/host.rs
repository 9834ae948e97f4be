//! Input environment for the terminal front end.

use tracing::debug;

use crate::backend::{Clock, SystemClock, TextCapture};

/// Wall clock plus the text capture flag.
///
/// Terminals have no IME toggle, so capture only decides whether printable
/// keys also produce text events.
#[derive(Debug, Default)]
pub struct TerminalHost {
    clock: SystemClock,
    capturing: bool,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }
}

impl Clock for TerminalHost {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

impl TextCapture for TerminalHost {
    fn begin_capture(&mut self) {
        if !self.capturing {
            debug!("Text capture on");
        }
        self.capturing = true;
    }

    fn end_capture(&mut self) {
        if self.capturing {
            debug!("Text capture off");
        }
        self.capturing = false;
    }
}
