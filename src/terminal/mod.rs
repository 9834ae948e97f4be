//! Terminal front end.
//!
//! Runs the screen inside a terminal with `crossterm`:
//!
//! - [`TerminalSession`] - raw mode, alternate screen, mouse capture
//! - [`poll_events`] / [`convert_event`] - crossterm events to [`InputEvent`](crate::input::InputEvent)s
//!   in canvas pixel coordinates
//! - [`HalfBlockPresenter`] - the software canvas drawn as `▀` cells
//! - [`TerminalHost`] - clock and text capture for the input fields

mod events;
mod host;
mod presenter;
mod session;

pub use events::*;
pub use host::TerminalHost;
pub use presenter::HalfBlockPresenter;
pub use session::TerminalSession;
