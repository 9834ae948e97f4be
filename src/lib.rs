//! # sequence-screen
//!
//! A fixed-layout 2D screen of named "sequences": colored rectangles with
//! centered, shadowed labels or images, round indicators, and rectangles
//! that act as single-line text inputs.
//!
//! ## Architecture
//!
//! Entities live in two insertion-ordered registries owned by a
//! [`Screen`]. Nothing draws or loads directly; everything goes through the
//! backend traits, so the same screen runs on the software [`Canvas`] in a
//! terminal or on a recording context in tests.
//!
//! ```text
//! layout JSON → Screen::build → events → route_event → update → render_frame → present
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Color, Rect, Surface
//! - [`backend`] - render, image, font, clock and text capture seams
//! - [`engine`] - rectangular and round sequence registries
//! - [`input`] - focus, editing, blink and event routing for input fields
//! - [`pipeline`] - background and the per-frame render pass
//! - [`config`] - JSON layout files
//! - [`app`] - application keys, music state, volume indicator
//! - [`terminal`] - crossterm front end
//! - [`logging`] - file logging setup

pub mod app;
pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod pipeline;
pub mod terminal;
pub mod types;

pub use types::*;

pub use error::{EntityKind, Result, SequenceError};

pub use backend::{
    Canvas, Clock, FontEngine, GlyphFonts, ImageDecoder, ImageFiles, InputHost, ManualClock,
    RenderContext, SystemClock, TextCapture,
};

pub use engine::{
    RoundRegistry, RoundSequence, RoundSpec, Sequence, SequenceRegistry, SequenceSpec,
    MAX_ROUND_SEQUENCES, MAX_SEQUENCES,
};

pub use input::{EditUnit, InputEvent, InputField, Key, Modifier, MouseButton, TextBuffer};

pub use pipeline::{Background, BuildReport, Screen};

pub use config::{ConfigError, ScreenConfig};

pub use app::{App, LogOutput, MusicOutput, Soundtrack};
#[cfg(feature = "audio")]
pub use app::SpeakerOutput;
