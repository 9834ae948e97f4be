//! Render pipeline - the screen and its per-frame pass.
//!
//! ```text
//! clear(black) → background → sequences (insertion order) → round sequences → present
//! ```
//!
//! Draw order is the only compositing rule: later entities cover earlier
//! ones where they overlap. There is no z-index.

mod background;
mod screen;

pub use background::Background;
pub use screen::{BuildReport, Screen};
