//! Entity registries - rectangular sequences and round sequences.
//!
//! Both registries are plain owned values: insertion-ordered `Vec` storage
//! plus id and name indexes. Entities own their fonts and textures, so
//! dropping an entity (on `init`, `teardown` or registry drop) releases them.

mod raster;
mod registry;
mod round;
mod sequence;

pub use raster::{draw_circle_outline, fill_circle};
pub use registry::*;
pub use round::*;
pub use sequence::*;
