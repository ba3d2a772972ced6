//! Pattern generators.
//!
//! Every generator is a pure function of its configuration: no I/O, no
//! randomness, and identical inputs always produce identical paths. The
//! pointcloud pattern is the exception in that it reads its source file,
//! which is why [`Pattern::generate`] is fallible.
mod config;
mod error;
mod pattern;
mod smiley;
mod spiral;
mod square;

pub use config::*;
pub use error::*;
pub use pattern::*;
pub use smiley::*;
pub use spiral::*;
pub use square::*;
