//! Whole-flight orchestration.
//!
//! [`Harness`] generates the path, connects, and spawns the tick loop and
//! telemetry task next to the [`Mission`] script.
mod config;
mod harness;
mod script;

pub use config::*;
pub use harness::*;
pub use script::*;
