//! Capabilities consumed by the executor and the mission script.
//!
//! - [`Flight`]: connect/arm/takeoff/land/disarm, position setpoints, position stream
//! - [`Light`]: fire-and-forget color, brightness and on/off
//! - [`SimFlight`]: kinematic stand-in for a real vehicle
mod error;
mod flight;
mod light;
mod sim;

pub use error::*;
pub use flight::*;
pub use light::*;
pub use sim::*;

#[cfg(test)]
mod fake;
#[cfg(test)]
pub use fake::*;
