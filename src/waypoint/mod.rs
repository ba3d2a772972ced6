mod ned;
mod path;
mod rgb;
mod waypoint;

pub use ned::*;
pub use path::*;
pub use rgb::*;
pub use waypoint::*;
