mod config;
mod executor;
mod state;

pub use config::*;
pub use executor::*;
pub use state::*;
