/// A flight capability call that did not go through.
#[derive(Debug, Clone, PartialEq)]
pub enum FlightError {
    /// The vehicle (or autopilot) rejected the command.
    CommandFailed(String),
    /// No link to the vehicle.
    Disconnected,
}

impl std::fmt::Display for FlightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandFailed(s) => write!(f, "command failed: {}", s),
            Self::Disconnected => write!(f, "vehicle disconnected"),
        }
    }
}

impl std::error::Error for FlightError {}
