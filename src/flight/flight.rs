use super::*;
use crate::Degrees;
use crate::waypoint::Ned;

/// Asynchronous feed of position estimates in the local NED frame.
pub type Positions = futures::stream::BoxStream<'static, Ned>;

/// Narrow view of a flight controller.
///
/// Every command resolves once the autopilot has accepted or rejected it;
/// none of them wait for the maneuver itself to finish. Progress is observed
/// through [`Flight::positions`].
#[async_trait::async_trait]
pub trait Flight: Send + Sync {
    async fn connect(&self) -> Result<(), FlightError>;
    /// Resolves once the vehicle reports a usable position estimate.
    async fn ready(&self) -> Result<(), FlightError>;
    async fn arm(&self) -> Result<(), FlightError>;
    async fn takeoff(&self) -> Result<(), FlightError>;
    async fn land(&self) -> Result<(), FlightError>;
    async fn disarm(&self) -> Result<(), FlightError>;
    /// Set the position + yaw target and switch into offboard (externally commanded) mode.
    async fn goto_and_start(&self, target: Ned, yaw_deg: Degrees) -> Result<(), FlightError>;
    /// Open an independent stream of position samples.
    fn positions(&self) -> Positions;
}
