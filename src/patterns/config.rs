use crate::Meters;
use crate::Seconds;
use crate::waypoint::*;
use serde::Deserialize;
use serde::Serialize;

/// Placement and styling shared by every pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// NED anchor of the pattern.
    pub center: Ned,
    /// Multiplies every dimension of the pattern.
    pub scale: Meters,
    /// Color for patterns that do not pick their own.
    pub default_color: Rgb,
    /// Dwell at each waypoint.
    pub hold_time: Seconds,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            center: Ned::from(crate::DEFAULT_CENTER),
            scale: 1.0,
            default_color: Rgb::WHITE,
            hold_time: crate::DEFAULT_HOLD_TIME,
        }
    }
}

impl PatternConfig {
    pub fn new(center: Ned, scale: Meters) -> Self {
        Self {
            center,
            scale,
            ..Self::default()
        }
    }
    pub fn with_color(self, default_color: Rgb) -> Self {
        Self {
            default_color,
            ..self
        }
    }
    pub fn with_hold(self, hold_time: Seconds) -> Self {
        Self { hold_time, ..self }
    }
    /// Waypoint at `position` carrying this config's hold time.
    pub(crate) fn waypoint(&self, position: Ned, color: Rgb) -> Waypoint {
        Waypoint::new(position, color, self.hold_time)
    }
}
