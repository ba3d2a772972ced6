use super::*;
use crate::Degrees;
use crate::Seconds;
use serde::Serialize;

/// Opaque grouping tag shared by waypoints drawn as one continuous stroke.
pub type SegmentId = u32;

/// A single stop of a light-painting path.
/// Fields are fixed at construction; the `with_*` builders return new values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    position: Ned,
    color: Rgb,
    brightness: f64,
    hold_time: Seconds,
    yaw_deg: Degrees,
    segment_id: SegmentId,
}

impl Waypoint {
    /// Full brightness, zero yaw, segment 0. Negative hold times clamp to 0.
    pub fn new(position: Ned, color: Rgb, hold_time: Seconds) -> Self {
        Self {
            position,
            color,
            brightness: 1.0,
            hold_time: hold_time.max(0.0),
            yaw_deg: 0.0,
            segment_id: 0,
        }
    }
    pub fn with_brightness(self, brightness: f64) -> Self {
        Self {
            brightness: brightness.clamp(0.0, 1.0),
            ..self
        }
    }
    pub fn with_yaw(self, yaw_deg: Degrees) -> Self {
        Self { yaw_deg, ..self }
    }
    pub fn with_segment(self, segment_id: SegmentId) -> Self {
        Self { segment_id, ..self }
    }

    pub fn position(&self) -> Ned {
        self.position
    }
    pub fn color(&self) -> Rgb {
        self.color
    }
    pub fn brightness(&self) -> f64 {
        self.brightness
    }
    pub fn hold_time(&self) -> Seconds {
        self.hold_time
    }
    /// Saturates for hold times too large to represent.
    pub fn hold(&self) -> std::time::Duration {
        std::time::Duration::try_from_secs_f64(self.hold_time).unwrap_or(std::time::Duration::MAX)
    }
    pub fn yaw_deg(&self) -> Degrees {
        self.yaw_deg
    }
    pub fn segment_id(&self) -> SegmentId {
        self.segment_id
    }
}

impl std::fmt::Display for Waypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} hold {:.2}s seg {}",
            self.position, self.color, self.hold_time, self.segment_id
        )
    }
}
