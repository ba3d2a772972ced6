use crate::Meters;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Timing and arrival threshold of an [`super::Executor`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Period of the tick loop.
    #[serde(with = "crate::millis")]
    pub tick: Duration,
    /// Strict distance below which the current target counts as reached.
    pub tolerance: Meters,
    /// Initial sleep of `wait_until_disabled`.
    #[serde(with = "crate::millis")]
    pub settle: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            tick: crate::TICK_INTERVAL,
            tolerance: crate::ARRIVAL_TOLERANCE,
            settle: crate::SETTLE_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = serde_json::from_str::<ExecutorConfig>(r#"{ "tolerance": 0.5 }"#).unwrap();
        assert_eq!(config.tolerance, 0.5);
        assert_eq!(config.tick, Duration::from_millis(100));
        assert_eq!(config.settle, Duration::from_secs(1));
    }

    #[test]
    fn durations_in_millis() {
        let json = serde_json::to_value(ExecutorConfig::default()).unwrap();
        assert_eq!(json["tick"], 100);
        assert_eq!(json["settle"], 1000);
    }
}
