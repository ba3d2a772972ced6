use crate::executor::ExecutorConfig;
use crate::flight::SimConfig;
use crate::patterns::Pattern;
use crate::patterns::PatternConfig;
use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Fixed pauses of the mission script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionTiming {
    /// Hover after takeoff before the path starts.
    #[serde(with = "crate::millis")]
    pub stabilize: Duration,
    /// Hover after the path drains.
    #[serde(with = "crate::millis")]
    pub linger: Duration,
    /// Wait between the land command and disarming.
    #[serde(with = "crate::millis")]
    pub landing: Duration,
}

impl Default for MissionTiming {
    fn default() -> Self {
        Self {
            stabilize: crate::STABILIZE_DELAY,
            linger: crate::LINGER_DELAY,
            landing: crate::LANDING_DELAY,
        }
    }
}

/// Everything a flight needs, loadable from a JSON file.
///
/// ```json
/// {
///   "pattern": { "kind": "spiral", "turns": 2 },
///   "center": [0.0, 0.0, -8.0],
///   "scale": 2.0,
///   "hold_time": 0.5,
///   "executor": { "tolerance": 0.3 },
///   "timing": { "stabilize": 3000 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub pattern: Pattern,
    #[serde(flatten)]
    pub shape: PatternConfig,
    pub executor: ExecutorConfig,
    pub timing: MissionTiming,
    pub sim: SimConfig,
}

impl MissionConfig {
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening config {}", path.display()))?;
        let config = serde_json::from_reader::<_, Self>(std::io::BufReader::new(file))
            .with_context(|| format!("parsing config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("checking config {}", path.display()))?;
        Ok(config)
    }

    /// Reject values that would stall or panic the tick loop, the simulator or the generators.
    pub fn validate(&self) -> anyhow::Result<()> {
        let finite = |name: &str, v: f64| {
            anyhow::ensure!(v.is_finite(), "{} must be finite, got {}", name, v);
            Ok(())
        };
        let positive = |name: &str, v: f64| {
            anyhow::ensure!(v > 0.0, "{} must be positive, got {}", name, v);
            finite(name, v)
        };
        anyhow::ensure!(!self.executor.tick.is_zero(), "executor.tick must be non-zero");
        anyhow::ensure!(!self.sim.rate.is_zero(), "sim.rate must be non-zero");
        positive("executor.tolerance", self.executor.tolerance)?;
        positive("sim.speed", self.sim.speed)?;
        finite("sim.takeoff_altitude", self.sim.takeoff_altitude)?;
        finite("sim.noise", self.sim.noise)?;
        finite("scale", self.shape.scale)?;
        finite("hold_time", self.shape.hold_time)?;
        let center: [f64; 3] = self.shape.center.into();
        center.into_iter().try_for_each(|c| finite("center", c))?;
        if let Pattern::Pointcloud { ref sampling, .. } = self.pattern {
            finite("density", sampling.density)?;
            finite("depth_scale", sampling.depth_scale)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::Ned;

    #[test]
    fn empty_json_is_default() {
        let config = serde_json::from_str::<MissionConfig>("{}").unwrap();
        assert_eq!(config, MissionConfig::default());
        assert_eq!(config.pattern, Pattern::Smiley);
        assert_eq!(config.timing.landing, Duration::from_secs(10));
    }

    #[test]
    fn nested_overrides() {
        let config = serde_json::from_str::<MissionConfig>(
            r#"{
                "pattern": { "kind": "spiral", "turns": 2 },
                "center": [1.0, 2.0, -8.0],
                "scale": 2.0,
                "timing": { "stabilize": 3000 },
                "sim": { "speed": 6.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.pattern,
            Pattern::Spiral {
                turns: 2,
                points_per_turn: crate::SPIRAL_POINTS_PER_TURN
            }
        );
        assert_eq!(config.shape.center, Ned::new(1.0, 2.0, -8.0));
        assert_eq!(config.shape.scale, 2.0);
        assert_eq!(config.shape.hold_time, crate::DEFAULT_HOLD_TIME);
        assert_eq!(config.timing.stabilize, Duration::from_secs(3));
        assert_eq!(config.timing.linger, Duration::from_secs(2));
        assert_eq!(config.sim.speed, 6.0);
    }

    #[test]
    fn pointcloud_sampling_inline() {
        let config = serde_json::from_str::<MissionConfig>(
            r#"{ "pattern": { "kind": "pointcloud", "source": "cloud.ply", "density": 0.2, "spatial_sort": true } }"#,
        )
        .unwrap();
        match config.pattern {
            Pattern::Pointcloud { source, sampling } => {
                assert_eq!(source, std::path::PathBuf::from("cloud.ply"));
                assert_eq!(sampling.density, 0.2);
                assert_eq!(sampling.depth_scale, 0.0);
                assert!(sampling.spatial_sort);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(MissionConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_periods_rejected() {
        let config = serde_json::from_str::<MissionConfig>(r#"{ "executor": { "tick": 0 } }"#).unwrap();
        assert!(config.validate().unwrap_err().to_string().contains("executor.tick"));
        let config = serde_json::from_str::<MissionConfig>(r#"{ "sim": { "rate": 0 } }"#).unwrap();
        assert!(config.validate().unwrap_err().to_string().contains("sim.rate"));
    }

    #[test]
    fn non_finite_values_rejected() {
        let config = MissionConfig {
            shape: PatternConfig::default().with_hold(f64::INFINITY),
            ..MissionConfig::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("hold_time"));
        let mut config = MissionConfig::default();
        config.shape.scale = f64::NAN;
        assert!(config.validate().is_err());
        config.shape.scale = 1.0;
        config.executor.tolerance = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_validates() {
        let path = std::env::temp_dir().join(format!("skypaint-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "executor": { "tick": 0 } }"#).unwrap();
        let err = MissionConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{:#}", err).contains("executor.tick"));
    }

    #[test]
    fn missing_file_has_context() {
        let err = MissionConfig::load(std::path::Path::new("/nonexistent/mission.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/mission.json"));
    }
}
