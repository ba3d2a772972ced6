use super::*;
use crate::waypoint::*;
use std::f64::consts::TAU;

const OUTLINE_SAMPLES: usize = 24;
const EYE_SAMPLES: usize = 8;
const SMILE_SAMPLES: usize = 16;
const OUTLINE_RADIUS: f64 = 2.3;
const EYE_RADIUS: f64 = 0.3;
const EYE_SPREAD: f64 = 0.8;
const EYE_HEIGHT: f64 = -1.3;
const SMILE_RADIUS: f64 = 1.2;
const SMILE_DROP: f64 = 1.3;
const SMILE_START_DEG: f64 = 180.0;
const SMILE_STEP_DEG: f64 = 12.0;

/// Smiley face drawn in the north/down plane at `center.east`.
///
/// Four strokes in emission order, each its own segment:
/// outline (24, yellow), left eye (8, blue), right eye (8, blue), smile (16, red).
/// Eyes sit above the center (more negative down), the smile below it.
pub fn smiley(config: &PatternConfig) -> Path {
    let s = config.scale;
    let c = config.center;
    let full = |n: usize| (0..n).map(move |i| i as f64 / n as f64 * TAU);
    let smile = (0..SMILE_SAMPLES).map(|i| (SMILE_START_DEG + i as f64 * SMILE_STEP_DEG).to_radians());
    let strokes: [(Ned, f64, Rgb, Vec<f64>); 4] = [
        (c, OUTLINE_RADIUS * s, Rgb::YELLOW, full(OUTLINE_SAMPLES).collect()),
        (c.offset(-EYE_SPREAD * s, 0.0, EYE_HEIGHT * s), EYE_RADIUS * s, Rgb::BLUE, full(EYE_SAMPLES).collect()),
        (c.offset(EYE_SPREAD * s, 0.0, EYE_HEIGHT * s), EYE_RADIUS * s, Rgb::BLUE, full(EYE_SAMPLES).collect()),
        (c.offset(0.0, 0.0, SMILE_DROP * s), SMILE_RADIUS * s, Rgb::RED, smile.collect()),
    ];
    strokes
        .into_iter()
        .enumerate()
        .flat_map(|(segment, (origin, radius, color, angles))| {
            angles.into_iter().map(move |angle| {
                config
                    .waypoint(arc(origin, radius, angle), color)
                    .with_segment(segment as SegmentId)
            })
        })
        .collect()
}

/// Point on a circle in the north/down plane.
fn arc(origin: Ned, radius: f64, angle: f64) -> Ned {
    origin.offset(radius * angle.cos(), 0.0, radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PatternConfig {
        PatternConfig::new(Ned::new(3.0, -2.0, -10.0), 1.5).with_hold(0.2)
    }

    #[test]
    fn smiley_has_56_waypoints() {
        assert_eq!(smiley(&config()).len(), 56);
    }

    #[test]
    fn smiley_outline_radius() {
        let config = config();
        smiley(&config)
            .iter()
            .take(OUTLINE_SAMPLES)
            .for_each(|w| {
                let r = w.position().distance(&config.center);
                assert!((r - 2.3 * config.scale).abs() < 1e-9);
            });
    }

    #[test]
    fn smiley_segment_runs() {
        let ids = smiley(&config())
            .iter()
            .map(Waypoint::segment_id)
            .collect::<Vec<_>>();
        let mut runs = Vec::<(SegmentId, usize)>::new();
        for id in ids {
            match runs.last_mut() {
                Some((last, n)) if *last == id => *n += 1,
                _ => runs.push((id, 1)),
            }
        }
        assert_eq!(runs, vec![(0, 24), (1, 8), (2, 8), (3, 16)]);
    }

    #[test]
    fn smiley_is_flat_in_east() {
        let config = config();
        assert!(smiley(&config).iter().all(|w| w.position().east == config.center.east));
    }

    #[test]
    fn smiley_colors_and_hold() {
        let path = Vec::<Waypoint>::from(smiley(&config()));
        assert_eq!(path[0].color(), Rgb::YELLOW);
        assert_eq!(path[24].color(), Rgb::BLUE);
        assert_eq!(path[39].color(), Rgb::BLUE);
        assert_eq!(path[40].color(), Rgb::RED);
        assert_eq!(path[55].color(), Rgb::RED);
        assert!(path.iter().all(|w| w.hold_time() == 0.2));
    }

    #[test]
    fn smiley_eyes_above_smile_below() {
        let config = config();
        let path = Vec::<Waypoint>::from(smiley(&config));
        assert!(path[24..40].iter().all(|w| w.position().down < config.center.down));
        assert!(path[40..].iter().all(|w| w.position().down <= config.center.down + 1.3 * config.scale + 1e-9));
        // the smile starts at its leftmost point, level with its own center
        let first = path[40].position();
        assert!((first.north - (config.center.north - 1.2 * config.scale)).abs() < 1e-9);
        assert!((first.down - (config.center.down + 1.3 * config.scale)).abs() < 1e-9);
    }

    #[test]
    fn smiley_is_deterministic() {
        assert_eq!(smiley(&config()), smiley(&config()));
    }
}
