use super::*;
use crate::waypoint::*;
use std::f64::consts::TAU;

const RADIUS: f64 = 1.5;
const RISE: f64 = 4.0;

/// Helix rising from `center` while circling in the north/east plane.
///
/// `turns * points_per_turn` samples spread evenly over `t` in [0, 1]; the
/// vehicle climbs `4 * scale` over the full helix, so `down` never increases
/// along the path. Color sweeps the full hue circle as one continuous stroke.
pub fn spiral(config: &PatternConfig, turns: usize, points_per_turn: usize) -> Path {
    let total = turns * points_per_turn;
    let radius = RADIUS * config.scale;
    let rise = RISE * config.scale;
    (0..total)
        .map(|i| match total {
            1 => 0.0,
            _ => i as f64 / (total - 1) as f64,
        })
        .map(|t| {
            let angle = t * turns as f64 * TAU;
            let position = config
                .center
                .offset(radius * angle.cos(), radius * angle.sin(), -t * rise);
            config.waypoint(position, Rgb::from_hsv(t * 360.0, 1.0, 1.0))
        })
        .collect()
}
