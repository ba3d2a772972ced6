use super::*;
use crate::Meters;
use crate::waypoint::*;

/// Square outline in the north/down plane at `center.east`, in the default color.
///
/// Corners are visited clockwise starting top-left (north-, up). Each edge
/// contributes `points_per_side` samples (at least 2) and omits its trailing
/// corner, which is the next edge's first sample.
pub fn square(config: &PatternConfig, size: Meters, points_per_side: usize) -> Path {
    let n = points_per_side.max(2);
    let half = size * config.scale / 2.0;
    let c = config.center;
    let corners = [
        c.offset(-half, 0.0, -half),
        c.offset(half, 0.0, -half),
        c.offset(half, 0.0, half),
        c.offset(-half, 0.0, half),
    ];
    (0..corners.len())
        .flat_map(|i| {
            let start = corners[i];
            let end = corners[(i + 1) % corners.len()];
            (0..n).map(move |j| start.lerp(&end, j as f64 / n as f64))
        })
        .map(|position| config.waypoint(position, config.default_color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PatternConfig {
        PatternConfig::new(Ned::new(0.0, 1.0, -10.0), 0.5).with_color(Rgb::GREEN)
    }

    #[test]
    fn square_count_and_minimum() {
        assert_eq!(square(&config(), 4.0, 8).len(), 32);
        assert_eq!(square(&config(), 4.0, 0).len(), 8);
    }

    #[test]
    fn square_corners_clockwise() {
        let path = Vec::<Waypoint>::from(square(&config(), 4.0, 4));
        let corner = |i: usize| path[i * 4].position();
        assert_eq!(corner(0), Ned::new(-1.0, 1.0, -11.0));
        assert_eq!(corner(1), Ned::new(1.0, 1.0, -11.0));
        assert_eq!(corner(2), Ned::new(1.0, 1.0, -9.0));
        assert_eq!(corner(3), Ned::new(-1.0, 1.0, -9.0));
    }

    #[test]
    fn square_has_no_duplicates() {
        let path = Vec::<Waypoint>::from(square(&config(), 4.0, 5));
        for (i, a) in path.iter().enumerate() {
            for b in path.iter().skip(i + 1) {
                assert!(a.position().distance(&b.position()) > 1e-9);
            }
        }
    }

    #[test]
    fn square_uniform_color() {
        assert!(square(&config(), 4.0, 8).iter().all(|w| w.color() == Rgb::GREEN));
    }
}
