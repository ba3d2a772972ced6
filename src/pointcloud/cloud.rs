use super::*;
use crate::waypoint::Rgb;

/// Ordered point cloud; every point carries its own color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud(Vec<Point>);

impl PointCloud {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn points(&self) -> &[Point] {
        &self.0
    }
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    /// Mean position, or the origin for an empty cloud.
    pub fn centroid(&self) -> [f64; 3] {
        if self.0.is_empty() {
            return [0.0; 3];
        }
        let n = self.0.len() as f64;
        let mut sum = [0.0; 3];
        for point in self.0.iter() {
            for (s, c) in sum.iter_mut().zip(point.xyz) {
                *s += c;
            }
        }
        sum.map(|s| s / n)
    }
    /// Largest absolute coordinate over all axes.
    pub fn max_abs(&self) -> f64 {
        self.0
            .iter()
            .flat_map(|p| p.xyz)
            .map(f64::abs)
            .fold(0.0, f64::max)
    }
    /// (min, max) along one axis, `None` when empty.
    pub fn bounds(&self, axis: usize) -> Option<(f64, f64)> {
        self.0.iter().map(|p| p.xyz[axis]).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Colors stored as 0–255 (any channel above 1.0) are rescaled to [0, 1].
    pub fn normalize_colors(self) -> Self {
        let max = self.0.iter().map(|p| p.rgb.max()).fold(0.0, f64::max);
        if max > 1.0 {
            log::debug!("[pointcloud] colors look 8-bit (max {}), rescaling", max);
            self.map(|p| Point::new(p.xyz, Rgb::new(p.rgb.r / 255.0, p.rgb.g / 255.0, p.rgb.b / 255.0)))
        } else {
            self
        }
    }
    /// Translate the centroid to the origin, then scale so the largest
    /// absolute coordinate equals `scale`. Degenerate clouds are only centered.
    pub fn center_and_scale(self, scale: f64) -> Self {
        let centroid = self.centroid();
        let centered = self.map(|p| {
            Point::new(
                [
                    p.xyz[0] - centroid[0],
                    p.xyz[1] - centroid[1],
                    p.xyz[2] - centroid[2],
                ],
                p.rgb,
            )
        });
        match centered.max_abs() {
            extent if extent > 0.0 => {
                let k = scale / extent;
                centered.map(|p| Point::new(p.xyz.map(|c| c * k), p.rgb))
            }
            _ => centered,
        }
    }

    fn map<F>(self, f: F) -> Self
    where
        F: Fn(Point) -> Point,
    {
        Self(self.0.into_iter().map(f).collect())
    }
}

impl From<Vec<Point>> for PointCloud {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}
impl From<PointCloud> for Vec<Point> {
    fn from(cloud: PointCloud) -> Self {
        cloud.0
    }
}
impl FromIterator<Point> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl IntoIterator for PointCloud {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
