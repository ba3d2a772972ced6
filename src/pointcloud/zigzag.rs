use super::*;
use std::collections::BTreeMap;

impl PointCloud {
    /// Boustrophedon ordering for lawnmower-style traversal.
    ///
    /// Points are binned into rows of `width` along the vertical axis (one
    /// row when the vertical extent is below `width`), sorted by the
    /// horizontal axis within a row, and every odd row is reversed. Rows are
    /// emitted in ascending bin order.
    pub fn zigzag(self, width: f64) -> Self {
        let Some((lo, hi)) = self.bounds(VERTICAL) else {
            return self;
        };
        let single = width.is_nan() || width <= 0.0 || hi - lo < width;
        let mut rows = BTreeMap::<i64, Vec<Point>>::new();
        for point in self.into_iter() {
            let bin = if single {
                0
            } else {
                ((point.y() - lo) / width).floor() as i64
            };
            rows.entry(bin).or_default().push(point);
        }
        log::debug!("[pointcloud] zig-zag over {} rows", rows.len());
        rows.into_values()
            .enumerate()
            .flat_map(|(i, mut row)| {
                row.sort_by(|a, b| a.x().total_cmp(&b.x()));
                if i % 2 == 1 {
                    row.reverse();
                }
                row
            })
            .collect()
    }
}
