use crate::Meters;
use serde::Deserialize;
use serde::Serialize;

/// How a point cloud is thinned, ordered and projected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sampling {
    /// Minimum spacing between kept points, in output meters. Zero or less keeps every point.
    pub density: Meters,
    /// East-axis relief range. Zero flattens the cloud onto the north/down plane.
    pub depth_scale: Meters,
    /// Reorder points row by row in alternating directions.
    pub spatial_sort: bool,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            density: crate::POINTCLOUD_DENSITY,
            depth_scale: 0.0,
            spatial_sort: false,
        }
    }
}

impl Sampling {
    /// Row bin width of the zig-zag sort.
    pub fn row_width(&self) -> Meters {
        self.density * crate::ZIGZAG_ROW_FACTOR
    }
}
