use super::*;
use std::collections::HashSet;

/// Integer grid cell of a coordinate triple.
pub type Voxel = [i64; 3];

pub fn voxel(xyz: &[f64; 3], density: f64) -> Voxel {
    xyz.map(|c| (c / density).floor() as i64)
}

impl PointCloud {
    /// Keep the first point (in cloud order) of every occupied `density`-sized
    /// cell. Relative order of the survivors is preserved; `density <= 0` keeps all.
    pub fn downsample(self, density: f64) -> Self {
        if density <= 0.0 {
            return self;
        }
        let before = self.len();
        let mut seen = HashSet::<Voxel>::with_capacity(before);
        let kept = self
            .into_iter()
            .filter(|p| seen.insert(voxel(&p.xyz, density)))
            .collect::<Self>();
        log::info!(
            "[pointcloud] downsampled {} -> {} points (density {}m)",
            before,
            kept.len(),
            density
        );
        kept
    }
}
