use super::*;
use crate::patterns::PatternConfig;
use crate::patterns::PatternError;
use crate::waypoint::*;

/// The normalize → downsample → sort → map pipeline for one configuration.
pub struct Pipeline<'a> {
    config: &'a PatternConfig,
    sampling: &'a Sampling,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a PatternConfig, sampling: &'a Sampling) -> Self {
        Self { config, sampling }
    }

    /// Run every stage on an in-memory cloud.
    /// An empty cloud produces an empty path.
    pub fn run(&self, cloud: PointCloud) -> Path {
        let cloud = cloud
            .normalize_colors()
            .center_and_scale(self.config.scale)
            .downsample(self.sampling.density);
        let cloud = if self.sampling.spatial_sort {
            cloud.zigzag(self.sampling.row_width())
        } else {
            cloud
        };
        let path = self.project(&cloud);
        log::info!("[pointcloud] generated {} waypoints", path.len());
        path
    }

    /// Map cloud axes into NED around the configured center.
    /// x → north, y → up (negative down), normalized depth → east relief.
    fn project(&self, cloud: &PointCloud) -> Path {
        let center = self.config.center;
        let relief = self.sampling.depth_scale;
        let (near, far) = cloud.bounds(DEPTH).unwrap_or_default();
        let span = far - near + crate::DEPTH_EPSILON;
        cloud
            .iter()
            .map(|p| {
                let east = if relief == 0.0 {
                    center.east
                } else {
                    center.east + relief * (p.z() - near) / span
                };
                let position = Ned::new(center.north + p.x(), east, center.down - p.y());
                self.config.waypoint(position, p.rgb).with_segment(0)
            })
            .collect()
    }
}

/// Load `source` and turn it into a path.
/// Missing files fail with [`PatternError::NotFound`] before anything else happens.
pub fn generate(
    source: &std::path::Path,
    config: &PatternConfig,
    sampling: &Sampling,
) -> Result<Path, PatternError> {
    let cloud = PointCloud::load(source, config.default_color)?;
    if cloud.is_empty() {
        log::warn!("[pointcloud] {} holds no points", source.display());
    }
    Ok(Pipeline::new(config, sampling).run(cloud))
}
