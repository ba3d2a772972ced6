//! skypaint Binary
//!
//! Generates a light-painting pattern and flies it against the simulated vehicle.
//! With `--dump`, prints the generated waypoints as JSON and exits instead.

use clap::Parser;
use skypaint::flight::*;
use skypaint::mission::*;
use skypaint::patterns::Pattern;
use skypaint::waypoint::Ned;
use skypaint::*;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, help = "JSON mission configuration; flags below override it")]
    config: Option<PathBuf>,
    #[arg(long, help = "Pattern to fly: smiley | spiral | square | pointcloud")]
    pattern: Option<Pattern>,
    #[arg(long, help = "PLY source (implies the pointcloud pattern)")]
    ply: Option<PathBuf>,
    #[arg(
        long,
        num_args = 3,
        value_names = ["NORTH", "EAST", "DOWN"],
        allow_negative_numbers = true,
        help = "Pattern center in the local NED frame (meters)"
    )]
    center: Option<Vec<f64>>,
    #[arg(long, help = "Pattern scale (meters)")]
    scale: Option<f64>,
    #[arg(long, help = "Minimum spacing between pointcloud waypoints (meters)")]
    density: Option<f64>,
    #[arg(long, help = "Depth relief of pointcloud patterns (0 = flat)")]
    depth_scale: Option<f64>,
    #[arg(long, help = "Dwell per waypoint (seconds)")]
    hold_time: Option<f64>,
    #[arg(long, help = "Zig-zag sort pointcloud waypoints")]
    spatial_sort: bool,
    #[arg(long, help = "Print the generated waypoints as JSON and exit")]
    dump: bool,
}

impl Args {
    /// Layer command line overrides on top of the config file (or defaults).
    fn resolve(&self) -> anyhow::Result<MissionConfig> {
        let mut config = match self.config {
            Some(ref path) => MissionConfig::load(path)?,
            None => MissionConfig::default(),
        };
        if let Some(ref pattern) = self.pattern {
            config.pattern = pattern.clone();
        }
        if let Some([north, east, down]) = self.center.as_deref() {
            config.shape.center = Ned::new(*north, *east, *down);
        }
        if let Some(scale) = self.scale {
            config.shape.scale = scale;
        }
        if let Some(hold_time) = self.hold_time {
            config.shape.hold_time = hold_time;
        }
        if let Some(ref ply) = self.ply {
            config.pattern = match config.pattern {
                Pattern::Pointcloud { sampling, .. } => Pattern::Pointcloud {
                    source: ply.clone(),
                    sampling,
                },
                _ => Pattern::Pointcloud {
                    source: ply.clone(),
                    sampling: Default::default(),
                },
            };
        }
        match config.pattern {
            Pattern::Pointcloud {
                ref source,
                ref mut sampling,
            } => {
                if source.as_os_str().is_empty() {
                    anyhow::bail!("pointcloud pattern needs --ply or a source in the config");
                }
                if let Some(density) = self.density {
                    sampling.density = density;
                }
                if let Some(depth_scale) = self.depth_scale {
                    sampling.depth_scale = depth_scale;
                }
                sampling.spatial_sort |= self.spatial_sort;
            }
            _ if self.density.is_some() || self.depth_scale.is_some() || self.spatial_sort => {
                log::warn!("pointcloud sampling flags ignored for the {} pattern", config.pattern.name());
            }
            _ => {}
        }
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if !args.dump {
        log()?;
        kys();
    }
    let config = args.resolve()?;
    config.validate()?;
    if args.dump {
        let path = config.pattern.generate(&config.shape)?;
        println!("{}", serde_json::to_string_pretty(&path)?);
        return Ok(());
    }
    let sim = Arc::new(SimFlight::new(config.sim));
    let lamp = Arc::new(Lamp::default());
    Harness::new(sim, lamp, config).fly().await
}
