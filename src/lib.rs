//! Light-painting flights for a single vehicle.
//!
//! Patterns (parametric shapes or an external point cloud) become an ordered
//! [`waypoint::Path`], which the [`executor::Executor`] drives against the
//! vehicle's asynchronously arriving telemetry while the onboard light is
//! switched on at every stop.
//!
//! ## Modules
//!
//! - [`waypoint`]: positions, colors, waypoints and paths
//! - [`patterns`]: smiley, spiral and square generators, pattern registry
//! - [`pointcloud`]: PLY loading and the normalize/downsample/sort/map pipeline
//! - [`executor`]: the waypoint state machine
//! - [`flight`]: flight and light capabilities, simulated vehicle
//! - [`mission`]: mission script, configuration and task harness
pub mod executor;
pub mod flight;
pub mod mission;
pub mod patterns;
pub mod pointcloud;
pub mod waypoint;

use std::time::Duration;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Distances and coordinates in meters.
pub type Meters = f64;
/// Durations expressed as float seconds (hold times, delays in config files).
pub type Seconds = f64;
/// Headings in degrees, clockwise from north.
pub type Degrees = f64;

// ============================================================================
// EXECUTOR
// ============================================================================
/// Period of the fixed-rate tick loop.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
/// A waypoint counts as reached once the vehicle is strictly closer than this.
pub const ARRIVAL_TOLERANCE: Meters = 0.25;
/// Initial delay in `wait_until_disabled`, guards against a just-issued `enable_path`.
pub const SETTLE_DELAY: Duration = Duration::from_secs(1);

// ============================================================================
// MISSION TIMING
// ============================================================================
/// Hover time after takeoff before the path starts.
pub const STABILIZE_DELAY: Duration = Duration::from_secs(5);
/// Hover time after the path drains before landing.
pub const LINGER_DELAY: Duration = Duration::from_secs(2);
/// Time allowed for the landing before disarming.
pub const LANDING_DELAY: Duration = Duration::from_secs(10);

// ============================================================================
// PATTERN DEFAULTS
// ============================================================================
/// Default pattern center: ten meters above home.
pub const DEFAULT_CENTER: [Meters; 3] = [0.0, 0.0, -10.0];
/// Default per-waypoint dwell.
pub const DEFAULT_HOLD_TIME: Seconds = 1.0;
/// Default spiral revolutions.
pub const SPIRAL_TURNS: usize = 3;
/// Default spiral samples per revolution.
pub const SPIRAL_POINTS_PER_TURN: usize = 16;
/// Default square side length before scaling.
pub const SQUARE_SIZE: Meters = 4.0;
/// Default square samples per side.
pub const SQUARE_POINTS_PER_SIDE: usize = 8;
/// Default minimum spacing between pointcloud waypoints.
pub const POINTCLOUD_DENSITY: Meters = 0.1;
/// Row bin width of the zig-zag sort, as a multiple of the density.
pub const ZIGZAG_ROW_FACTOR: f64 = 1.5;
/// Keeps the depth normalization finite on flat clouds.
pub const DEPTH_EPSILON: f64 = 1e-8;

// ============================================================================
// SIMULATOR
// ============================================================================
/// Cruise speed of the simulated vehicle (m/s).
pub const SIM_SPEED: f64 = 4.0;
/// Publication period of simulated position samples.
pub const SIM_RATE: Duration = Duration::from_millis(50);

// ============================================================================
// SERDE HELPERS
// ============================================================================
/// (De)serialize a `Duration` as integer milliseconds.
pub mod millis {
    use serde::Deserialize;
    use std::time::Duration;

    pub fn serialize<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
    pub fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// Shutdown is process level: no loop observes a cancellation token.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
