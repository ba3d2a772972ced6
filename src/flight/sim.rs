use super::*;
use crate::Degrees;
use crate::waypoint::Ned;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;
use tokio::time::Instant;

/// Commands a [`SimFlight`] can be told to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Connect,
    Ready,
    Arm,
    Takeoff,
    Land,
    Disarm,
    Goto,
}

/// Tunables of the simulated vehicle.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Cruise speed toward the setpoint (m/s).
    pub speed: f64,
    /// Period between published position samples.
    #[serde(with = "crate::millis")]
    pub rate: Duration,
    /// Height reached by `takeoff`, meters above home.
    pub takeoff_altitude: f64,
    /// Uniform jitter added to each published sample (meters per axis).
    pub noise: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed: crate::SIM_SPEED,
            rate: crate::SIM_RATE,
            takeoff_altitude: 2.5,
            noise: 0.0,
        }
    }
}

/// Point-mass kinematics shared between command calls and sample streams.
#[derive(Debug)]
struct Vehicle {
    connected: bool,
    armed: bool,
    offboard: bool,
    position: Ned,
    setpoint: Ned,
    yaw: Degrees,
    clock: Instant,
}

impl Vehicle {
    /// Integrate motion toward the setpoint up to `now`.
    fn advance(&mut self, now: Instant, speed: f64) {
        let dt = now.saturating_duration_since(self.clock).as_secs_f64();
        self.clock = now;
        let gap = self.position.distance(&self.setpoint);
        let step = speed * dt;
        self.position = if step >= gap || gap == 0.0 {
            self.setpoint
        } else {
            self.position.lerp(&self.setpoint, step / gap)
        };
    }
}

/// Simulated vehicle flying straight lines toward its setpoint.
///
/// Commands are accepted immediately; motion happens in (tokio) time.
/// Individual commands can be made to fail with [`SimFlight::reject`].
#[derive(Debug, Clone)]
pub struct SimFlight {
    config: SimConfig,
    vehicle: Arc<Mutex<Vehicle>>,
    rejected: Arc<Mutex<HashSet<Command>>>,
}

impl Default for SimFlight {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl SimFlight {
    pub fn new(config: SimConfig) -> Self {
        let home = Ned::default();
        Self {
            config,
            vehicle: Arc::new(Mutex::new(Vehicle {
                connected: false,
                armed: false,
                offboard: false,
                position: home,
                setpoint: home,
                yaw: 0.0,
                clock: Instant::now(),
            })),
            rejected: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Make every subsequent `command` fail.
    pub fn reject(&self, command: Command) {
        self.rejected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(command);
    }
    /// Undo a previous [`SimFlight::reject`].
    pub fn accept(&self, command: Command) {
        self.rejected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&command);
    }

    /// Current true position (no jitter).
    pub fn position(&self) -> Ned {
        self.with(|v, _| v.position)
    }
    pub fn setpoint(&self) -> Ned {
        self.with(|v, _| v.setpoint)
    }
    pub fn armed(&self) -> bool {
        self.with(|v, _| v.armed)
    }
    pub fn offboard(&self) -> bool {
        self.with(|v, _| v.offboard)
    }
    pub fn yaw(&self) -> Degrees {
        self.with(|v, _| v.yaw)
    }

    fn with<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut Vehicle, &SimConfig) -> T,
    {
        let mut vehicle = self.vehicle.lock().unwrap_or_else(PoisonError::into_inner);
        vehicle.advance(Instant::now(), self.config.speed);
        f(&mut *vehicle, &self.config)
    }

    /// Gate a command on the rejection set, then apply it.
    fn command<F>(&self, command: Command, f: F) -> Result<(), FlightError>
    where
        F: FnOnce(&mut Vehicle, &SimConfig) -> Result<(), FlightError>,
    {
        if self
            .rejected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&command)
        {
            log::warn!("[sim] rejecting {:?}", command);
            return Err(FlightError::CommandFailed(format!("{:?} rejected", command)));
        }
        self.with(|v, c| {
            if !v.connected && command != Command::Connect {
                return Err(FlightError::Disconnected);
            }
            f(v, c)?;
            log::debug!("[sim] {:?} -> setpoint {}", command, v.setpoint);
            Ok(())
        })
    }
}

fn refuse(reason: &str) -> Result<(), FlightError> {
    Err(FlightError::CommandFailed(reason.to_string()))
}

#[async_trait::async_trait]
impl Flight for SimFlight {
    async fn connect(&self) -> Result<(), FlightError> {
        self.command(Command::Connect, |v, _| {
            v.connected = true;
            Ok(())
        })
    }
    async fn ready(&self) -> Result<(), FlightError> {
        self.command(Command::Ready, |_, _| Ok(()))
    }
    async fn arm(&self) -> Result<(), FlightError> {
        self.command(Command::Arm, |v, _| {
            v.armed = true;
            Ok(())
        })
    }
    async fn takeoff(&self) -> Result<(), FlightError> {
        self.command(Command::Takeoff, |v, c| {
            if !v.armed {
                return refuse("takeoff while disarmed");
            }
            v.setpoint = Ned::new(v.position.north, v.position.east, -c.takeoff_altitude);
            Ok(())
        })
    }
    async fn land(&self) -> Result<(), FlightError> {
        self.command(Command::Land, |v, _| {
            v.offboard = false;
            v.setpoint = Ned::new(v.position.north, v.position.east, 0.0);
            Ok(())
        })
    }
    async fn disarm(&self) -> Result<(), FlightError> {
        self.command(Command::Disarm, |v, _| {
            v.armed = false;
            v.offboard = false;
            Ok(())
        })
    }
    async fn goto_and_start(&self, target: Ned, yaw_deg: Degrees) -> Result<(), FlightError> {
        self.command(Command::Goto, |v, _| {
            if !v.armed {
                return refuse("offboard while disarmed");
            }
            v.offboard = true;
            v.setpoint = target;
            v.yaw = yaw_deg;
            Ok(())
        })
    }

    /// Samples are published every `rate` until the stream is dropped.
    fn positions(&self) -> Positions {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Ned>();
        let sim = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(sim.config.rate);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let sample = sim.with(|v, c| jitter(v.position, c.noise));
                if tx.send(sample).is_err() {
                    break;
                }
            }
        });
        Box::pin(futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|ned| (ned, rx))
        }))
    }
}

fn jitter(position: Ned, noise: f64) -> Ned {
    if noise <= 0.0 {
        return position;
    }
    let ref mut rng = rand::rng();
    position.offset(
        rng.random_range(-noise..=noise),
        rng.random_range(-noise..=noise),
        rng.random_range(-noise..=noise),
    )
}
