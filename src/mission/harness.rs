use super::*;
use crate::executor::Executor;
use crate::flight::Flight;
use crate::flight::Light;
use crate::flight::Positions;
use crate::patterns::PatternError;
use crate::waypoint::Path;
use anyhow::Context;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::AbortHandle;

/// Wires one vehicle, one light and one executor into a flight.
pub struct Harness {
    flight: Arc<dyn Flight>,
    light: Arc<dyn Light>,
    executor: Arc<Executor>,
    config: MissionConfig,
}

impl Harness {
    pub fn new(flight: Arc<dyn Flight>, light: Arc<dyn Light>, config: MissionConfig) -> Self {
        let executor = Arc::new(Executor::new(
            flight.clone(),
            light.clone(),
            config.executor,
        ));
        Self {
            flight,
            light,
            executor,
            config,
        }
    }

    pub fn executor(&self) -> &Arc<Executor> {
        &self.executor
    }

    /// The configured pattern, generated without touching the vehicle.
    pub fn path(&self) -> Result<Path, PatternError> {
        self.config.pattern.generate(&self.config.shape)
    }

    /// Generate, connect, then run the mission alongside the tick loop and telemetry.
    ///
    /// Configuration and pattern errors surface before connecting. A pattern without waypoints
    /// is not worth a takeoff and is skipped.
    pub async fn fly(&self) -> anyhow::Result<()> {
        self.config.validate().context("invalid mission config")?;
        let path = self
            .path()
            .with_context(|| format!("generating {} pattern", self.config.pattern.name()))?;
        if path.is_empty() {
            log::warn!(
                "[mission] {} pattern produced no waypoints, staying on the ground",
                self.config.pattern.name()
            );
            return Ok(());
        }
        self.flight.connect().await.context("connect")?;
        log::info!("[mission] connected");
        let tasks = self.spawn();
        let mission = Mission::new(
            self.flight.clone(),
            self.light.clone(),
            self.executor.clone(),
            self.config.timing,
        );
        let result = mission.run(path).await;
        tasks.iter().for_each(AbortHandle::abort);
        result
    }

    fn spawn(&self) -> Vec<AbortHandle> {
        let ticker = self.executor.clone();
        let telemetry = telemetry(self.executor.clone(), self.flight.positions());
        vec![
            tokio::spawn(async move { ticker.run().await }).abort_handle(),
            tokio::spawn(telemetry).abort_handle(),
        ]
    }
}

/// Forward every position sample into the executor until the stream ends.
/// The last sample stays in place afterwards.
pub async fn telemetry(executor: Arc<Executor>, mut positions: Positions) {
    let mut samples = 0usize;
    while let Some(ned) = positions.next().await {
        executor.update_position(ned);
        samples += 1;
    }
    match executor.position() {
        Some(last) => log::warn!("[telemetry] stream ended after {} samples at {}", samples, last),
        None => log::warn!("[telemetry] stream ended without a sample"),
    }
}
