use super::*;
use crate::executor::Executor;
use crate::flight::Flight;
use crate::flight::Light;
use crate::waypoint::Path;
use crate::waypoint::Rgb;
use anyhow::Context;
use std::sync::Arc;

/// The fixed takeoff → paint → land sequence.
///
/// Talks to the executor only through its public operations; the tick loop
/// and telemetry are somebody else's tasks.
pub struct Mission {
    flight: Arc<dyn Flight>,
    light: Arc<dyn Light>,
    executor: Arc<Executor>,
    timing: MissionTiming,
}

impl Mission {
    pub fn new(
        flight: Arc<dyn Flight>,
        light: Arc<dyn Light>,
        executor: Arc<Executor>,
        timing: MissionTiming,
    ) -> Self {
        Self {
            flight,
            light,
            executor,
            timing,
        }
    }

    /// Fly `path`. Any failed vehicle command aborts the rest of the script.
    pub async fn run(&self, path: Path) -> anyhow::Result<()> {
        log::info!("[mission] waiting for vehicle");
        self.flight.ready().await.context("vehicle never became ready")?;
        log::info!("[mission] arming");
        self.flight.arm().await.context("arm")?;

        self.signal(Rgb::RED, true);
        log::info!("[mission] taking off");
        self.flight.takeoff().await.context("takeoff")?;
        self.signal(Rgb::GREEN, false);
        tokio::time::sleep(self.timing.stabilize).await;

        log::info!("[mission] painting {} waypoints", path.len());
        self.executor.enable_path(path);
        self.executor.wait_until_disabled().await;
        tokio::time::sleep(self.timing.linger).await;

        self.light.set_color(Rgb::BLUE);
        log::info!("[mission] landing");
        self.flight.land().await.context("land")?;
        tokio::time::sleep(self.timing.landing).await;

        log::info!("[mission] disarming");
        self.flight.disarm().await.context("disarm")?;
        self.light.set_on(false);
        log::info!("[mission] complete");
        Ok(())
    }

    fn signal(&self, rgb: Rgb, on: bool) {
        self.light.set_color(rgb);
        self.light.set_on(on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ExecutorConfig;
    use crate::flight::*;
    use crate::waypoint::*;
    use futures::StreamExt;

    fn mission(recorder: &Arc<Recorder>) -> (Mission, Arc<Executor>) {
        let executor = Arc::new(Executor::new(
            recorder.clone(),
            recorder.clone(),
            ExecutorConfig::default(),
        ));
        let mission = Mission::new(
            recorder.clone(),
            recorder.clone(),
            executor.clone(),
            MissionTiming::default(),
        );
        (mission, executor)
    }

    fn path() -> Path {
        Path::from(vec![
            Waypoint::new(Ned::new(1.0, 0.0, -5.0), Rgb::YELLOW, 1.0),
            Waypoint::new(Ned::new(2.0, 0.0, -5.0), Rgb::YELLOW, 1.0),
        ])
    }

    fn spawn(recorder: &Arc<Recorder>, executor: &Arc<Executor>) -> Vec<tokio::task::AbortHandle> {
        let runner = executor.clone();
        let feed = executor.clone();
        let mut positions = recorder.positions();
        vec![
            tokio::spawn(async move { runner.run().await }).abort_handle(),
            tokio::spawn(async move {
                while let Some(ned) = positions.next().await {
                    feed.update_position(ned);
                }
            })
            .abort_handle(),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn full_sequence() {
        let ref recorder = Arc::new(Recorder::default());
        let (mission, executor) = mission(recorder);
        let tasks = spawn(recorder, &executor);
        mission.run(path()).await.unwrap();
        tasks.iter().for_each(|t| t.abort());

        let flight = recorder
            .calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::Ready | Call::Arm | Call::Takeoff | Call::Land | Call::Disarm | Call::Goto(..)
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            flight,
            vec![
                Call::Ready,
                Call::Arm,
                Call::Takeoff,
                Call::Goto(Ned::new(1.0, 0.0, -5.0), 0.0),
                Call::Goto(Ned::new(2.0, 0.0, -5.0), 0.0),
                Call::Land,
                Call::Disarm,
            ]
        );
        let calls = recorder.calls();
        assert_eq!(calls.get(2), Some(&Call::Color(Rgb::RED)));
        assert_eq!(calls.get(3), Some(&Call::On(true)));
        assert_eq!(calls[calls.len() - 2..], [Call::Disarm, Call::On(false)]);
        assert!(calls.contains(&Call::Color(Rgb::BLUE)));
        assert!(!executor.enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn lands_after_fixed_delays() {
        let ref recorder = Arc::new(Recorder::default());
        let (mission, executor) = mission(recorder);
        let tasks = spawn(recorder, &executor);
        let start = tokio::time::Instant::now();
        mission.run(Path::new()).await.unwrap();
        tasks.iter().for_each(|t| t.abort());
        let elapsed = start.elapsed();
        let floor = crate::STABILIZE_DELAY + crate::SETTLE_DELAY + crate::LINGER_DELAY + crate::LANDING_DELAY;
        assert!(elapsed >= floor);
        assert!(elapsed < floor + std::time::Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn arm_failure_aborts() {
        let ref recorder = Arc::new(Recorder::default());
        recorder.fail(Call::Arm, 1);
        let (mission, _) = mission(recorder);
        let err = mission.run(path()).await.unwrap_err();
        assert!(err.to_string().contains("arm"));
        assert_eq!(recorder.calls(), vec![Call::Ready, Call::Arm]);
    }

    #[tokio::test(start_paused = true)]
    async fn land_failure_skips_disarm() {
        let ref recorder = Arc::new(Recorder::default());
        recorder.fail(Call::Land, 1);
        let (mission, executor) = mission(recorder);
        let tasks = spawn(recorder, &executor);
        assert!(mission.run(path()).await.is_err());
        tasks.iter().for_each(|t| t.abort());
        assert_eq!(recorder.count(|c| *c == Call::Disarm), 0);
        assert_eq!(recorder.gotos().len(), 2);
    }
}
