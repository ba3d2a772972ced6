use super::*;
use crate::flight::Flight;
use crate::flight::Light;
use crate::waypoint::*;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use tokio::sync::watch;

/// Fields mutated together by ticks and by `enable_path`/`command_goto`.
#[derive(Debug, Default)]
struct Inner {
    state: ExecutorState,
    queue: Path,
    current: Option<Waypoint>,
}

/// Drives a vehicle through a [`Path`], one waypoint at a time.
///
/// Shared between the tick loop, the telemetry task and the mission script.
/// - `enabled` and the latest position live in `watch` channels so waiters
///   wake on change and position writes simply overwrite.
/// - queue, phase and current target sit behind a mutex that is never held
///   across an await.
///
/// The in-flight waypoint always finishes (or fails) before a newly enabled
/// path is looked at. There is no timeout on `Goto`: a vehicle that never
/// arrives stalls the path.
pub struct Executor {
    config: ExecutorConfig,
    flight: Arc<dyn Flight>,
    light: Arc<dyn Light>,
    inner: Mutex<Inner>,
    enabled: watch::Sender<bool>,
    position: watch::Sender<Option<Ned>>,
}

impl Executor {
    pub fn new(flight: Arc<dyn Flight>, light: Arc<dyn Light>, config: ExecutorConfig) -> Self {
        Self {
            config,
            flight,
            light,
            inner: Mutex::new(Inner::default()),
            enabled: watch::Sender::new(false),
            position: watch::Sender::new(None),
        }
    }

    /// Tick forever at the configured period. Late ticks are delayed, not bunched.
    pub async fn run(&self) -> ! {
        let mut interval = tokio::time::interval(self.config.tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    /// Advance the state machine by one step.
    pub async fn tick(&self) {
        match self.state() {
            ExecutorState::Hold => self.next_hold(),
            ExecutorState::CommandGoto => self.next_command().await,
            ExecutorState::Goto => self.next_goto(),
            ExecutorState::Reached => self.next_reached().await,
        }
    }
}

impl Executor {
    /// Replace the queue and enable execution. The in-flight waypoint is left alone.
    pub fn enable_path(&self, path: Path) {
        log::info!(
            "[executor] enabling path of {} waypoints ({:.1} m, {:.1} s dwell)",
            path.len(),
            path.length(),
            path.dwell()
        );
        self.lock().queue = path;
        self.enabled.send_replace(true);
    }

    /// Inject a single waypoint. Only accepted while idle in `Hold`.
    pub fn command_goto(&self, waypoint: Waypoint) -> bool {
        let ref mut inner = self.lock();
        if inner.state != ExecutorState::Hold || inner.current.is_some() {
            log::warn!(
                "[executor] ignoring goto {} while {}",
                waypoint.position(),
                inner.state
            );
            return false;
        }
        log::info!("[executor] commanded goto {}", waypoint);
        inner.current = Some(waypoint);
        self.transition(inner, ExecutorState::CommandGoto);
        true
    }

    /// Suspend until the path drains (or is otherwise disabled).
    ///
    /// Sleeps the settle delay first so a caller that just enabled a path
    /// does not return before the first tick has seen it.
    pub async fn wait_until_disabled(&self) {
        tokio::time::sleep(self.config.settle).await;
        let mut rx = self.enabled.subscribe();
        let _ = rx.wait_for(|enabled| !*enabled).await;
    }

    /// Overwrite the latest position sample.
    pub fn update_position(&self, ned: Ned) {
        self.position.send_replace(Some(ned));
    }
}

impl Executor {
    pub fn state(&self) -> ExecutorState {
        self.lock().state
    }
    pub fn current(&self) -> Option<Waypoint> {
        self.lock().current.clone()
    }
    pub fn position(&self) -> Option<Ned> {
        *self.position.borrow()
    }
    pub fn enabled(&self) -> bool {
        *self.enabled.borrow()
    }
    pub fn remaining(&self) -> usize {
        self.lock().queue.len()
    }
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }
}

impl Executor {
    fn next_hold(&self) {
        let enabled = self.enabled();
        let ref mut inner = self.lock();
        let t = ExecutorState::on_hold(enabled, !inner.queue.is_empty());
        self.apply(inner, t);
    }

    async fn next_command(&self) {
        let Some(target) = self.current() else {
            log::error!("[executor] no current waypoint to command");
            return self.transition(&mut self.lock(), ExecutorState::Hold);
        };
        let result = self
            .flight
            .goto_and_start(target.position(), target.yaw_deg())
            .await;
        if let Err(ref e) = result {
            log::warn!("[executor] abandoning {}: {}", target.position(), e);
        }
        self.apply(&mut self.lock(), ExecutorState::on_command(&result));
    }

    fn next_goto(&self) {
        let position = self.position();
        let ref mut inner = self.lock();
        let Some(target) = inner.current.as_ref().map(Waypoint::position) else {
            log::error!("[executor] no current waypoint to approach");
            return self.transition(inner, ExecutorState::Hold);
        };
        let t = ExecutorState::on_goto(position, target, self.config.tolerance);
        self.apply(inner, t);
    }

    async fn next_reached(&self) {
        let t = ExecutorState::on_reached();
        if let (Effect::Dwell, Some(waypoint)) = (t.effect, self.current()) {
            self.dwell(&waypoint).await;
        }
        self.apply(&mut self.lock(), t);
    }

    async fn dwell(&self, waypoint: &Waypoint) {
        log::info!("[executor] reached {}", waypoint);
        self.light.set_color(waypoint.color());
        self.light.set_brightness(waypoint.brightness());
        self.light.set_on(true);
        tokio::time::sleep(waypoint.hold()).await;
        self.light.set_on(false);
    }
}

impl Executor {
    /// Carry out the synchronous part of a transition under the lock.
    fn apply(&self, inner: &mut Inner, t: Transition) {
        match t.effect {
            Effect::Nothing => {}
            Effect::Pull => inner.current = inner.queue.pop(),
            Effect::Abandon | Effect::Dwell => inner.current = None,
            Effect::Disable => {
                log::info!("[executor] path complete");
                self.enabled.send_replace(false);
            }
        }
        self.transition(inner, t.next);
    }

    fn transition(&self, inner: &mut Inner, next: ExecutorState) {
        if inner.state != next {
            log::debug!("[executor] {} -> {}", inner.state, next);
        }
        inner.state = next;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
