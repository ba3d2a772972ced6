use super::*;
use crate::Degrees;
use crate::waypoint::Ned;
use crate::waypoint::Rgb;
use std::collections::HashMap;
use std::mem::Discriminant;
use std::sync::Mutex;
use tokio::sync::watch;

/// Every capability call a [`Recorder`] has seen.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Connect,
    Ready,
    Arm,
    Takeoff,
    Land,
    Disarm,
    Goto(Ned, Degrees),
    Color(Rgb),
    Brightness(f64),
    On(bool),
}

/// Flight + light fake that records calls and teleports to each goto target.
#[derive(Debug)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<Discriminant<Call>, usize>>,
    position: watch::Sender<Ned>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            position: watch::Sender::new(Ned::default()),
        }
    }
}

impl Recorder {
    /// Fail the next `times` calls of the same kind as `call`.
    pub fn fail(&self, call: Call, times: usize) {
        self.failures
            .lock()
            .unwrap()
            .insert(std::mem::discriminant(&call), times);
    }
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
    pub fn count<F>(&self, f: F) -> usize
    where
        F: Fn(&Call) -> bool,
    {
        self.calls.lock().unwrap().iter().filter(|c| f(c)).count()
    }
    pub fn gotos(&self) -> Vec<Ned> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Goto(ned, _) => Some(ned),
                _ => None,
            })
            .collect()
    }
    fn record(&self, call: Call) -> Result<(), FlightError> {
        self.calls.lock().unwrap().push(call.clone());
        let ref mut failures = self.failures.lock().unwrap();
        match failures.get_mut(&std::mem::discriminant(&call)) {
            Some(n) if *n > 0 => {
                *n -= 1;
                Err(FlightError::CommandFailed(format!("{:?}", call)))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Flight for Recorder {
    async fn connect(&self) -> Result<(), FlightError> {
        self.record(Call::Connect)
    }
    async fn ready(&self) -> Result<(), FlightError> {
        self.record(Call::Ready)
    }
    async fn arm(&self) -> Result<(), FlightError> {
        self.record(Call::Arm)
    }
    async fn takeoff(&self) -> Result<(), FlightError> {
        self.record(Call::Takeoff)
    }
    async fn land(&self) -> Result<(), FlightError> {
        self.record(Call::Land)
    }
    async fn disarm(&self) -> Result<(), FlightError> {
        self.record(Call::Disarm)
    }
    async fn goto_and_start(&self, target: Ned, yaw_deg: Degrees) -> Result<(), FlightError> {
        self.record(Call::Goto(target, yaw_deg))?;
        self.position.send_replace(target);
        Ok(())
    }
    fn positions(&self) -> Positions {
        let rx = self.position.subscribe();
        Box::pin(futures::stream::unfold(
            (rx, true),
            |(mut rx, first)| async move {
                if !first {
                    rx.changed().await.ok()?;
                }
                let ned = *rx.borrow_and_update();
                Some((ned, (rx, false)))
            },
        ))
    }
}

impl Light for Recorder {
    fn set_color(&self, rgb: Rgb) {
        let _ = self.record(Call::Color(rgb));
    }
    fn set_brightness(&self, brightness: f64) {
        let _ = self.record(Call::Brightness(brightness));
    }
    fn set_on(&self, on: bool) {
        let _ = self.record(Call::On(on));
    }
}
