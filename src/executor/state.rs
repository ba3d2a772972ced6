use crate::Meters;
use crate::flight::FlightError;
use crate::waypoint::Ned;

/// Phase of the waypoint executor. Starts in `Hold`; there is no terminal phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExecutorState {
    /// Idle, or between waypoints.
    #[default]
    Hold,
    /// A target is selected and the goto command is due.
    CommandGoto,
    /// Commanded; waiting for telemetry to come within tolerance.
    Goto,
    /// Arrived; the dwell with the light on is due.
    Reached,
}

/// Side effect the executor carries out alongside a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    /// Path drained: clear the enabled flag, releasing waiters.
    Disable,
    /// Move the queue head into the current slot.
    Pull,
    /// Drop the current waypoint after a failed command.
    Abandon,
    /// Light on, hold, light off, then clear the current slot.
    Dwell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: ExecutorState,
    pub effect: Effect,
}

impl From<(ExecutorState, Effect)> for Transition {
    fn from((next, effect): (ExecutorState, Effect)) -> Self {
        Self { next, effect }
    }
}

impl ExecutorState {
    pub fn on_hold(enabled: bool, queued: bool) -> Transition {
        match (enabled, queued) {
            (false, _) => (Self::Hold, Effect::Nothing),
            (true, false) => (Self::Hold, Effect::Disable),
            (true, true) => (Self::CommandGoto, Effect::Pull),
        }
        .into()
    }

    pub fn on_command(result: &Result<(), FlightError>) -> Transition {
        match result {
            Ok(()) => (Self::Goto, Effect::Nothing),
            Err(_) => (Self::Hold, Effect::Abandon),
        }
        .into()
    }

    /// Without a position sample yet the executor simply keeps waiting.
    pub fn on_goto(position: Option<Ned>, target: Ned, tolerance: Meters) -> Transition {
        match position {
            Some(p) if p.distance(&target) < tolerance => (Self::Reached, Effect::Nothing),
            _ => (Self::Goto, Effect::Nothing),
        }
        .into()
    }

    pub fn on_reached() -> Transition {
        (Self::Hold, Effect::Dwell).into()
    }
}

impl std::fmt::Display for ExecutorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hold => write!(f, "HOLD"),
            Self::CommandGoto => write!(f, "COMMAND_GOTO"),
            Self::Goto => write!(f, "GOTO"),
            Self::Reached => write!(f, "REACHED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_idles_when_disabled() {
        for queued in [false, true] {
            let t = ExecutorState::on_hold(false, queued);
            assert_eq!(t.next, ExecutorState::Hold);
            assert_eq!(t.effect, Effect::Nothing);
        }
    }

    #[test]
    fn hold_completes_drained_path() {
        let t = ExecutorState::on_hold(true, false);
        assert_eq!(t, (ExecutorState::Hold, Effect::Disable).into());
    }

    #[test]
    fn hold_pulls_next() {
        let t = ExecutorState::on_hold(true, true);
        assert_eq!(t, (ExecutorState::CommandGoto, Effect::Pull).into());
    }

    #[test]
    fn failed_command_abandons() {
        let t = ExecutorState::on_command(&Err(FlightError::CommandFailed("nope".into())));
        assert_eq!(t, (ExecutorState::Hold, Effect::Abandon).into());
        let t = ExecutorState::on_command(&Ok(()));
        assert_eq!(t, (ExecutorState::Goto, Effect::Nothing).into());
    }

    #[test]
    fn goto_tolerates_telemetry_gap() {
        let t = ExecutorState::on_goto(None, Ned::default(), 0.25);
        assert_eq!(t.next, ExecutorState::Goto);
    }

    #[test]
    fn goto_tolerance_is_strict() {
        let target = Ned::new(0.0, 0.0, -10.0);
        let edge = Some(target.offset(0.25, 0.0, 0.0));
        let near = Some(target.offset(0.0, 0.2, 0.0));
        assert_eq!(ExecutorState::on_goto(edge, target, 0.25).next, ExecutorState::Goto);
        assert_eq!(ExecutorState::on_goto(near, target, 0.25).next, ExecutorState::Reached);
    }

    #[test]
    fn reached_dwells_then_holds() {
        assert_eq!(
            ExecutorState::on_reached(),
            (ExecutorState::Hold, Effect::Dwell).into()
        );
    }
}
