use ss_core::{AgentId, CoreError, StateId, Tick};
use ss_schedule::ScheduleError;
use ss_state::StateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("{agent} cannot enter {state}: no listener registered")]
    UnregisteredState {
        agent: AgentId,
        state: StateId,
    },

    #[error("{agent} left {state} at {tick} with {leftover} callback(s) still pending")]
    DanglingCallback {
        agent:    AgentId,
        state:    StateId,
        leftover: usize,
        tick:     Tick,
    },

    /// Returned by every mutating call after a fatal error left the run in
    /// an inconsistent state.  `reason` is the original error's message.
    #[error("simulation aborted by {agent} at {tick}: {reason}")]
    Aborted {
        agent:  AgentId,
        tick:   Tick,
        reason: String,
    },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
