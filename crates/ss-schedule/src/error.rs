use thiserror::Error;

use ss_core::{AgentId, StateId, Tick};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A callback was requested for a tick that has already passed.
    #[error("invalid schedule: {agent} in {state} asked for {at}, but the clock is at {now}")]
    InvalidSchedule {
        agent: AgentId,
        state: StateId,
        at:    Tick,
        now:   Tick,
    },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
