//! Plain data row types written by output backends.

use serde::Serialize;

/// One delivered callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRow {
    pub agent_id:       u32,
    pub tick:           u64,
    pub unix_time_secs: i64,
    /// The state that scheduled the callback.
    pub state_id:       u32,
    /// `Action::name()` of the delivered action.
    pub action:         String,
}

/// One completed state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionRow {
    pub agent_id:   u32,
    pub tick:       u64,
    /// `u32::MAX` for the initial entry at simulation start.
    pub from_state: u32,
    pub to_state:   u32,
}
