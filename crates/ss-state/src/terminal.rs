//! A terminal state — agents never leave it on their own.

use ss_core::AgentRng;
use ss_schedule::Action;

use crate::{Reaction, ScheduledCallback, StateContext, StateListener};

/// A [`StateListener`] that schedules nothing and stays put on any action.
///
/// Useful for "done for the day" states and as a placeholder in tests.
pub struct TerminalState;

impl<A: Action> StateListener<A> for TerminalState {
    fn name(&self) -> &str {
        "terminal"
    }

    fn on_enter(&self, _ctx: &StateContext<'_>, _rng: &mut AgentRng) -> Vec<ScheduledCallback<A>> {
        vec![]
    }

    fn on_action(&self, _ctx: &StateContext<'_>, _action: &A, _rng: &mut AgentRng) -> Reaction {
        Reaction::Stay
    }
}
