//! The `StateListener` trait — the main extension point for user code.

use ss_core::{AgentRng, CallbackHandle, StateId, Tick};
use ss_schedule::Action;

use crate::StateContext;

/// A callback an entry hook asks to have scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledCallback<A> {
    /// When to fire.  Must not precede the current tick.
    pub at:     Tick,
    /// Delivered to the agent's state when it fires.
    pub action: A,
}

impl<A> ScheduledCallback<A> {
    #[inline]
    pub fn new(at: Tick, action: A) -> Self {
        Self { at, action }
    }
}

/// What a state wants to happen after handling a delivered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Remain in the current state.
    Stay,
    /// Leave the current state and enter the given one.  Transitioning to the
    /// current state runs both its exit and entry hooks.
    TransitionTo(StateId),
}

/// Behavior attached to one state.
///
/// # Required methods
///
/// [`on_enter`][Self::on_enter] and [`on_action`][Self::on_action].
/// [`on_exit`][Self::on_exit] defaults to cancelling nothing, which is right
/// for states whose callbacks have always fired by the time they are left.
/// States that may be left early should return [`cancel_all`][crate::cancel_all]
/// (or a subset of `ctx.active_handles()`).
///
/// # Example
///
/// ```rust,ignore
/// struct InActivity { ends: Vec<Tick> }
///
/// impl StateListener<Commute> for InActivity {
///     fn on_enter(&self, ctx: &StateContext<'_>, _rng: &mut AgentRng) -> Vec<ScheduledCallback<Commute>> {
///         vec![ScheduledCallback::new(self.ends[ctx.agent.index()], Commute::EndActivity)]
///     }
///
///     fn on_action(&self, _ctx: &StateContext<'_>, action: &Commute, _rng: &mut AgentRng) -> Reaction {
///         match action {
///             Commute::EndActivity => Reaction::TransitionTo(TRAVELING),
///             _ => Reaction::Stay,
///         }
///     }
/// }
/// ```
pub trait StateListener<A: Action>: 'static {
    /// Human-readable state name for logs.
    fn name(&self) -> &str {
        "state"
    }

    /// Called when an agent enters this state.
    ///
    /// Every returned callback is scheduled for the agent and becomes part of
    /// its active handle set.  An empty `Vec` is valid: the state then waits
    /// for an external directive or the end of the simulation.
    fn on_enter(
        &self,
        ctx: &StateContext<'_>,
        rng: &mut AgentRng,
    ) -> Vec<ScheduledCallback<A>>;

    /// Called when an agent leaves this state.
    ///
    /// Return the handles to cancel.  Anything still in
    /// `ctx.active_handles()` afterwards is a dangling callback.
    ///
    /// Default: cancels nothing.
    fn on_exit(
        &self,
        _ctx: &StateContext<'_>,
        _rng: &mut AgentRng,
    ) -> Vec<CallbackHandle> {
        Vec::new()
    }

    /// Called when a callback fires for an agent in this state.
    fn on_action(
        &self,
        ctx:    &StateContext<'_>,
        action: &A,
        rng:    &mut AgentRng,
    ) -> Reaction;
}
