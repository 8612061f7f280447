//! Simulation observer trait — the integration point for reporting code.

use ss_core::{AgentId, StateId, Tick};
use ss_schedule::{Action, Event};

use crate::Diagnostics;

/// Callbacks invoked by [`Sim`][crate::Sim] while it dispatches events.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers see `(agent, action,
/// trigger_time)` for every delivered event; they cannot reach into the
/// queue or the agent store.
///
/// # Example — action counter
///
/// ```rust,ignore
/// struct CountArrivals(u64);
///
/// impl SimObserver<Commute> for CountArrivals {
///     fn on_event(&mut self, event: &Event<Commute>) {
///         if event.action == Commute::Arrive {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver<A: Action> {
    /// Called once, before initial states are entered.
    fn on_sim_start(&mut self, _tick: Tick) {}

    /// Called for every event delivered to an agent, before its state reacts.
    fn on_event(&mut self, _event: &Event<A>) {}

    /// Called after a transition completes.
    ///
    /// For the initial entry at simulation start `from` is `StateId::INVALID`.
    fn on_transition(&mut self, _agent: AgentId, _from: StateId, _to: StateId, _tick: Tick) {}

    /// Called when an event is discarded because its target no longer exists.
    fn on_dropped(&mut self, _event: &Event<A>) {}

    /// Polled before each event.  Returning `false` halts the dispatch loop
    /// even if events remain queued.
    fn keep_running(&mut self, _now: Tick) -> bool {
        true
    }

    /// Called once when [`Sim::run`][crate::Sim::run] returns successfully.
    fn on_sim_end(&mut self, _final_tick: Tick, _diagnostics: &Diagnostics) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl<A: Action> SimObserver<A> for NoopObserver {}

/// Fan out to two observers.  The loop keeps running only while both agree.
impl<A: Action, X: SimObserver<A>, Y: SimObserver<A>> SimObserver<A> for (X, Y) {
    fn on_sim_start(&mut self, tick: Tick) {
        self.0.on_sim_start(tick);
        self.1.on_sim_start(tick);
    }

    fn on_event(&mut self, event: &Event<A>) {
        self.0.on_event(event);
        self.1.on_event(event);
    }

    fn on_transition(&mut self, agent: AgentId, from: StateId, to: StateId, tick: Tick) {
        self.0.on_transition(agent, from, to, tick);
        self.1.on_transition(agent, from, to, tick);
    }

    fn on_dropped(&mut self, event: &Event<A>) {
        self.0.on_dropped(event);
        self.1.on_dropped(event);
    }

    fn keep_running(&mut self, now: Tick) -> bool {
        let a = self.0.keep_running(now);
        let b = self.1.keep_running(now);
        a && b
    }

    fn on_sim_end(&mut self, final_tick: Tick, diagnostics: &Diagnostics) {
        self.0.on_sim_end(final_tick, diagnostics);
        self.1.on_sim_end(final_tick, diagnostics);
    }
}
