//! The `Sim` struct, its dispatch loop and the state transition protocol.

use ss_agent::{AgentRngs, AgentStore};
use ss_core::{AgentId, DanglingPolicy, SimClock, SimConfig, StateId, Tick};
use ss_schedule::{Action, Event, ScheduleError};
use ss_state::{ListenerRegistry, Reaction, StateContext};

use crate::{Diagnostics, Scheduler, SimError, SimObserver, SimResult};

/// What a single [`Sim::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// An event was delivered to its target's current state.
    Delivered,
    /// An event was popped but its target no longer exists.
    Dropped,
    /// Nothing left to do before the stop tick.
    Halted,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<A>` owns every piece of mutable simulation state (agent store,
/// per-agent RNGs, the scheduler) together with the frozen listener
/// registry, and drives the dispatch loop:
///
/// 1. **Start**: enter each agent's initial state, ascending `AgentId`.
/// 2. **Pop**: take the earliest `(trigger_time, sequence)` event.
/// 3. **Deliver**: call `on_action` on the target's current state.
/// 4. **Transition**: if the state asks for it, run the exit → set → enter
///    protocol (see [`Sim::transition`]).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
///
/// # Fatal errors
///
/// A fatal error inside the transition protocol (past-dated entry callback,
/// dangling callbacks under `DanglingPolicy::Fail`, a listener asking for an
/// unregistered state) can leave the affected agent half-moved: its old
/// callbacks cancelled, its current state already set to the target, and
/// nothing scheduled.  The `Sim` records the failure and every later call to
/// `start`, `run`, `run_until`, `step`, `transition` or `remove_agent`
/// returns [`SimError::Aborted`].  Accessors keep working so the host can
/// inspect the final state.
///
/// Pre-check failures of an external [`transition`](Sim::transition)
/// (unknown agent, unregistered target) change nothing and do not abort.
pub struct Sim<A: Action> {
    /// Global configuration (end tick, seed, dangling policy, …).
    pub config: SimConfig,

    pub(crate) agents:    AgentStore,
    pub(crate) rngs:      AgentRngs,
    pub(crate) scheduler: Scheduler<A>,
    pub(crate) listeners: ListenerRegistry<A>,
    pub(crate) started:   bool,
    pub(crate) aborted:   Option<Abort>,
}

/// What stopped an aborted run.
#[derive(Debug, Clone)]
pub(crate) struct Abort {
    agent:  AgentId,
    tick:   Tick,
    reason: String,
}

impl<A: Action> Sim<A> {
    // ── Accessors ─────────────────────────────────────────────────────────

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> Tick {
        self.scheduler.now()
    }

    pub fn clock(&self) -> &SimClock {
        self.scheduler.clock()
    }

    /// Read-only view of agent states and owned handles.
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn scheduler(&self) -> &Scheduler<A> {
        &self.scheduler
    }

    pub fn listeners(&self) -> &ListenerRegistry<A> {
        &self.listeners
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        self.scheduler.diagnostics()
    }

    /// `true` once a fatal error has stopped the run for good.
    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Enter every present agent's initial state.
    ///
    /// Called implicitly by `run`, `run_until`, `step` and `transition`;
    /// does nothing after the first call.
    pub fn start<O: SimObserver<A>>(&mut self, observer: &mut O) -> SimResult<()> {
        self.ensure_live()?;
        if self.started {
            return Ok(());
        }
        self.started = true;

        let now = self.now();
        tracing::info!(
            agents = self.agents.present_count(),
            states = self.listeners.len(),
            end = %self.config.end_tick(),
            "simulation starting"
        );
        observer.on_sim_start(now);

        let ids: Vec<AgentId> = self.agents.ids().collect();
        for agent in ids {
            let Some(state) = self.agents.state(agent) else { continue };
            if let Err(e) = self.enter(agent, state) {
                return Err(self.abort(agent, e));
            }
            observer.on_transition(agent, StateId::INVALID, state, now);
        }
        Ok(())
    }

    /// Run until the queue is empty, the next event is at or after
    /// `config.end_tick()`, or the observer asks to stop.
    pub fn run<O: SimObserver<A>>(&mut self, observer: &mut O) -> SimResult<()> {
        self.run_before(self.config.end_tick(), observer)?;

        let d = *self.diagnostics();
        tracing::info!(
            clock = %self.clock(),
            fired = d.events_fired,
            transitions = d.transitions,
            dropped = d.unknown_targets,
            pending = self.scheduler.pending(),
            "simulation finished"
        );
        observer.on_sim_end(self.now(), &d);
        Ok(())
    }

    /// Deliver every event scheduled strictly before `tick` (and before the
    /// configured end tick).
    ///
    /// Useful for tests and incremental stepping; does not call `on_sim_end`.
    pub fn run_until<O: SimObserver<A>>(&mut self, tick: Tick, observer: &mut O) -> SimResult<()> {
        self.run_before(tick.min(self.config.end_tick()), observer)
    }

    /// Deliver exactly one event, if one is due before the end tick.
    pub fn step<O: SimObserver<A>>(&mut self, observer: &mut O) -> SimResult<StepOutcome> {
        self.step_before(self.config.end_tick(), observer)
    }

    /// Move `agent` to `next` through the full transition protocol.
    ///
    /// 1. `on_exit` of the current state; cancel what it returns.  Leftover
    ///    handles are an error or are force-cancelled, per
    ///    `config.dangling_policy`.
    /// 2. Record `next` as the current state.
    /// 3. `on_enter` of `next`; schedule what it returns.
    ///
    /// `next` may equal the current state, in which case both hooks run.
    /// Fails without side effects if `agent` is gone or `next` has no
    /// listener.  Any later failure aborts the run (see [`Sim`]).
    pub fn transition<O: SimObserver<A>>(
        &mut self,
        agent:    AgentId,
        next:     StateId,
        observer: &mut O,
    ) -> SimResult<()> {
        self.start(observer)?;

        let Some(current) = self.agents.state(agent) else {
            return Err(SimError::AgentNotFound(agent));
        };
        if !self.listeners.contains(next) {
            return Err(SimError::UnregisteredState { agent, state: next });
        }

        if let Err(e) = self.exit(agent, current) {
            return Err(self.abort(agent, e));
        }
        self.agents.set_state(agent, next);
        if let Err(e) = self.enter(agent, next) {
            return Err(self.abort(agent, e));
        }

        let now = self.now();
        self.scheduler.diagnostics_mut().transitions += 1;
        tracing::debug!(
            %agent,
            from = self.listeners.name_of(current),
            to = self.listeners.name_of(next),
            tick = %now,
            "transition"
        );
        observer.on_transition(agent, current, next, now);
        Ok(())
    }

    /// Remove `agent` from the simulation.
    ///
    /// Its callbacks stay queued; when they fire they are dropped and counted
    /// in `Diagnostics::unknown_targets`.
    pub fn remove_agent(&mut self, agent: AgentId) -> SimResult<()> {
        self.ensure_live()?;
        let handles = self.agents.remove(agent).ok_or(SimError::AgentNotFound(agent))?;
        tracing::debug!(%agent, orphaned = handles.len(), tick = %self.now(), "agent removed");
        Ok(())
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    fn run_before<O: SimObserver<A>>(&mut self, stop: Tick, observer: &mut O) -> SimResult<()> {
        self.start(observer)?;
        while observer.keep_running(self.now()) {
            if self.step_before(stop, observer)? == StepOutcome::Halted {
                break;
            }
        }
        Ok(())
    }

    fn step_before<O: SimObserver<A>>(&mut self, stop: Tick, observer: &mut O) -> SimResult<StepOutcome> {
        self.start(observer)?;
        match self.scheduler.peek_time() {
            Some(t) if t < stop => {}
            _ => return Ok(StepOutcome::Halted),
        }
        let Some(event) = self.scheduler.pop() else {
            return Ok(StepOutcome::Halted);
        };
        self.dispatch(event, observer)
    }

    fn dispatch<O: SimObserver<A>>(&mut self, event: Event<A>, observer: &mut O) -> SimResult<StepOutcome> {
        let agent = event.target;
        let Some(state) = self.agents.state(agent) else {
            tracing::warn!(
                %agent,
                action = event.action.name(),
                tick = %event.trigger_time,
                "dropping callback for unknown agent"
            );
            self.scheduler.diagnostics_mut().unknown_targets += 1;
            observer.on_dropped(&event);
            return Ok(StepOutcome::Dropped);
        };

        if !self.agents.remove_handle(agent, event.handle()) {
            tracing::warn!(%agent, handle = %event.handle(), "fired callback was not tracked by its agent");
            self.scheduler.diagnostics_mut().untracked_fired += 1;
        }
        self.scheduler.diagnostics_mut().events_fired += 1;
        tracing::trace!(%agent, action = event.action.name(), tick = %event.trigger_time, "deliver");
        observer.on_event(&event);

        let reaction = {
            let Some(listener) = self.listeners.get(state) else {
                return Err(self.abort(agent, SimError::UnregisteredState { agent, state }));
            };
            let ctx = StateContext::new(
                self.scheduler.now(),
                self.config.tick_duration_secs,
                agent,
                state,
                &self.agents,
            );
            listener.on_action(&ctx, &event.action, self.rngs.get_mut(agent))
        };

        if let Reaction::TransitionTo(next) = reaction {
            // A listener asking for an impossible move is as fatal as a failed
            // protocol step.
            if let Err(e) = self.transition(agent, next, observer) {
                return Err(self.abort(agent, e));
            }
        }
        Ok(StepOutcome::Delivered)
    }

    // ── Abort bookkeeping ─────────────────────────────────────────────────

    fn ensure_live(&self) -> SimResult<()> {
        match &self.aborted {
            Some(a) => Err(SimError::Aborted {
                agent:  a.agent,
                tick:   a.tick,
                reason: a.reason.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Record the first fatal error and hand it back to the caller.
    fn abort(&mut self, agent: AgentId, err: SimError) -> SimError {
        if self.aborted.is_none() {
            let tick = self.now();
            tracing::error!(%agent, tick = %tick, error = %err, "simulation aborted");
            self.aborted = Some(Abort { agent, tick, reason: err.to_string() });
        }
        err
    }

    // ── Transition protocol ───────────────────────────────────────────────

    /// Step 1: run `on_exit` and cancel what it returns, then deal with
    /// anything left over.
    fn exit(&mut self, agent: AgentId, current: StateId) -> SimResult<()> {
        // Agents that have never entered a state have nothing to leave.
        if !current.is_valid() {
            return Ok(());
        }

        let to_cancel = {
            let listener = self
                .listeners
                .get(current)
                .ok_or(SimError::UnregisteredState { agent, state: current })?;
            let ctx = StateContext::new(
                self.scheduler.now(),
                self.config.tick_duration_secs,
                agent,
                current,
                &self.agents,
            );
            listener.on_exit(&ctx, self.rngs.get_mut(agent))
        };

        for handle in to_cancel {
            self.scheduler.cancel(handle, agent);
            self.agents.remove_handle(agent, handle);
        }

        let leftover = self.agents.handles(agent).len();
        if leftover == 0 {
            return Ok(());
        }

        let now = self.now();
        match self.config.dangling_policy {
            DanglingPolicy::Fail => Err(SimError::DanglingCallback { agent, state: current, leftover, tick: now }),
            DanglingPolicy::ForceCancel => {
                tracing::warn!(
                    %agent,
                    state = self.listeners.name_of(current),
                    leftover,
                    tick = %now,
                    "exiting state left callbacks pending; force-cancelling"
                );
                for handle in self.agents.take_handles(agent) {
                    self.scheduler.cancel(handle, agent);
                }
                self.scheduler.diagnostics_mut().force_cancelled += leftover as u64;
                Ok(())
            }
        }
    }

    /// Step 3: run `on_enter` and schedule what it returns.
    ///
    /// All trigger times are checked before anything is scheduled, so a bad
    /// hook leaves the queue untouched.
    fn enter(&mut self, agent: AgentId, state: StateId) -> SimResult<()> {
        let callbacks = {
            let listener = self
                .listeners
                .get(state)
                .ok_or(SimError::UnregisteredState { agent, state })?;
            let ctx = StateContext::new(
                self.scheduler.now(),
                self.config.tick_duration_secs,
                agent,
                state,
                &self.agents,
            );
            listener.on_enter(&ctx, self.rngs.get_mut(agent))
        };

        let now = self.now();
        if let Some(bad) = callbacks.iter().find(|cb| cb.at < now) {
            return Err(ScheduleError::InvalidSchedule { agent, state, at: bad.at, now }.into());
        }

        for cb in callbacks {
            let handle = self.scheduler.schedule(cb.at, agent, cb.action, state)?;
            self.agents.insert_handle(agent, handle);
        }
        Ok(())
    }
}
