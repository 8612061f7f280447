//! `Scheduler` — the facade over the clock and the event queue.

use ss_core::{AgentId, CallbackHandle, SimClock, StateId, Tick};
use ss_schedule::{Action, Event, EventQueue, ScheduleResult};

use crate::Diagnostics;

/// Clock + event queue, with ownership-aware cancellation.
///
/// The queue's time is authoritative; the `SimClock` follows it so reports
/// can convert ticks to wall-clock seconds.
pub struct Scheduler<A> {
    clock:       SimClock,
    queue:       EventQueue<A>,
    diagnostics: Diagnostics,
}

impl<A: Action> Scheduler<A> {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            queue:       EventQueue::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Register a callback for `target`.  See [`EventQueue::schedule`].
    pub fn schedule(
        &mut self,
        at:           Tick,
        target:       AgentId,
        action:       A,
        origin_state: StateId,
    ) -> ScheduleResult<CallbackHandle> {
        let handle = self.queue.schedule(at, target, action, origin_state)?;
        tracing::debug!(%target, state = %origin_state, %handle, "callback scheduled");
        Ok(handle)
    }

    /// Cancel a pending callback on behalf of `requester`.
    ///
    /// Cancelling another agent's callback is allowed but logged and counted
    /// as suspicious.  Returns `false` for fired, cancelled or unknown handles.
    pub fn cancel(&mut self, handle: CallbackHandle, requester: AgentId) -> bool {
        match self.queue.owner(handle) {
            Some(owner) if owner != requester => {
                tracing::warn!(%handle, %owner, %requester, "callback cancelled by a non-owner");
                self.diagnostics.suspicious_cancels += 1;
            }
            _ => {}
        }
        let removed = self.queue.cancel(handle);
        tracing::debug!(%handle, %requester, removed, "callback cancelled");
        removed
    }

    /// Pop the next event and move the clock to it.
    pub(crate) fn pop(&mut self) -> Option<Event<A>> {
        let event = self.queue.advance_to_next()?;
        self.clock.advance_to(event.trigger_time);
        Some(event)
    }
}

impl<A> Scheduler<A> {
    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> Tick {
        self.queue.now()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Trigger time of the next pending event.
    pub fn peek_time(&self) -> Option<Tick> {
        self.queue.peek_time()
    }

    pub fn is_pending(&self, handle: CallbackHandle) -> bool {
        self.queue.is_pending(handle)
    }

    /// Number of pending callbacks.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}
