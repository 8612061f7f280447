//! `EventQueue` — the simulation's single scheduling authority.
//!
//! # Structure
//!
//! A `BTreeMap` keyed by `CallbackHandle` (i.e. `(Tick, sequence)`):
//!
//! - `schedule` is an O(log n) insert,
//! - `cancel` is an O(log n) removal of exactly one entry,
//! - `advance_to_next` is an O(log n) `pop_first`.
//!
//! No tombstones are needed.  A handle whose key is absent has either fired
//! or been cancelled, and both report `false` from `cancel`.

use std::collections::BTreeMap;

use ss_core::{AgentId, CallbackHandle, StateId, Tick};

use crate::{Action, Event, ScheduleError, ScheduleResult};

/// Data kept for an event while it waits in the queue.
#[derive(Debug)]
struct Pending<A> {
    target:       AgentId,
    action:       A,
    origin_state: StateId,
}

/// Time-ordered, cancellable event queue with a monotonic clock.
#[derive(Debug)]
pub struct EventQueue<A> {
    inner:         BTreeMap<CallbackHandle, Pending<A>>,
    /// Trigger time of the most recently popped event.
    now:           Tick,
    next_sequence: u64,
}

impl<A> Default for EventQueue<A> {
    fn default() -> Self {
        Self {
            inner:         BTreeMap::new(),
            now:           Tick::ZERO,
            next_sequence: 0,
        }
    }
}

impl<A: Action> EventQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for `target` at `time`.
    ///
    /// `time` may equal [`now`][Self::now] (a zero-delay callback still goes
    /// through the queue) but may not precede it.  On error the queue,
    /// including its sequence counter, is unchanged.
    pub fn schedule(
        &mut self,
        time:         Tick,
        target:       AgentId,
        action:       A,
        origin_state: StateId,
    ) -> ScheduleResult<CallbackHandle> {
        if time < self.now {
            return Err(ScheduleError::InvalidSchedule {
                agent: target,
                state: origin_state,
                at:    time,
                now:   self.now,
            });
        }

        let handle = CallbackHandle::from_parts(time, self.next_sequence);
        self.next_sequence += 1;
        tracing::trace!(%handle, %target, action = action.name(), "schedule");
        self.inner.insert(handle, Pending { target, action, origin_state });
        Ok(handle)
    }

    /// Remove a pending callback.
    ///
    /// Returns `true` if the callback was pending and is now gone, `false` if
    /// it already fired, was already cancelled, or was never issued here.
    pub fn cancel(&mut self, handle: CallbackHandle) -> bool {
        let removed = self.inner.remove(&handle).is_some();
        tracing::trace!(%handle, removed, "cancel");
        removed
    }

    /// Pop the earliest pending event and move the clock to its trigger time.
    ///
    /// Returns `None` when nothing is pending.
    pub fn advance_to_next(&mut self) -> Option<Event<A>> {
        let (handle, pending) = self.inner.pop_first()?;
        self.now = handle.tick();
        Some(Event {
            trigger_time: handle.tick(),
            target:       pending.target,
            action:       pending.action,
            origin_state: pending.origin_state,
            sequence:     handle.sequence(),
        })
    }
}

impl<A> EventQueue<A> {
    /// Current queue time: the trigger time of the last popped event.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Trigger time of the earliest pending event, or `None` if empty.
    pub fn peek_time(&self) -> Option<Tick> {
        self.inner.keys().next().map(|h| h.tick())
    }

    /// `true` if `handle` refers to an event that has not fired or been
    /// cancelled.
    pub fn is_pending(&self, handle: CallbackHandle) -> bool {
        self.inner.contains_key(&handle)
    }

    /// The agent a pending callback targets, or `None` for stale handles.
    pub fn owner(&self, handle: CallbackHandle) -> Option<AgentId> {
        self.inner.get(&handle).map(|p| p.target)
    }

    /// Sequence number the next successful `schedule` will assign.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
