//! A scheduled callback, as returned by `EventQueue::advance_to_next`.

use ss_core::{AgentId, CallbackHandle, StateId, Tick};

/// One callback popped from the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<A> {
    /// When the callback fires.
    pub trigger_time: Tick,
    /// Agent the callback is delivered to.
    pub target:       AgentId,
    /// What the target's current state is asked to handle.
    pub action:       A,
    /// State whose entry hook registered the callback.
    pub origin_state: StateId,
    /// Registration counter; breaks ties at equal `trigger_time`.
    pub sequence:     u64,
}

impl<A> Event<A> {
    /// The handle this event was registered under.
    #[inline]
    pub fn handle(&self) -> CallbackHandle {
        CallbackHandle::from_parts(self.trigger_time, self.sequence)
    }
}
