//! Counters for conditions the dispatch loop recovers from.

/// Run-level counters, reported to observers in `on_sim_end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Events delivered to an agent's state.
    pub events_fired:       u64,
    /// Completed state transitions, initial entries excluded.
    pub transitions:        u64,
    /// Events dropped because their target agent was removed.
    pub unknown_targets:    u64,
    /// Leftover callbacks cancelled under `DanglingPolicy::ForceCancel`.
    pub force_cancelled:    u64,
    /// Cancellations requested by an agent other than the callback's owner.
    pub suspicious_cancels: u64,
    /// Fired events whose handle the target agent was not tracking.
    pub untracked_fired:    u64,
}
