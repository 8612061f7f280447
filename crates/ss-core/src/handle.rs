//! `CallbackHandle` — an opaque, cancellable reference to a queued event.

use std::fmt;

use crate::Tick;

/// Reference to one scheduled callback.
///
/// A handle is the `(trigger_time, sequence)` key of the event it was minted
/// for, so it orders exactly like the event queue does.  Handles are `Copy`
/// and remain meaningful after the event fires or is cancelled: asking the
/// queue about a stale handle simply reports "not pending".
///
/// Only `ss_schedule::EventQueue` mints handles.  Applications receive them
/// through `StateContext::active_handles` and hand them back from `on_exit`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallbackHandle {
    // Field order matters: derived `Ord` compares `tick` first.
    tick:     Tick,
    sequence: u64,
}

impl CallbackHandle {
    #[doc(hidden)]
    #[inline]
    pub fn from_parts(tick: Tick, sequence: u64) -> Self {
        Self { tick, sequence }
    }

    /// Trigger time of the referenced event.
    #[inline]
    pub fn tick(self) -> Tick {
        self.tick
    }

    /// Registration sequence number of the referenced event.
    #[inline]
    pub fn sequence(self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for CallbackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cb#{}@{}", self.sequence, self.tick)
    }
}
