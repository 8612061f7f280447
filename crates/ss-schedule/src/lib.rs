//! `ss-schedule` — the clock-driven event queue.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`action`]     | `Action` trait implemented by application action enums   |
//! | [`event`]      | `Event<A>` — one fired or pending callback               |
//! | [`queue`]      | `EventQueue<A>` (`BTreeMap<CallbackHandle, Pending<A>>`) |
//! | [`error`]      | `ScheduleError`, `ScheduleResult<T>`                     |
//!
//! # Ordering model (summary)
//!
//! ```text
//! key(event)  = (trigger_time, sequence)
//! sequence    = registration counter, strictly increasing per queue
//! pop order   = ascending key
//! ```
//!
//! The key doubles as the event's `CallbackHandle`, so cancelling is a map
//! removal and a stale handle is simply a missing key.

pub mod action;
pub mod error;
pub mod event;
pub mod queue;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use error::{ScheduleError, ScheduleResult};
pub use event::Event;
pub use queue::EventQueue;
