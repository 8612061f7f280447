//! `ss-sim` — dispatch loop and transition protocol for `rust_statesim`.
//!
//! # Dispatch loop
//!
//! ```text
//! start: enter every agent's initial state (ascending AgentId)
//! loop:
//!   ① Halt?     — observer.keep_running() is false, the queue is empty,
//!                 or the next event is at/after config.end_tick().
//!   ② Pop       — earliest (trigger_time, sequence); clock jumps to it.
//!   ③ Target    — removed agent → warn, count, drop the event.
//!   ④ Deliver   — forget the fired handle, call on_action on the agent's
//!                 current state.
//!   ⑤ Transition (if requested):
//!                   on_exit → cancel returned handles → dangling check
//!                   set state
//!                   on_enter → validate times → schedule → record handles
//! ```
//!
//! Everything runs on one thread; a transition is never interleaved with
//! another agent's.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                           |
//! |-----------|--------------------------------------------------|
//! | `fx-hash` | FxHash for the `StateId → listener` registry.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ss_agent::AgentStoreBuilder;
//! use ss_sim::{NoopObserver, SimBuilder};
//!
//! let (store, rngs) = AgentStoreBuilder::new(1_000, 42).build();
//! let mut sim = SimBuilder::new(config, store, rngs)
//!     .listener(IN_ACTIVITY, InActivity::new(&plans))
//!     .listener(TRAVELING, Traveling)
//!     .initial_state(IN_ACTIVITY)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod sim;


pub use builder::SimBuilder;
pub use diagnostics::Diagnostics;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use scheduler::Scheduler;
pub use sim::{Sim, StepOutcome};
