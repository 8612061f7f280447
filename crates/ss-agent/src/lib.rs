//! `ss-agent` — Structure-of-Arrays agent storage for `rust_statesim`.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA data), `AgentRngs` (per-agent RNG)      |
//! | [`builder`]     | `AgentStoreBuilder` (fluent construction)                 |
//!
//! The store holds, per agent, the current `StateId`, the set of
//! `CallbackHandle`s registered by that state's entry hook, and a presence
//! flag.  It performs no scheduling itself; `ss-sim` mutates it only from the
//! transition protocol and the dispatch loop.

pub mod builder;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use store::{AgentRngs, AgentStore};
