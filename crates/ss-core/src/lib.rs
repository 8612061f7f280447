//! `ss-core` — foundational types for the `rust_statesim` scheduling core.
//!
//! This crate is a dependency of every other `ss-*` crate.  It has no `ss-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `StateId`                                  |
//! | [`handle`]      | `CallbackHandle`                                      |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`, `DanglingPolicy`     |
//! | [`rng`]         | `AgentRng` (per-agent)                                |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod handle;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use handle::CallbackHandle;
pub use ids::{AgentId, StateId};
pub use rng::AgentRng;
pub use time::{DanglingPolicy, SimClock, SimConfig, Tick};
