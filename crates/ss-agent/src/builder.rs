//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use ss_agent::AgentStoreBuilder;
//!
//! let (store, rngs) = AgentStoreBuilder::new(10_000, /*seed=*/ 42).build();
//!
//! assert_eq!(store.count, 10_000);
//! assert_eq!(rngs.len(),  10_000);
//! ```

use crate::{AgentRngs, AgentStore};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
pub struct AgentStoreBuilder {
    count: usize,
    seed:  u64,
}

impl AgentStoreBuilder {
    /// Create a builder for `count` agents using `seed` as the global RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed }
    }

    /// Construct `AgentStore` and `AgentRngs`.
    ///
    /// Agents start without a state; initial states are assigned by
    /// `ss_sim::SimBuilder` and entered when the simulation starts.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        (AgentStore::new(self.count), AgentRngs::new(self.count, self.seed))
    }
}
