//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! Listener hooks need `&AgentStore` (to read the agent's state and handle
//! set through `StateContext`) and `&mut AgentRng` for the same agent at the
//! same time.  Keeping RNGs in a separate `AgentRngs` struct lets the
//! simulation borrow both without fighting the borrow checker.

use std::collections::BTreeSet;

use ss_core::{AgentId, AgentRng, CallbackHandle, StateId};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] to enable
/// simultaneous `&mut AgentRngs` + `&AgentStore` borrows.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agents.
///
/// Every `Vec` has exactly `count` elements and `AgentId` is the index into
/// all of them.  Removed agents keep their slot (ids are never reused) with
/// `present == false`.
///
/// # Invariant
///
/// Between transitions, `handles(agent)` is exactly the set of callbacks the
/// agent's current state registered on entry that have neither fired nor been
/// cancelled.  The mutators below exist for `ss-sim`, which maintains this.
pub struct AgentStore {
    /// Number of agent slots.  Equals the length of every SoA `Vec`.
    pub count: usize,

    state:   Vec<StateId>,
    handles: Vec<BTreeSet<CallbackHandle>>,
    present: Vec<bool>,
}

impl AgentStore {
    /// Allocate `count` present agents, all in `StateId::INVALID` (not yet
    /// entered) with no handles.
    pub(crate) fn new(count: usize) -> Self {
        Self {
            count,
            state:   vec![StateId::INVALID; count],
            handles: vec![BTreeSet::new(); count],
            present: vec![true; count],
        }
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// `true` if `agent` is in range and has not been removed.
    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.present.get(agent.index()).copied().unwrap_or(false)
    }

    /// Current state of `agent`, or `None` if the agent is unknown/removed.
    #[inline]
    pub fn state(&self, agent: AgentId) -> Option<StateId> {
        self.contains(agent).then(|| self.state[agent.index()])
    }

    /// Callbacks `agent` currently owns, in queue order.
    ///
    /// Empty for unknown or removed agents.
    pub fn handles(&self, agent: AgentId) -> &BTreeSet<CallbackHandle> {
        static EMPTY: BTreeSet<CallbackHandle> = BTreeSet::new();
        if self.contains(agent) {
            &self.handles[agent.index()]
        } else {
            &EMPTY
        }
    }

    /// Iterate over the ids of all present agents in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.present
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(i, _)| AgentId(i as u32))
    }

    /// Number of present (not removed) agents.
    pub fn present_count(&self) -> usize {
        self.present.iter().filter(|p| **p).count()
    }

    // ── Mutations (driven by ss-sim) ──────────────────────────────────────

    /// Overwrite the current state.  No-op for unknown/removed agents.
    pub fn set_state(&mut self, agent: AgentId, state: StateId) {
        if self.contains(agent) {
            self.state[agent.index()] = state;
        }
    }

    /// Record a newly scheduled callback.  Returns `false` if the agent is
    /// unknown/removed or already held the handle.
    pub fn insert_handle(&mut self, agent: AgentId, handle: CallbackHandle) -> bool {
        self.contains(agent) && self.handles[agent.index()].insert(handle)
    }

    /// Forget a callback (fired or cancelled).  Returns `true` if it was held.
    pub fn remove_handle(&mut self, agent: AgentId, handle: CallbackHandle) -> bool {
        self.contains(agent) && self.handles[agent.index()].remove(&handle)
    }

    /// Remove and return every handle `agent` holds.
    pub fn take_handles(&mut self, agent: AgentId) -> BTreeSet<CallbackHandle> {
        if self.contains(agent) {
            std::mem::take(&mut self.handles[agent.index()])
        } else {
            BTreeSet::new()
        }
    }

    /// Mark `agent` as removed and return the handles it still held.
    ///
    /// Returns `None` if the agent was already gone.
    pub fn remove(&mut self, agent: AgentId) -> Option<BTreeSet<CallbackHandle>> {
        if !self.contains(agent) {
            return None;
        }
        let handles = std::mem::take(&mut self.handles[agent.index()]);
        self.present[agent.index()] = false;
        Some(handles)
    }
}
