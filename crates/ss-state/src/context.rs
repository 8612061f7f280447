//! Read-only simulation state passed to every listener hook.

use std::collections::BTreeSet;

use ss_agent::AgentStore;
use ss_core::{AgentId, CallbackHandle, StateId, Tick};

/// What a listener hook can see about the agent it runs for.
///
/// Built by `ss-sim` immediately before each hook call.  `state` is the state
/// whose listener is being invoked: the state being left for `on_exit`, the
/// state being entered for `on_enter`, the current state for `on_action`.
pub struct StateContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// How many wall-clock seconds one tick represents.
    pub tick_duration_secs: u32,

    /// The agent the hook runs for.
    pub agent: AgentId,

    /// The state whose listener is being invoked.
    pub state: StateId,

    /// Read-only view of every agent's state and handle set.
    pub agents: &'a AgentStore,
}

impl<'a> StateContext<'a> {
    #[inline]
    pub fn new(
        tick:               Tick,
        tick_duration_secs: u32,
        agent:              AgentId,
        state:              StateId,
        agents:             &'a AgentStore,
    ) -> Self {
        Self { tick, tick_duration_secs, agent, state, agents }
    }

    /// Callbacks the agent currently owns (registered by its current state's
    /// entry hook and not yet fired).
    #[inline]
    pub fn active_handles(&self) -> &'a BTreeSet<CallbackHandle> {
        self.agents.handles(self.agent)
    }

    /// The tick `n` ticks from now.
    #[inline]
    pub fn after(&self, n: u64) -> Tick {
        self.tick.offset(n)
    }
}
