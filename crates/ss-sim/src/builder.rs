//! Fluent builder for constructing a [`Sim`].

use ss_agent::{AgentRngs, AgentStore};
use ss_core::{AgentId, SimConfig, StateId};
use ss_schedule::Action;
use ss_state::{ListenerRegistry, StateListener};

use crate::{Scheduler, Sim, SimError, SimResult};

/// How initial states were supplied.
enum InitialStates {
    Uniform(StateId),
    PerAgent(Vec<StateId>),
}

/// Fluent builder for [`Sim<A>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: end tick, seed, tick duration, dangling policy
/// - [`AgentStore`] + [`AgentRngs`] from [`ss_agent::AgentStoreBuilder`]
/// - at least one `.listener(state, listener)` call
/// - `.initial_state(s)` or `.initial_states(v)`
///
/// Listener registration happens here and only here; the registry is frozen
/// once [`build`](Self::build) returns.
///
/// # Example
///
/// ```rust,ignore
/// let (store, rngs) = AgentStoreBuilder::new(n, seed).build();
/// let mut sim = SimBuilder::new(config, store, rngs)
///     .listener(IN_ACTIVITY, InActivity::new(&plans))
///     .listener(TRAVELING, Traveling)
///     .listener(HOME, TerminalState)
///     .initial_state(IN_ACTIVITY)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<A: Action> {
    config:    SimConfig,
    agents:    AgentStore,
    rngs:      AgentRngs,
    listeners: Vec<(StateId, Box<dyn StateListener<A>>)>,
    initial:   Option<InitialStates>,
}

impl<A: Action> SimBuilder<A> {
    /// Create a builder with the population and configuration.
    pub fn new(config: SimConfig, agents: AgentStore, rngs: AgentRngs) -> Self {
        Self {
            config,
            agents,
            rngs,
            listeners: Vec::new(),
            initial:   None,
        }
    }

    /// Attach `listener` to `state`.
    ///
    /// Registering the same state twice is reported by `build`.
    pub fn listener<L: StateListener<A>>(mut self, state: StateId, listener: L) -> Self {
        self.listeners.push((state, Box::new(listener)));
        self
    }

    /// Start every agent in `state`.
    pub fn initial_state(mut self, state: StateId) -> Self {
        self.initial = Some(InitialStates::Uniform(state));
        self
    }

    /// Start each agent in its own state (must be length `agent_count`).
    pub fn initial_states(mut self, states: Vec<StateId>) -> Self {
        self.initial = Some(InitialStates::PerAgent(states));
        self
    }

    /// Validate inputs, freeze the listener registry and return a
    /// ready-to-run [`Sim`].
    ///
    /// No hook runs here; initial states are entered when the simulation
    /// starts.
    pub fn build(self) -> SimResult<Sim<A>> {
        self.config.validate()?;
        let agent_count = self.agents.count;
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent rngs",
            });
        }

        let mut listeners = ListenerRegistry::new();
        for (state, listener) in self.listeners {
            listeners.register_boxed(state, listener)?;
        }

        // ── Resolve initial states ────────────────────────────────────────
        let initial = match self.initial {
            Some(InitialStates::Uniform(s)) => vec![s; agent_count],
            Some(InitialStates::PerAgent(v)) => {
                if v.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      v.len(),
                        what:     "initial states",
                    });
                }
                v
            }
            None if agent_count == 0 => Vec::new(),
            None => return Err(SimError::Config("no initial state supplied".into())),
        };

        let mut agents = self.agents;
        for (i, &state) in initial.iter().enumerate() {
            let agent = AgentId(i as u32);
            if !listeners.contains(state) {
                return Err(SimError::UnregisteredState { agent, state });
            }
            agents.set_state(agent, state);
        }

        Ok(Sim {
            scheduler: Scheduler::new(self.config.make_clock()),
            config:    self.config,
            agents,
            rngs:      self.rngs,
            listeners,
            started:   false,
            aborted:   None,
        })
    }
}
