//! `ListenerRegistry` — maps each state to the listener that implements it.

use ss_core::StateId;
use ss_schedule::Action;

use crate::{StateError, StateListener, StateResult};

#[cfg(not(feature = "fx-hash"))]
type ListenerMap<A> = std::collections::HashMap<StateId, Box<dyn StateListener<A>>>;
#[cfg(feature = "fx-hash")]
type ListenerMap<A> = rustc_hash::FxHashMap<StateId, Box<dyn StateListener<A>>>;

/// State → listener lookup.
///
/// Filled once during setup (normally through `SimBuilder::listener`) and
/// read-only while the dispatch loop runs.
pub struct ListenerRegistry<A: Action> {
    listeners: ListenerMap<A>,
}

impl<A: Action> Default for ListenerRegistry<A> {
    fn default() -> Self {
        Self { listeners: ListenerMap::<A>::default() }
    }
}

impl<A: Action> ListenerRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listener` to `state`.
    ///
    /// Fails if `state` already has a listener or is `StateId::INVALID`.
    pub fn register<L: StateListener<A>>(&mut self, state: StateId, listener: L) -> StateResult<()> {
        self.register_boxed(state, Box::new(listener))
    }

    pub fn register_boxed(
        &mut self,
        state:    StateId,
        listener: Box<dyn StateListener<A>>,
    ) -> StateResult<()> {
        if !state.is_valid() {
            return Err(StateError::ReservedState(state));
        }
        if self.listeners.contains_key(&state) {
            return Err(StateError::DuplicateListener(state));
        }
        self.listeners.insert(state, listener);
        Ok(())
    }

    #[inline]
    pub fn get(&self, state: StateId) -> Option<&dyn StateListener<A>> {
        self.listeners.get(&state).map(|l| l.as_ref())
    }

    #[inline]
    pub fn contains(&self, state: StateId) -> bool {
        self.listeners.contains_key(&state)
    }

    /// Listener name for logs; `"<none>"` if `state` is unregistered.
    pub fn name_of(&self, state: StateId) -> &str {
        self.get(state).map_or("<none>", |l| l.name())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
