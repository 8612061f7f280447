//! Unit tests for ss-agent.

use ss_core::{AgentId, CallbackHandle, StateId, Tick};

use crate::AgentStoreBuilder;

fn h(tick: u64, seq: u64) -> CallbackHandle {
    CallbackHandle::from_parts(Tick(tick), seq)
}

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn sizes_match() {
        let (store, rngs) = AgentStoreBuilder::new(5, 1).build();
        assert_eq!(store.count, 5);
        assert_eq!(rngs.len(), 5);
        assert_eq!(store.present_count(), 5);
    }

    #[test]
    fn agents_start_without_state() {
        let (store, _) = AgentStoreBuilder::new(2, 1).build();
        assert_eq!(store.state(AgentId(0)), Some(StateId::INVALID));
        assert!(store.handles(AgentId(1)).is_empty());
    }

    #[test]
    fn rngs_are_seeded_per_agent() {
        let (_, mut a) = AgentStoreBuilder::new(2, 9).build();
        let (_, mut b) = AgentStoreBuilder::new(2, 9).build();
        let x: u32 = a.get_mut(AgentId(1)).gen_range(0..1_000_000);
        let y: u32 = b.get_mut(AgentId(1)).gen_range(0..1_000_000);
        assert_eq!(x, y);
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;

    #[test]
    fn handle_bookkeeping() {
        let (mut store, _) = AgentStoreBuilder::new(1, 0).build();
        let a = AgentId(0);
        assert!(store.insert_handle(a, h(5, 1)));
        assert!(store.insert_handle(a, h(3, 0)));
        assert!(!store.insert_handle(a, h(3, 0)));

        let order: Vec<_> = store.handles(a).iter().copied().collect();
        assert_eq!(order, vec![h(3, 0), h(5, 1)]);

        assert!(store.remove_handle(a, h(3, 0)));
        assert!(!store.remove_handle(a, h(3, 0)));
        assert_eq!(store.take_handles(a).len(), 1);
        assert!(store.handles(a).is_empty());
    }

    #[test]
    fn set_state() {
        let (mut store, _) = AgentStoreBuilder::new(1, 0).build();
        store.set_state(AgentId(0), StateId(4));
        assert_eq!(store.state(AgentId(0)), Some(StateId(4)));
    }

    #[test]
    fn out_of_range_is_absent() {
        let (mut store, _) = AgentStoreBuilder::new(1, 0).build();
        let ghost = AgentId(10);
        assert!(!store.contains(ghost));
        assert_eq!(store.state(ghost), None);
        assert!(!store.insert_handle(ghost, h(1, 1)));
        assert!(store.handles(ghost).is_empty());
    }

    #[test]
    fn removal_returns_handles_and_hides_agent() {
        let (mut store, _) = AgentStoreBuilder::new(3, 0).build();
        store.insert_handle(AgentId(1), h(8, 2));

        let left = store.remove(AgentId(1)).unwrap();
        assert_eq!(left.len(), 1);
        assert!(!store.contains(AgentId(1)));
        assert!(store.remove(AgentId(1)).is_none());
        assert_eq!(store.present_count(), 2);

        let ids: Vec<_> = store.ids().collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(2)]);
    }
}
