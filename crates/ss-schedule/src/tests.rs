//! Unit tests for ss-schedule.

use ss_core::{AgentId, StateId, Tick};

use crate::{Action, EventQueue, ScheduleError};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
enum Ping {
    Wake,
    Tag(u32),
}

impl Action for Ping {
    fn name(&self) -> &str {
        match self {
            Ping::Wake   => "Wake",
            Ping::Tag(_) => "Tag",
        }
    }
}

const S0: StateId = StateId(0);

fn drain(queue: &mut EventQueue<Ping>) -> Vec<(Tick, u64, AgentId)> {
    std::iter::from_fn(|| queue.advance_to_next())
        .map(|e| (e.trigger_time, e.sequence, e.target))
        .collect()
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ordering {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.schedule(Tick(30), AgentId(0), Ping::Wake, S0).unwrap();
        q.schedule(Tick(10), AgentId(1), Ping::Wake, S0).unwrap();
        q.schedule(Tick(20), AgentId(2), Ping::Wake, S0).unwrap();

        let ticks: Vec<Tick> = drain(&mut q).into_iter().map(|(t, _, _)| t).collect();
        assert_eq!(ticks, vec![Tick(10), Tick(20), Tick(30)]);
    }

    #[test]
    fn equal_times_fire_in_registration_order() {
        let mut q = EventQueue::new();
        q.schedule(Tick(50), AgentId(7), Ping::Wake, S0).unwrap();
        q.schedule(Tick(50), AgentId(2), Ping::Wake, S0).unwrap();
        q.schedule(Tick(50), AgentId(5), Ping::Wake, S0).unwrap();

        let agents: Vec<AgentId> = drain(&mut q).into_iter().map(|(_, _, a)| a).collect();
        assert_eq!(agents, vec![AgentId(7), AgentId(2), AgentId(5)]);
    }

    #[test]
    fn pop_advances_clock() {
        let mut q = EventQueue::new();
        q.schedule(Tick(40), AgentId(0), Ping::Wake, S0).unwrap();
        assert_eq!(q.now(), Tick(0));
        let e = q.advance_to_next().unwrap();
        assert_eq!(e.trigger_time, Tick(40));
        assert_eq!(q.now(), Tick(40));
        assert!(q.advance_to_next().is_none());
        assert_eq!(q.now(), Tick(40));
    }

    #[test]
    fn event_carries_payload_and_handle() {
        let mut q = EventQueue::new();
        let h = q.schedule(Tick(3), AgentId(9), Ping::Tag(77), StateId(4)).unwrap();
        let e = q.advance_to_next().unwrap();
        assert_eq!(e.action, Ping::Tag(77));
        assert_eq!(e.origin_state, StateId(4));
        assert_eq!(e.handle(), h);
    }

    #[test]
    fn zero_delay_after_pop_goes_behind_existing_same_tick_events() {
        let mut q = EventQueue::new();
        q.schedule(Tick(100), AgentId(0), Ping::Tag(0), S0).unwrap();
        q.schedule(Tick(100), AgentId(1), Ping::Tag(1), S0).unwrap();

        let first = q.advance_to_next().unwrap();
        assert_eq!(first.action, Ping::Tag(0));
        // Scheduled "now" while handling the first event.
        q.schedule(q.now(), AgentId(0), Ping::Tag(2), S0).unwrap();

        let rest: Vec<Ping> = std::iter::from_fn(|| q.advance_to_next()).map(|e| e.action).collect();
        assert_eq!(rest, vec![Ping::Tag(1), Ping::Tag(2)]);
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod cancellation {
    use super::*;

    #[test]
    fn cancel_before_fire_removes_event() {
        let mut q = EventQueue::new();
        let a = q.schedule(Tick(10), AgentId(0), Ping::Tag(1), S0).unwrap();
        q.schedule(Tick(20), AgentId(0), Ping::Tag(2), S0).unwrap();

        assert!(q.is_pending(a));
        assert!(q.cancel(a));
        assert!(!q.is_pending(a));
        assert_eq!(q.len(), 1);

        let fired: Vec<Ping> = std::iter::from_fn(|| q.advance_to_next()).map(|e| e.action).collect();
        assert_eq!(fired, vec![Ping::Tag(2)]);
    }

    #[test]
    fn cancel_after_fire_is_a_reported_noop() {
        let mut q = EventQueue::new();
        let a = q.schedule(Tick(10), AgentId(0), Ping::Wake, S0).unwrap();
        let b = q.schedule(Tick(20), AgentId(0), Ping::Wake, S0).unwrap();
        q.advance_to_next().unwrap();

        assert!(!q.cancel(a));
        assert!(q.is_pending(b));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn double_cancel_returns_false() {
        let mut q = EventQueue::new();
        let a = q.schedule(Tick(10), AgentId(0), Ping::Wake, S0).unwrap();
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
    }

    #[test]
    fn owner_lookup() {
        let mut q = EventQueue::new();
        let a = q.schedule(Tick(10), AgentId(3), Ping::Wake, S0).unwrap();
        assert_eq!(q.owner(a), Some(AgentId(3)));
        q.cancel(a);
        assert_eq!(q.owner(a), None);
    }
}

// ── Past-dated scheduling ─────────────────────────────────────────────────────

#[cfg(test)]
mod invalid_schedule {
    use super::*;

    #[test]
    fn past_time_fails_without_mutation() {
        let mut q = EventQueue::new();
        q.schedule(Tick(10), AgentId(0), Ping::Wake, S0).unwrap();
        q.schedule(Tick(30), AgentId(0), Ping::Wake, S0).unwrap();
        q.advance_to_next().unwrap(); // now = 10

        let seq_before = q.next_sequence();
        let err = q.schedule(Tick(9), AgentId(4), Ping::Wake, StateId(2)).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidSchedule {
                agent: AgentId(4),
                state: StateId(2),
                at:    Tick(9),
                now:   Tick(10),
            }
        );
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_sequence(), seq_before);
        assert_eq!(q.peek_time(), Some(Tick(30)));
    }

    #[test]
    fn current_time_is_allowed() {
        let mut q = EventQueue::new();
        q.schedule(Tick(10), AgentId(0), Ping::Wake, S0).unwrap();
        q.advance_to_next().unwrap();
        assert!(q.schedule(Tick(10), AgentId(0), Ping::Wake, S0).is_ok());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn pop_order_is_time_then_sequence(times in prop::collection::vec(0u64..50, 0..64)) {
            let mut q = EventQueue::new();
            for (i, t) in times.iter().enumerate() {
                q.schedule(Tick(*t), AgentId(i as u32), Ping::Wake, S0).unwrap();
            }
            let popped = drain(&mut q);
            prop_assert_eq!(popped.len(), times.len());
            for pair in popped.windows(2) {
                let (t0, s0, _) = pair[0];
                let (t1, s1, _) = pair[1];
                prop_assert!(t0 < t1 || (t0 == t1 && s0 < s1));
            }
        }

        #[test]
        fn cancelled_events_never_fire(
            times  in prop::collection::vec(0u64..50, 1..64),
            cancel in prop::collection::vec(any::<bool>(), 64),
        ) {
            let mut q = EventQueue::new();
            let handles: Vec<_> = times
                .iter()
                .map(|t| q.schedule(Tick(*t), AgentId(0), Ping::Wake, S0).unwrap())
                .collect();

            let mut kept = Vec::new();
            for (h, c) in handles.iter().zip(cancel.iter().copied()) {
                if c {
                    prop_assert!(q.cancel(*h));
                } else {
                    kept.push(*h);
                }
            }
            kept.sort();

            let fired: Vec<_> = std::iter::from_fn(|| q.advance_to_next()).map(|e| e.handle()).collect();
            prop_assert_eq!(&fired, &kept);
            for h in handles {
                prop_assert!(!q.cancel(h));
            }
        }
    }
}
