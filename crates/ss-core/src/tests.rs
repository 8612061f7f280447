//! Unit tests for ss-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, StateId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
        assert!(AgentId::try_from(usize::MAX).is_err());
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(StateId::INVALID.0, u32::MAX);
        assert_eq!(StateId::default(), StateId::INVALID);
        assert!(!StateId::default().is_valid());
        assert!(StateId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "agent#7");
        assert_eq!(StateId(3).to_string(), "state#3");
        assert_eq!(StateId::INVALID.to_string(), "state#-");
    }
}

#[cfg(test)]
mod handle {
    use crate::{CallbackHandle, Tick};

    #[test]
    fn orders_by_tick_then_sequence() {
        let a = CallbackHandle::from_parts(Tick(5), 9);
        let b = CallbackHandle::from_parts(Tick(6), 1);
        let c = CallbackHandle::from_parts(Tick(6), 2);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn accessors_and_display() {
        let h = CallbackHandle::from_parts(Tick(100), 4);
        assert_eq!(h.tick(), Tick(100));
        assert_eq!(h.sequence(), 4);
        assert_eq!(h.to_string(), "cb#4@T100");
    }
}

#[cfg(test)]
mod time {
    use crate::{DanglingPolicy, SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(5).offset(3), Tick(8));
        assert_eq!(Tick::MAX.offset(1), Tick::MAX);
        assert_eq!(Tick(7).to_string(), "T7");
    }

    #[test]
    fn clock_advance_to_jumps() {
        let mut clock = SimClock::new(0, 60);
        clock.advance_to(Tick(90));
        assert_eq!(clock.current_tick, Tick(90));
        clock.advance_to(Tick(90));
        assert_eq!(clock.current_tick, Tick(90));
        assert_eq!(clock.elapsed_secs(), 5_400);
        assert_eq!(clock.elapsed_dhm(), (0, 1, 30));
    }

    #[test]
    fn clock_wall_time() {
        let clock = SimClock::new(1_000, 10);
        assert_eq!(clock.unix_secs_at(Tick(3)), 1_030);
    }

    #[test]
    fn config_end_tick_and_validation() {
        let mut config = SimConfig { total_ticks: 500, ..SimConfig::default() };
        assert_eq!(config.end_tick(), Tick(500));
        assert!(config.validate().is_ok());
        config.tick_duration_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_policy_tracks_build_profile() {
        let expected = if cfg!(debug_assertions) {
            DanglingPolicy::Fail
        } else {
            DanglingPolicy::ForceCancel
        };
        assert_eq!(DanglingPolicy::default(), expected);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn same_seed_same_sequence() {
        let mut a = AgentRng::new(42, AgentId(3));
        let mut b = AgentRng::new(42, AgentId(3));
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..1_000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..1_000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_agents_diverge() {
        let mut a = AgentRng::new(42, AgentId(0));
        let mut b = AgentRng::new(42, AgentId(1));
        let xs: Vec<u64> = (0..8).map(|_| a.gen_range(0..u64::MAX)).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.gen_range(0..u64::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn gen_bool_clamps() {
        let mut r = AgentRng::new(1, AgentId(0));
        assert!(r.gen_bool(2.0));
        assert!(!r.gen_bool(-1.0));
    }

    #[test]
    fn jitter_stays_in_window() {
        let mut r = AgentRng::new(9, AgentId(2));
        for _ in 0..200 {
            let d = r.jitter(30, 5);
            assert!((25..=35).contains(&d));
        }
        // Spread larger than the mean saturates at zero.
        for _ in 0..50 {
            assert!(r.jitter(2, 10) <= 12);
        }
        assert_eq!(r.jitter(7, 0), 7);
    }
}
