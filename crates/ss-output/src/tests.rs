//! Integration tests for ss-output.

use ss_agent::AgentStoreBuilder;
use ss_core::{AgentRng, DanglingPolicy, SimConfig, StateId};
use ss_schedule::Action;
use ss_sim::{Sim, SimBuilder};
use ss_state::{Reaction, ScheduledCallback, StateContext, StateListener, TerminalState};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Errand {
    Leave,
    Arrive,
}

impl Action for Errand {
    fn name(&self) -> &str {
        match self {
            Errand::Leave  => "Leave",
            Errand::Arrive => "Arrive",
        }
    }
}

const AT_WORK: StateId = StateId(0);
const ON_ROAD: StateId = StateId(1);
const HOME:    StateId = StateId(2);

struct AtWork;

impl StateListener<Errand> for AtWork {
    fn on_enter(&self, ctx: &StateContext<'_>, _rng: &mut AgentRng) -> Vec<ScheduledCallback<Errand>> {
        vec![ScheduledCallback::new(ctx.after(10 + ctx.agent.0 as u64), Errand::Leave)]
    }

    fn on_action(&self, _ctx: &StateContext<'_>, _action: &Errand, _rng: &mut AgentRng) -> Reaction {
        Reaction::TransitionTo(ON_ROAD)
    }
}

struct OnRoad;

impl StateListener<Errand> for OnRoad {
    fn on_enter(&self, ctx: &StateContext<'_>, _rng: &mut AgentRng) -> Vec<ScheduledCallback<Errand>> {
        vec![ScheduledCallback::new(ctx.after(5), Errand::Arrive)]
    }

    fn on_action(&self, _ctx: &StateContext<'_>, _action: &Errand, _rng: &mut AgentRng) -> Reaction {
        Reaction::TransitionTo(HOME)
    }
}

fn config() -> SimConfig {
    SimConfig {
        start_unix_secs:    1_000,
        tick_duration_secs: 60,
        total_ticks:        1_000,
        seed:               7,
        dangling_policy:    DanglingPolicy::Fail,
    }
}

fn errand_sim(agents: usize) -> Sim<Errand> {
    let (store, rngs) = AgentStoreBuilder::new(agents, 7).build();
    SimBuilder::new(config(), store, rngs)
        .listener(AT_WORK, AtWork)
        .listener(ON_ROAD, OnRoad)
        .listener(HOME, TerminalState)
        .initial_state(AT_WORK)
        .build()
        .unwrap()
}

fn read_rows(path: &std::path::Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap()).collect()
}

// ── CSV writer ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{ActionRow, CsvWriter, OutputWriter, TransitionRow};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_headers_written_eagerly() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("fired_actions.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["agent_id", "tick", "unix_time_secs", "state_id", "action"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("transitions.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["agent_id", "tick", "from_state", "to_state"]);
    }

    #[test]
    fn csv_rows_follow_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_action(&ActionRow {
            agent_id:       3,
            tick:           12,
            unix_time_secs: 1_720,
            state_id:       1,
            action:         "Arrive".into(),
        })
        .unwrap();
        w.write_transition(&TransitionRow { agent_id: 3, tick: 12, from_state: 1, to_state: 2 }).unwrap();
        w.finish().unwrap();
        // Finishing twice is harmless.
        w.finish().unwrap();

        let actions = read_rows(&dir.path().join("fired_actions.csv"));
        assert_eq!(actions.len(), 1);
        assert_eq!(&actions[0][0], "3");
        assert_eq!(&actions[0][2], "1720");
        assert_eq!(&actions[0][4], "Arrive");

        let transitions = read_rows(&dir.path().join("transitions.csv"));
        assert_eq!(&transitions[0][3], "2");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("does/not/exist"));
        assert!(result.is_err());
    }
}

// ── SimOutputObserver ─────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::{CsvWriter, SimOutputObserver};

    #[test]
    fn full_run_written_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = errand_sim(2);
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &sim.config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let actions = read_rows(&dir.path().join("fired_actions.csv"));
        let fired: Vec<(String, String)> =
            actions.iter().map(|r| (r[0].to_owned(), r[4].to_owned())).collect();
        assert_eq!(
            fired,
            vec![
                ("0".into(), "Leave".into()),
                ("1".into(), "Leave".into()),
                ("0".into(), "Arrive".into()),
                ("1".into(), "Arrive".into()),
            ]
        );
        // Agent 0 leaves at T10 → 1000 + 10 * 60.
        assert_eq!(&actions[0][1], "10");
        assert_eq!(&actions[0][2], "1600");
        assert_eq!(&actions[2][3], &ON_ROAD.0.to_string());

        // 2 initial entries + 2 transitions per agent.
        let transitions = read_rows(&dir.path().join("transitions.csv"));
        assert_eq!(transitions.len(), 6);
        assert_eq!(&transitions[0][2], &u32::MAX.to_string());
    }
}

// ── IterationStats ────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use super::*;
    use crate::{CsvWriter, IterationStats, SimOutputObserver};

    #[test]
    fn counts_are_kept_per_iteration() {
        let mut stats = IterationStats::new();
        for n in 0..2u32 {
            stats.begin_iteration(n);
            let mut sim = errand_sim(3 + n as usize);
            sim.run(&mut stats).unwrap();
            let s = stats.finish_iteration().unwrap();
            assert_eq!(s.iteration, n);
        }

        let its = stats.iterations();
        assert_eq!(its.len(), 2);
        assert_eq!(its[0].actions["Leave"], 3);
        assert_eq!(its[1].actions["Arrive"], 4);
        assert_eq!(its[1].transitions, 8);
        assert_eq!(its[0].dropped, 0);
    }

    #[test]
    fn dropped_events_are_counted() {
        let mut stats = IterationStats::new();
        stats.begin_iteration(0);
        let mut sim = errand_sim(2);
        sim.start(&mut stats).unwrap();
        sim.remove_agent(ss_core::AgentId(1)).unwrap();
        sim.run(&mut stats).unwrap();
        let s = stats.finish_iteration().unwrap();
        assert_eq!(s.dropped, 1);
        assert_eq!(s.actions["Leave"], 1);
    }

    #[test]
    fn events_outside_an_iteration_are_ignored() {
        let mut stats = IterationStats::new();
        errand_sim(2).run(&mut stats).unwrap();
        assert!(stats.finish_iteration().is_none());
        assert!(stats.iterations().is_empty());
    }

    #[test]
    fn stats_csv_has_one_row_per_action_plus_totals() {
        let dir = tempfile::tempdir().unwrap();
        let mut stats = IterationStats::new();
        stats.begin_iteration(4);
        errand_sim(1).run(&mut stats).unwrap();
        stats.finish_iteration();

        let path = dir.path().join("iterations.csv");
        stats.write_csv(&path).unwrap();
        let rows: Vec<Vec<String>> = read_rows(&path)
            .iter()
            .map(|r| r.iter().map(str::to_owned).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["4", "Arrive", "1"],
                vec!["4", "Leave", "1"],
                vec!["4", "transitions", "2"],
                vec!["4", "dropped", "0"],
            ]
        );
    }

    #[test]
    fn stats_and_writer_share_one_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = errand_sim(2);
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut stats = IterationStats::new();
        stats.begin_iteration(0);
        let mut pair = (SimOutputObserver::new(writer, &sim.config), stats);
        sim.run(&mut pair).unwrap();

        let (mut out, mut stats) = pair;
        assert!(out.take_error().is_none());
        assert_eq!(stats.finish_iteration().unwrap().actions["Arrive"], 2);
        assert_eq!(read_rows(&dir.path().join("fired_actions.csv")).len(), 4);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use super::*;
    use crate::{SimOutputObserver, SqliteWriter};

    #[test]
    fn sqlite_run_persists_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = errand_sim(2);
        let writer = SqliteWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &sim.config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        drop(obs);

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let actions: i64 = conn
            .query_row("SELECT COUNT(*) FROM fired_actions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(actions, 4);
        let last: u32 = conn
            .query_row("SELECT MAX(tick) FROM fired_actions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(last, 16);
    }

    #[test]
    fn sqlite_rows_survive_a_failed_run() {
        use crate::{ActionRow, OutputWriter};

        let dir = tempfile::tempdir().unwrap();
        {
            let mut w = SqliteWriter::new(dir.path()).unwrap();
            w.write_action(&ActionRow {
                agent_id:       0,
                tick:           10,
                unix_time_secs: 1_600,
                state_id:       AT_WORK.0,
                action:         "Leave".into(),
            })
            .unwrap();
            // Dropped without `finish`, as when `Sim::run` returns an error.
        }

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let actions: i64 = conn
            .query_row("SELECT COUNT(*) FROM fired_actions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(actions, 1);
    }
}
