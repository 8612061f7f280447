//! Per-iteration action statistics for multi-iteration experiments.

use std::collections::BTreeMap;
use std::path::Path;

use ss_core::{AgentId, StateId, Tick};
use ss_schedule::{Action, Event};
use ss_sim::SimObserver;

use crate::OutputResult;

/// Counts gathered during one iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IterationSummary {
    pub iteration:   u32,
    /// Delivered actions keyed by `Action::name()`.
    pub actions:     BTreeMap<String, u64>,
    /// Transitions, not counting initial entries.
    pub transitions: u64,
    /// Events discarded because their target was gone.
    pub dropped:     u64,
}

/// Aggregates action counts across simulation iterations.
///
/// Lifecycle:
///
/// 1. [`begin_iteration`](Self::begin_iteration) resets the in-progress
///    counters.
/// 2. Pass `&mut stats` (alone or in a tuple) as the observer to `sim.run`.
/// 3. [`finish_iteration`](Self::finish_iteration) moves the counters into
///    the history.
/// 4. [`write_csv`](Self::write_csv) flushes every finished iteration.
///
/// Events observed outside `begin_iteration` / `finish_iteration` are
/// ignored.
#[derive(Debug, Default)]
pub struct IterationStats {
    current:  Option<IterationSummary>,
    finished: Vec<IterationSummary>,
}

impl IterationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting iteration `n`, discarding any unfinished one.
    pub fn begin_iteration(&mut self, n: u32) {
        if let Some(prev) = &self.current {
            tracing::warn!(iteration = prev.iteration, "iteration discarded without finish");
        }
        self.current = Some(IterationSummary { iteration: n, ..IterationSummary::default() });
    }

    /// Finalize the in-progress iteration and return a reference to it.
    pub fn finish_iteration(&mut self) -> Option<&IterationSummary> {
        let summary = self.current.take()?;
        tracing::info!(
            iteration = summary.iteration,
            actions = summary.actions.values().sum::<u64>(),
            transitions = summary.transitions,
            dropped = summary.dropped,
            "iteration finished"
        );
        self.finished.push(summary);
        self.finished.last()
    }

    /// Every finished iteration, in completion order.
    pub fn iterations(&self) -> &[IterationSummary] {
        &self.finished
    }

    /// Write `iteration,action,count` rows for every finished iteration.
    ///
    /// Each iteration also gets `transitions` and `dropped` rows.
    pub fn write_csv(&self, path: &Path) -> OutputResult<()> {
        let mut w = csv::Writer::from_path(path)?;
        w.write_record(["iteration", "action", "count"])?;
        for s in &self.finished {
            let iteration = s.iteration.to_string();
            for (action, count) in &s.actions {
                w.write_record([iteration.as_str(), action.as_str(), &count.to_string()])?;
            }
            w.write_record([iteration.as_str(), "transitions", &s.transitions.to_string()])?;
            w.write_record([iteration.as_str(), "dropped", &s.dropped.to_string()])?;
        }
        w.flush()?;
        Ok(())
    }
}

impl<A: Action> SimObserver<A> for IterationStats {
    fn on_event(&mut self, event: &Event<A>) {
        if let Some(s) = &mut self.current {
            let name = event.action.name();
            match s.actions.get_mut(name) {
                Some(count) => *count += 1,
                None => {
                    s.actions.insert(name.to_owned(), 1);
                }
            }
        }
    }

    fn on_transition(&mut self, _agent: AgentId, from: StateId, _to: StateId, _tick: Tick) {
        if let Some(s) = &mut self.current {
            if from.is_valid() {
                s.transitions += 1;
            }
        }
    }

    fn on_dropped(&mut self, _event: &Event<A>) {
        if let Some(s) = &mut self.current {
            s.dropped += 1;
        }
    }
}
