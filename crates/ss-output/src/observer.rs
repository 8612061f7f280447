//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ss_core::{AgentId, SimClock, SimConfig, StateId, Tick};
use ss_schedule::{Action, Event};
use ss_sim::{Diagnostics, SimObserver};

use crate::row::{ActionRow, TransitionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every delivered action and every transition
/// to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<A: Action, W: OutputWriter> SimObserver<A> for SimOutputObserver<W> {
    fn on_event(&mut self, event: &Event<A>) {
        let row = ActionRow {
            agent_id:       event.target.0,
            tick:           event.trigger_time.0,
            unix_time_secs: self.clock.unix_secs_at(event.trigger_time),
            state_id:       event.origin_state.0,
            action:         event.action.name().to_owned(),
        };
        let result = self.writer.write_action(&row);
        self.store_err(result);
    }

    fn on_transition(&mut self, agent: AgentId, from: StateId, to: StateId, tick: Tick) {
        let row = TransitionRow {
            agent_id:   agent.0,
            tick:       tick.0,
            from_state: from.0,
            to_state:   to.0,
        };
        let result = self.writer.write_transition(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _diagnostics: &Diagnostics) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
