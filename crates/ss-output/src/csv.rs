//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `fired_actions.csv`
//! - `transitions.csv`

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::writer::OutputWriter;
use crate::{ActionRow, OutputResult, TransitionRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    actions:     Writer<File>,
    transitions: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    ///
    /// Headers are written eagerly so an empty run still yields well-formed
    /// files.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut actions = open(&dir.join("fired_actions.csv"))?;
        actions.write_record(["agent_id", "tick", "unix_time_secs", "state_id", "action"])?;

        let mut transitions = open(&dir.join("transitions.csv"))?;
        transitions.write_record(["agent_id", "tick", "from_state", "to_state"])?;

        Ok(Self {
            actions,
            transitions,
            finished: false,
        })
    }
}

fn open(path: &Path) -> OutputResult<Writer<File>> {
    Ok(WriterBuilder::new().has_headers(false).from_path(path)?)
}

impl OutputWriter for CsvWriter {
    fn write_action(&mut self, row: &ActionRow) -> OutputResult<()> {
        self.actions.serialize(row)?;
        Ok(())
    }

    fn write_transition(&mut self, row: &TransitionRow) -> OutputResult<()> {
        self.transitions.serialize(row)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.actions.flush()?;
        self.transitions.flush()?;
        Ok(())
    }
}
