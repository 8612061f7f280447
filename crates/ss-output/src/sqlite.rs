//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `fired_actions` and `transitions`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ActionRow, OutputResult, TransitionRow};

/// Writes simulation output to an SQLite database.
///
/// Rows are inserted inside one long transaction that is committed by
/// [`finish`](OutputWriter::finish), or on drop if `finish` never ran (a run
/// that ended in a `SimError` skips `on_sim_end`), so rows written before a
/// failure are kept.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS fired_actions (
                 agent_id       INTEGER NOT NULL,
                 tick           INTEGER NOT NULL,
                 unix_time_secs INTEGER NOT NULL,
                 state_id       INTEGER NOT NULL,
                 action         TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS transitions (
                 agent_id   INTEGER NOT NULL,
                 tick       INTEGER NOT NULL,
                 from_state INTEGER NOT NULL,
                 to_state   INTEGER NOT NULL
             );
             BEGIN;",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_action(&mut self, row: &ActionRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO fired_actions (agent_id, tick, unix_time_secs, state_id, action) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        stmt.execute(rusqlite::params![
            row.agent_id,
            row.tick as i64,
            row.unix_time_secs,
            row.state_id,
            row.action,
        ])?;
        Ok(())
    }

    fn write_transition(&mut self, row: &TransitionRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO transitions (agent_id, tick, from_state, to_state) \
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        stmt.execute(rusqlite::params![row.agent_id, row.tick as i64, row.from_state, row.to_state])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("COMMIT; PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

impl Drop for SqliteWriter {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.conn.execute_batch("COMMIT;") {
            tracing::warn!(error = %e, "failed to commit unfinished output.db");
        }
    }
}
