//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ActionRow, OutputResult, TransitionRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with `take_error` after the run.
pub trait OutputWriter {
    /// Write one delivered action.
    fn write_action(&mut self, row: &ActionRow) -> OutputResult<()>;

    /// Write one transition.
    fn write_transition(&mut self, row: &TransitionRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
