//! `ss-output` — reporting collaborators for the rust_statesim core.
//!
//! Two kinds of consumer are provided, both driven through
//! `ss_sim::SimObserver`:
//!
//! - [`SimOutputObserver`] streams every delivered action and every
//!   transition to an [`OutputWriter`] backend.
//! - [`IterationStats`] aggregates per-iteration action counts for
//!   multi-iteration experiments.
//!
//! | Feature   | Backend | Files created                           |
//! |-----------|---------|-----------------------------------------|
//! | *(none)*  | CSV     | `fired_actions.csv`, `transitions.csv`  |
//! | `sqlite`  | SQLite  | `output.db`                             |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ss_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod stats;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ActionRow, TransitionRow};
pub use stats::{IterationStats, IterationSummary};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
