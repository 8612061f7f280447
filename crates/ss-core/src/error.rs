//! Base error type.
//!
//! Sub-crates define their own error enums (`ScheduleError`, `StateError`,
//! `SimError`, …) and wrap `CoreError` where they need it.

use thiserror::Error;

/// The error type for `ss-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `SimConfig::validate` rejected the configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Shorthand result type for `ss-core`.
pub type CoreResult<T> = Result<T, CoreError>;
