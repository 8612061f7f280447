use ss_core::StateId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("a listener is already registered for {0}")]
    DuplicateListener(StateId),

    #[error("{0} is reserved and cannot be registered")]
    ReservedState(StateId),
}

pub type StateResult<T> = Result<T, StateError>;
