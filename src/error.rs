//! Engine error types.

use thiserror::Error;

/// Which fixed-capacity table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    States,
    Transitions,
    Events,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Table::States => f.write_str("state registry"),
            Table::Transitions => f.write_str("transition table"),
            Table::Events => f.write_str("event queue"),
        }
    }
}

/// Errors returned by registry, table and engine operations.
///
/// None of these are fatal. An operation that returns an error leaves every
/// structure exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error("a state with this id is already registered")]
    DuplicateState,

    #[error("an active transition already exists for this (state, event) pair")]
    DuplicateTransition,

    #[error("{table} is full (capacity {capacity})")]
    CapacityExceeded { table: Table, capacity: usize },

    #[error("state is not registered")]
    StateNotFound,

    #[error("no active transition for this (state, event) pair")]
    TransitionNotFound,

    #[error("machine has no current state")]
    NotInitialized,

    #[error("machine already has a current state")]
    AlreadyInitialized,
}

/// Coarse classification of [`FsmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DuplicateRegistration,
    CapacityExceeded,
    NotFound,
    NotInitialized,
}

impl FsmError {
    /// Returns the error class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsmError::DuplicateState | FsmError::DuplicateTransition => {
                ErrorKind::DuplicateRegistration
            }
            FsmError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            FsmError::StateNotFound | FsmError::TransitionNotFound => ErrorKind::NotFound,
            // A second initialization is a lifecycle misuse, grouped with
            // the other initialization-state errors.
            FsmError::NotInitialized | FsmError::AlreadyInitialized => ErrorKind::NotInitialized,
        }
    }

    /// Returns a stable error code suitable for logs and diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            FsmError::DuplicateState => "DUPLICATE_STATE",
            FsmError::DuplicateTransition => "DUPLICATE_TRANSITION",
            FsmError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            FsmError::StateNotFound => "STATE_NOT_FOUND",
            FsmError::TransitionNotFound => "TRANSITION_NOT_FOUND",
            FsmError::NotInitialized => "NOT_INITIALIZED",
            FsmError::AlreadyInitialized => "ALREADY_INITIALIZED",
        }
    }
}
