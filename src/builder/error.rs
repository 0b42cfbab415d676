//! Build errors for the machine builder.

use crate::config::ConfigError;
use crate::error::FsmError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(id) before .build()")]
    MissingInitialState,

    #[error("Machine configuration rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("Machine rejected a builder step: {0}")]
    Machine(#[from] FsmError),
}
