//! Runtime behavior knobs for a state machine.
//!
//! Capacities are const generics on [`StateMachine`](crate::StateMachine)
//! and cannot be configured here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default limit on events handled from the posted-event queue per outer call.
pub const DEFAULT_MAX_EVENT_CHAIN: usize = 32;

/// What `set_initial_state` does when the machine already has a current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinitPolicy {
    /// Refuse with `FsmError::AlreadyInitialized`.
    #[default]
    Reject,

    /// Exit the current state and enter the requested one.
    Reset,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid machine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_event_chain must be at least 1")]
    ZeroEventChain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub reinit: ReinitPolicy,

    /// Maximum number of posted events handled after one outer operation.
    /// Events still queued past this limit are discarded.
    pub max_event_chain: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            reinit: ReinitPolicy::Reject,
            max_event_chain: DEFAULT_MAX_EVENT_CHAIN,
        }
    }
}

impl MachineConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_event_chain == 0 {
            return Err(ConfigError::ZeroEventChain);
        }
        Ok(())
    }

    pub fn with_reinit(mut self, reinit: ReinitPolicy) -> Self {
        self.reinit = reinit;
        self
    }

    pub fn with_max_event_chain(mut self, max_event_chain: usize) -> Self {
        self.max_event_chain = max_event_chain;
        self
    }
}
