//! Checkpoint and resume for state machines.
//!
//! A checkpoint records the current state id and every consumed transition
//! slot, so a machine rebuilt over fresh state objects can pick up where the
//! previous one stopped. States themselves are not serialized; the integrator
//! re-registers them before restoring.
//!
//! Checkpointing allocates and belongs outside the control loop.

use crate::core::{EventId, StateId, TransitionEntry};
use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's current state and transition table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint<S, E> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Current state of the machine, if initialized
    pub current_state: Option<S>,

    /// Every consumed transition slot in order, tombstones included
    pub transitions: Vec<TransitionEntry<S, E>>,
}

impl<S, E> Checkpoint<S, E>
where
    S: Serialize + DeserializeOwned,
    E: Serialize + DeserializeOwned,
{
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }
}

impl<S, E> Checkpoint<S, E> {
    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<S, E, const STATES: usize, const TRANSITIONS: usize, const QUEUE: usize>
    StateMachine<'_, S, E, STATES, TRANSITIONS, QUEUE>
where
    S: StateId,
    E: EventId,
{
    /// Capture the current state id and transition table.
    pub fn checkpoint(&self) -> Checkpoint<S, E> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            current_state: self.current_state_id(),
            transitions: self.transitions.entries().collect(),
        }
    }

    /// Resume from a checkpoint.
    ///
    /// The machine must be uninitialized and have every state the checkpoint
    /// needs already registered. The transition table is replaced wholesale,
    /// then the recorded current state is entered as if by
    /// `set_initial_state`. Nothing changes if any check fails.
    pub fn restore(&mut self, checkpoint: &Checkpoint<S, E>) -> Result<(), CheckpointError> {
        checkpoint.check_version()?;
        self.resume(&checkpoint.transitions, checkpoint.current_state)?;
        debug!(checkpoint = %checkpoint.id, "restored checkpoint");
        Ok(())
    }
}
