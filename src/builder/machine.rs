//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{EventId, StateId, StateRef};
use crate::machine::{StateMachine, DEFAULT_EVENT_QUEUE};

/// Builder for constructing state machines with a fluent API.
///
/// Each step is applied to the machine immediately. The first step that
/// fails is remembered, later steps are skipped, and `build` returns that
/// error.
pub struct MachineBuilder<
    'a,
    S: StateId,
    E: EventId,
    const STATES: usize,
    const TRANSITIONS: usize,
    const QUEUE: usize = { DEFAULT_EVENT_QUEUE },
> {
    machine: StateMachine<'a, S, E, STATES, TRANSITIONS, QUEUE>,
    initial: Option<S>,
    error: Option<BuildError>,
}

impl<'a, S, E, const STATES: usize, const TRANSITIONS: usize, const QUEUE: usize>
    MachineBuilder<'a, S, E, STATES, TRANSITIONS, QUEUE>
where
    S: StateId,
    E: EventId,
{
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            machine: StateMachine::new(),
            initial: None,
            error: None,
        }
    }

    /// Create a builder for a machine using `config`.
    ///
    /// An invalid configuration is reported by `build`.
    pub fn with_config(config: MachineConfig) -> Self {
        match StateMachine::with_config(config) {
            Ok(machine) => Self {
                machine,
                initial: None,
                error: None,
            },
            Err(error) => Self {
                error: Some(error.into()),
                ..Self::new()
            },
        }
    }

    /// Register a state.
    pub fn state(mut self, state: StateRef<'a, S, E>) -> Self {
        if self.error.is_none() {
            self.error = self.machine.add_state(state).err().map(BuildError::from);
        }
        self
    }

    /// Declare a transition.
    pub fn transition(mut self, from: S, event: E, to: S) -> Self {
        if self.error.is_none() {
            self.error = self
                .machine
                .add_transition(from, event, to)
                .err()
                .map(BuildError::from);
        }
        self
    }

    /// Declare several transitions at once.
    pub fn transitions<I>(self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (S, E, S)>,
    {
        transitions
            .into_iter()
            .fold(self, |builder, (from, event, to)| {
                builder.transition(from, event, to)
            })
    }

    /// Set the initial state (required).
    pub fn initial(mut self, id: S) -> Self {
        self.initial = Some(id);
        self
    }

    /// Build the machine and enter its initial state.
    pub fn build(self) -> Result<StateMachine<'a, S, E, STATES, TRANSITIONS, QUEUE>, BuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut machine = self.machine;
        machine.set_initial_state(initial)?;
        Ok(machine)
    }
}

impl<S, E, const STATES: usize, const TRANSITIONS: usize, const QUEUE: usize> Default
    for MachineBuilder<'_, S, E, STATES, TRANSITIONS, QUEUE>
where
    S: StateId,
    E: EventId,
{
    fn default() -> Self {
        Self::new()
    }
}
