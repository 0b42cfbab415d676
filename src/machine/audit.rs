//! Structural audit of a machine's transition graph.
//!
//! Transitions may reference states that are registered later, so the table
//! is never validated on insert. `audit` reports every active transition that
//! would currently be refused, accumulating all findings rather than stopping
//! at the first.

use super::engine::StateMachine;
use crate::core::{EventId, StateId};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// A problem found by [`StateMachine::audit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditIssue<S, E> {
    /// The transition's source state is not registered, so it can never fire.
    UnknownSource { from: S, event: E },

    /// The transition's destination is not registered; taking it fails.
    DanglingTarget { from: S, event: E, to: S },
}

impl<S, E, const STATES: usize, const TRANSITIONS: usize, const QUEUE: usize>
    StateMachine<'_, S, E, STATES, TRANSITIONS, QUEUE>
where
    S: StateId,
    E: EventId,
{
    /// Check every active transition against the registry.
    ///
    /// A `Success` means every declared transition can currently be taken.
    /// The audit allocates and never changes the machine.
    pub fn audit(&self) -> Validation<(), NonEmptyVec<AuditIssue<S, E>>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<AuditIssue<S, E>>>> = Vec::new();

        for entry in self.transitions.iter_active() {
            if !self.registry.contains(entry.from) {
                checks.push(Validation::fail(AuditIssue::UnknownSource {
                    from: entry.from,
                    event: entry.event,
                }));
            }
            if !self.registry.contains(entry.to) {
                checks.push(Validation::fail(AuditIssue::DanglingTarget {
                    from: entry.from,
                    event: entry.event,
                    to: entry.to,
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
