//! Fixed-capacity registry of borrowed states.

use super::state::{EventId, State, StateId};
use crate::error::{FsmError, Table};

/// Exclusive borrow of an integrator-owned state.
pub type StateRef<'a, S, E> = &'a mut (dyn State<S, E> + 'a);

/// Append-only table mapping state ids to borrowed states.
///
/// Holds at most `N` states. Ids are unique; lookups are a linear scan over
/// the occupied prefix.
pub struct StateRegistry<'a, S: StateId, E: EventId, const N: usize> {
    slots: [Option<StateRef<'a, S, E>>; N],
    len: usize,
}

impl<'a, S: StateId, E: EventId, const N: usize> StateRegistry<'a, S, E, N> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            len: 0,
        }
    }

    /// Register a state under its own id.
    ///
    /// Fails with [`FsmError::DuplicateState`] if the id is taken, or
    /// [`FsmError::CapacityExceeded`] if all `N` slots are used. The
    /// duplicate check runs first.
    pub fn register(&mut self, state: StateRef<'a, S, E>) -> Result<usize, FsmError> {
        if self.contains(state.id()) {
            return Err(FsmError::DuplicateState);
        }
        if self.len == N {
            return Err(FsmError::CapacityExceeded {
                table: Table::States,
                capacity: N,
            });
        }
        let index = self.len;
        self.slots[index] = Some(state);
        self.len += 1;
        Ok(index)
    }

    /// Slot index of the state registered under `id`.
    pub fn index_of(&self, id: S) -> Option<usize> {
        self.slots[..self.len]
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|s| s.id() == id))
    }

    pub fn lookup(&self, id: S) -> Option<&(dyn State<S, E> + 'a)> {
        self.index_of(id).and_then(|index| self.get(index))
    }

    pub fn contains(&self, id: S) -> bool {
        self.index_of(id).is_some()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&(dyn State<S, E> + 'a)> {
        self.slots.get(index)?.as_deref()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut (dyn State<S, E> + 'a)> {
        self.slots.get_mut(index)?.as_deref_mut()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = S> + '_ + use<'_, 'a, S, E, N> {
        self.slots[..self.len].iter().flatten().map(|s| s.id())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn capacity(&self) -> usize {
        N
    }
}

impl<S: StateId, E: EventId, const N: usize> Default for StateRegistry<'_, S, E, N> {
    fn default() -> Self {
        Self::new()
    }
}
