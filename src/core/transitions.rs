//! Fixed-capacity `(from, event) -> to` table with tombstone removal.

use super::state::{EventId, StateId};
use crate::error::{FsmError, Table};
use serde::{Deserialize, Serialize};

/// One directed edge of the machine graph.
///
/// `in_use == false` marks a tombstone: the entry was removed but its slot
/// is still consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry<S, E> {
    pub from: S,
    pub event: E,
    pub to: S,
    pub in_use: bool,
}

impl<S: StateId, E: EventId> TransitionEntry<S, E> {
    fn matches(&self, from: S, event: E) -> bool {
        self.in_use && self.from == from && self.event == event
    }
}

/// Table of at most `N` transition slots.
///
/// Invariant: among entries with `in_use`, each `(from, event)` pair occurs
/// at most once.
///
/// Slots are handed out in order and `add` never reuses a tombstone, so
/// [`occupied`](Self::occupied) only grows across add/remove cycles. Size the
/// table for the total number of additions over the machine's lifetime, or
/// reclaim tombstones explicitly with [`compact`](Self::compact).
#[derive(Debug, Clone)]
pub struct TransitionTable<S: StateId, E: EventId, const N: usize> {
    slots: [Option<TransitionEntry<S, E>>; N],
    occupied: usize,
}

impl<S: StateId, E: EventId, const N: usize> TransitionTable<S, E, N> {
    pub fn new() -> Self {
        Self {
            slots: [None; N],
            occupied: 0,
        }
    }

    /// Declare `from --event--> to`.
    ///
    /// `to` is not checked against any registry here; a dangling destination
    /// is only detected when the transition is taken. Rejects a second
    /// active entry for the same `(from, event)`: the first one wins.
    pub fn add(&mut self, from: S, event: E, to: S) -> Result<(), FsmError> {
        if self.occupied == N {
            return Err(FsmError::CapacityExceeded {
                table: Table::Transitions,
                capacity: N,
            });
        }
        if self.position(from, event).is_some() {
            return Err(FsmError::DuplicateTransition);
        }
        self.slots[self.occupied] = Some(TransitionEntry {
            from,
            event,
            to,
            in_use: true,
        });
        self.occupied += 1;
        Ok(())
    }

    /// Tombstone the active entry for `(from, event)`.
    pub fn remove(&mut self, from: S, event: E) -> Result<(), FsmError> {
        let index = self
            .position(from, event)
            .ok_or(FsmError::TransitionNotFound)?;
        if let Some(entry) = self.slots[index].as_mut() {
            entry.in_use = false;
        }
        Ok(())
    }

    pub fn find(&self, from: S, event: E) -> Option<TransitionEntry<S, E>> {
        self.position(from, event).and_then(|index| self.slots[index])
    }

    fn position(&self, from: S, event: E) -> Option<usize> {
        self.slots[..self.occupied]
            .iter()
            .position(|slot| slot.is_some_and(|entry| entry.matches(from, event)))
    }

    /// Reclaim every tombstoned slot.
    ///
    /// Active entries keep their relative order. Returns the number of slots
    /// freed.
    pub fn compact(&mut self) -> usize {
        let mut write = 0;
        for read in 0..self.occupied {
            if let Some(entry) = self.slots[read].filter(|entry| entry.in_use) {
                self.slots[write] = Some(entry);
                write += 1;
            }
        }
        for slot in &mut self.slots[write..self.occupied] {
            *slot = None;
        }
        let freed = self.occupied - write;
        self.occupied = write;
        freed
    }

    /// All consumed slots, tombstones included, in slot order.
    pub fn entries(&self) -> impl Iterator<Item = TransitionEntry<S, E>> + '_ {
        self.slots[..self.occupied].iter().flatten().copied()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = TransitionEntry<S, E>> + '_ {
        self.entries().filter(|entry| entry.in_use)
    }

    /// Replace the contents with `entries`, preserving tombstones.
    ///
    /// Validates everything before touching the table: on error the table is
    /// unchanged.
    pub(crate) fn load(&mut self, entries: &[TransitionEntry<S, E>]) -> Result<(), FsmError> {
        if entries.len() > N {
            return Err(FsmError::CapacityExceeded {
                table: Table::Transitions,
                capacity: N,
            });
        }
        for (i, entry) in entries.iter().enumerate().filter(|(_, e)| e.in_use) {
            if entries[..i]
                .iter()
                .any(|prior| prior.matches(entry.from, entry.event))
            {
                return Err(FsmError::DuplicateTransition);
            }
        }
        self.slots = [None; N];
        for (slot, entry) in self.slots.iter_mut().zip(entries) {
            *slot = Some(*entry);
        }
        self.occupied = entries.len();
        Ok(())
    }

    /// Number of live transitions.
    pub fn active_len(&self) -> usize {
        self.iter_active().count()
    }

    /// Number of slots consumed, including tombstones.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied == N
    }

    pub fn capacity(&self) -> usize {
        N
    }
}

impl<S: StateId, E: EventId, const N: usize> Default for TransitionTable<S, E, N> {
    fn default() -> Self {
        Self::new()
    }
}
