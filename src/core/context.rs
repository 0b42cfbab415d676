//! Capability handle passed to state hooks, and the bounded queue behind it.

use super::state::{EventId, StateId};
use crate::error::{FsmError, Table};

/// Destination for events posted from inside a hook.
pub trait EventSink<E: EventId> {
    /// Queue an event for processing after the current hook returns.
    fn push(&mut self, event: E) -> Result<(), FsmError>;

    /// Number of events waiting to be processed.
    fn pending(&self) -> usize;
}

/// Fixed-capacity FIFO of posted events.
///
/// Storage is an inline ring buffer of `N` slots. Pushing onto a full queue
/// fails with [`FsmError::CapacityExceeded`] naming the event queue and
/// leaves the queue untouched.
#[derive(Debug, Clone)]
pub struct EventQueue<E: EventId, const N: usize> {
    slots: [Option<E>; N],
    head: usize,
    len: usize,
}

impl<E: EventId, const N: usize> EventQueue<E, N> {
    pub fn new() -> Self {
        Self {
            slots: [None; N],
            head: 0,
            len: 0,
        }
    }

    pub fn pop(&mut self) -> Option<E> {
        if self.len == 0 {
            return None;
        }
        let event = self.slots[self.head].take();
        self.head = (self.head + 1) % N;
        self.len -= 1;
        event
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Drop every queued event, returning how many were discarded.
    pub fn clear(&mut self) -> usize {
        let dropped = self.len;
        self.slots = [None; N];
        self.head = 0;
        self.len = 0;
        dropped
    }
}

impl<E: EventId, const N: usize> Default for EventQueue<E, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventId, const N: usize> EventSink<E> for EventQueue<E, N> {
    fn push(&mut self, event: E) -> Result<(), FsmError> {
        if self.len == N {
            return Err(FsmError::CapacityExceeded {
                table: Table::Events,
                capacity: N,
            });
        }
        let tail = (self.head + self.len) % N;
        self.slots[tail] = Some(event);
        self.len += 1;
        Ok(())
    }

    fn pending(&self) -> usize {
        self.len
    }
}

/// What a state hook is allowed to see and do.
///
/// A context is built by the engine for the duration of one hook call. It
/// carries a snapshot of the current state id and the triggering event, plus
/// a handle to the posted-event queue. It deliberately has no path to the
/// registry or the transition table.
pub struct Context<'q, S: StateId, E: EventId> {
    current: Option<S>,
    trigger: Option<E>,
    sink: &'q mut dyn EventSink<E>,
}

impl<'q, S: StateId, E: EventId> Context<'q, S, E> {
    pub(crate) fn new(
        current: Option<S>,
        trigger: Option<E>,
        sink: &'q mut dyn EventSink<E>,
    ) -> Self {
        Self {
            current,
            trigger,
            sink,
        }
    }

    /// Id of the machine's current state as seen by this hook.
    ///
    /// Inside `on_exit` this is still the state being left; inside
    /// `on_enter` it is already the state being entered.
    pub fn current_state(&self) -> Option<S> {
        self.current
    }

    /// The event that caused this hook to run. `None` during initialization
    /// and update ticks.
    pub fn trigger(&self) -> Option<E> {
        self.trigger
    }

    /// Post an event to be handled once the current hook returns.
    pub fn post_event(&mut self, event: E) -> Result<(), FsmError> {
        self.sink.push(event)
    }

    /// Number of posted events not yet handled.
    pub fn pending(&self) -> usize {
        self.sink.pending()
    }
}
