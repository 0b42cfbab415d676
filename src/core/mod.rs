//! Core building blocks of the engine.
//!
//! This module contains the fixed-capacity storage the machine is built on:
//! - The `State` trait integrators implement, and the `Context` its hooks see
//! - The append-only state registry
//! - The tombstoning transition table
//!
//! Nothing in this module allocates.

mod context;
mod registry;
mod state;
mod transitions;

pub use context::{Context, EventQueue, EventSink};
pub use registry::{StateRef, StateRegistry};
pub use state::{EventId, State, StateId};
pub use transitions::{TransitionEntry, TransitionTable};
