//! The engine that composes the registry and the transition table.
//!
//! - **StateMachine**: owns the tables, tracks the current state and drives
//!   the enter/exit/update lifecycle
//! - **Audit**: accumulating structural check of declared transitions

mod audit;
mod engine;

pub use audit::AuditIssue;
pub use engine::{StateMachine, DEFAULT_EVENT_QUEUE, TRANSITION_TABLE_MULTIPLIER};
