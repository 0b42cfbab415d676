//! Fixedstate: a fixed-capacity finite state machine engine
//!
//! Fixedstate targets resource-constrained and real-time control loops where
//! allocation is off the table. The registry of states, the transition table
//! and the posted-event queue are inline arrays sized by const generics, and
//! every operation reports failure through its return value instead of
//! growing or panicking.
//!
//! # Core Concepts
//!
//! - **State**: integrator-owned behavior with `on_enter`, `on_exit` and
//!   `on_update` hooks, borrowed by the machine for its whole lifetime
//! - **Transition**: at most one active `(from, event) -> to` edge per pair
//! - **Context**: the capability handle hooks receive; it can post events but
//!   cannot restructure the machine
//!
//! # Example
//!
//! ```rust
//! use fixedstate::core::{Context, State};
//! use fixedstate::{id_enum, StateMachine};
//!
//! id_enum! {
//!     enum Mode {
//!         Idle,
//!         Running,
//!     }
//! }
//!
//! id_enum! {
//!     enum Command {
//!         Start,
//!         Stop,
//!     }
//! }
//!
//! struct Motor {
//!     mode: Mode,
//!     ticks: u32,
//! }
//!
//! impl State<Mode, Command> for Motor {
//!     fn id(&self) -> Mode {
//!         self.mode
//!     }
//!
//!     fn name(&self) -> &str {
//!         self.mode.name()
//!     }
//!
//!     fn on_enter(&mut self, _ctx: &mut Context<'_, Mode, Command>) {
//!         self.ticks = 0;
//!     }
//!
//!     fn on_exit(&mut self, _ctx: &mut Context<'_, Mode, Command>) {}
//!
//!     fn on_update(&mut self, _ctx: &mut Context<'_, Mode, Command>) {
//!         self.ticks += 1;
//!     }
//! }
//!
//! let mut idle = Motor { mode: Mode::Idle, ticks: 0 };
//! let mut running = Motor { mode: Mode::Running, ticks: 0 };
//!
//! let mut machine: StateMachine<'_, Mode, Command, 2, 8> = StateMachine::new();
//! machine.add_state(&mut idle).unwrap();
//! machine.add_state(&mut running).unwrap();
//! machine.add_transition(Mode::Idle, Command::Start, Mode::Running).unwrap();
//! machine.add_transition(Mode::Running, Command::Stop, Mode::Idle).unwrap();
//!
//! machine.set_initial_state(Mode::Idle).unwrap();
//! machine.handle_event(Command::Start).unwrap();
//! machine.update().unwrap();
//! assert_eq!(machine.current_state_id(), Some(Mode::Running));
//!
//! // Stop has no transition out of Idle, so it would be refused there.
//! assert!(machine.find_transition(Mode::Idle, Command::Stop).is_none());
//! ```

// Lets `id_enum!` expansions name this crate the same way inside and out.
extern crate self as fixedstate;

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod error;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use config::{ConfigError, MachineConfig, ReinitPolicy};
pub use crate::core::{Context, State, TransitionEntry};
pub use error::{ErrorKind, FsmError};
pub use machine::{AuditIssue, StateMachine};

#[doc(hidden)]
pub use serde;
