//! The `State` trait implemented by integrator-supplied states.
//!
//! A state is one mode of the system under control. The engine never owns a
//! state: it borrows it for its own lifetime and drives its enter, exit and
//! update hooks.

use super::context::Context;
use std::fmt::Debug;

/// Identifier of a state.
///
/// Any small `Copy` value with equality works. Dense `#[repr(u8)]` enums,
/// as generated by [`id_enum!`](crate::id_enum), are the intended choice.
pub trait StateId: Copy + Eq + Debug {}

impl<T: Copy + Eq + Debug> StateId for T {}

/// Identifier of an event.
pub trait EventId: Copy + Eq + Debug {}

impl<T: Copy + Eq + Debug> EventId for T {}

/// Behavior of a single state.
///
/// Every concrete state is a leaf implementer of this trait. The three hooks
/// receive a [`Context`] rather than the engine itself: a state can read the
/// current state id and post follow-up events, but cannot touch the registry
/// or the transition table.
///
/// # Hook ordering
///
/// On a successful transition the engine calls `on_exit` on the old state
/// while it is still current, switches the current state, then calls
/// `on_enter` on the new state. Events posted from any hook are processed
/// after the hook that posted them returns.
///
/// # Example
///
/// ```rust
/// use fixedstate::core::{Context, State};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum Id { Idle }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum Ev { Start }
///
/// struct Idle {
///     ticks: u32,
/// }
///
/// impl State<Id, Ev> for Idle {
///     fn id(&self) -> Id {
///         Id::Idle
///     }
///
///     fn name(&self) -> &str {
///         "Idle"
///     }
///
///     fn on_enter(&mut self, _ctx: &mut Context<'_, Id, Ev>) {
///         self.ticks = 0;
///     }
///
///     fn on_exit(&mut self, _ctx: &mut Context<'_, Id, Ev>) {}
///
///     fn on_update(&mut self, ctx: &mut Context<'_, Id, Ev>) {
///         self.ticks += 1;
///         if self.ticks == 10 {
///             let _ = ctx.post_event(Ev::Start);
///         }
///     }
/// }
/// ```
pub trait State<S: StateId, E: EventId> {
    /// Identity of this state. Must not change while registered.
    fn id(&self) -> S;

    /// Diagnostic label. Not used for identity.
    fn name(&self) -> &str;

    /// Called when the state becomes current.
    fn on_enter(&mut self, ctx: &mut Context<'_, S, E>);

    /// Called when the state stops being current.
    fn on_exit(&mut self, ctx: &mut Context<'_, S, E>);

    /// Called once per [`StateMachine::update`](crate::StateMachine::update)
    /// while the state is current.
    fn on_update(&mut self, ctx: &mut Context<'_, S, E>);
}
