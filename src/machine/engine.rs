//! The state machine engine.

use crate::config::{ConfigError, MachineConfig, ReinitPolicy};
use crate::core::{
    Context, EventId, EventQueue, State, StateId, StateRef, StateRegistry, TransitionEntry,
    TransitionTable,
};
use crate::error::FsmError;
use tracing::{debug, trace, warn};

/// Recommended transition capacity per state: `TRANSITIONS = STATES * 4`.
pub const TRANSITION_TABLE_MULTIPLIER: usize = 4;

/// Default capacity of the posted-event queue.
pub const DEFAULT_EVENT_QUEUE: usize = 8;

#[derive(Clone, Copy, Debug)]
enum Hook {
    Enter,
    Exit,
    Update,
}

/// Fixed-capacity finite state machine over borrowed states.
///
/// `STATES` bounds the registry, `TRANSITIONS` the transition table and
/// `QUEUE` the number of events hooks may post before they are handled. All
/// storage is inline; nothing on the registration, event or update path
/// allocates.
///
/// The machine starts uninitialized. [`set_initial_state`](Self::set_initial_state)
/// makes it active, and from then on only successful event handling changes
/// the current state.
///
/// # Example
///
/// ```rust
/// use fixedstate::core::{Context, State};
/// use fixedstate::StateMachine;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum Id { Idle, Running }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum Ev { Start }
///
/// struct Mode(Id);
///
/// impl State<Id, Ev> for Mode {
///     fn id(&self) -> Id { self.0 }
///     fn name(&self) -> &str { "mode" }
///     fn on_enter(&mut self, _ctx: &mut Context<'_, Id, Ev>) {}
///     fn on_exit(&mut self, _ctx: &mut Context<'_, Id, Ev>) {}
///     fn on_update(&mut self, _ctx: &mut Context<'_, Id, Ev>) {}
/// }
///
/// let mut idle = Mode(Id::Idle);
/// let mut running = Mode(Id::Running);
///
/// let mut machine: StateMachine<'_, Id, Ev, 2, 8> = StateMachine::new();
/// machine.add_state(&mut idle).unwrap();
/// machine.add_state(&mut running).unwrap();
/// machine.add_transition(Id::Idle, Ev::Start, Id::Running).unwrap();
///
/// machine.set_initial_state(Id::Idle).unwrap();
/// machine.handle_event(Ev::Start).unwrap();
/// assert_eq!(machine.current_state_id(), Some(Id::Running));
/// ```
pub struct StateMachine<
    'a,
    S: StateId,
    E: EventId,
    const STATES: usize,
    const TRANSITIONS: usize,
    const QUEUE: usize = { DEFAULT_EVENT_QUEUE },
> {
    pub(crate) registry: StateRegistry<'a, S, E, STATES>,
    pub(crate) transitions: TransitionTable<S, E, TRANSITIONS>,
    queue: EventQueue<E, QUEUE>,
    /// Registry slot of the current state.
    current: Option<usize>,
    config: MachineConfig,
}

impl<'a, S, E, const STATES: usize, const TRANSITIONS: usize, const QUEUE: usize>
    StateMachine<'a, S, E, STATES, TRANSITIONS, QUEUE>
where
    S: StateId,
    E: EventId,
{
    pub fn new() -> Self {
        Self::empty(MachineConfig::default())
    }

    /// Create an empty machine with `config`, rejecting invalid settings
    /// such as a zero event chain limit.
    pub fn with_config(config: MachineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    fn empty(config: MachineConfig) -> Self {
        Self {
            registry: StateRegistry::new(),
            transitions: TransitionTable::new(),
            queue: EventQueue::new(),
            current: None,
            config,
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Register a state. The state stays borrowed for the machine's lifetime.
    pub fn add_state(&mut self, state: StateRef<'a, S, E>) -> Result<(), FsmError> {
        let index = self.registry.register(state)?;
        if let Some(state) = self.registry.get(index) {
            debug!(id = ?state.id(), name = state.name(), "registered state");
        }
        Ok(())
    }

    /// Look up a registered state by id.
    pub fn state(&self, id: S) -> Option<&(dyn State<S, E> + 'a)> {
        self.registry.lookup(id)
    }

    /// Declare `from --event--> to`.
    ///
    /// Neither `from` nor `to` has to be registered yet. A transition whose
    /// destination is still unregistered when it is taken is refused with
    /// [`FsmError::StateNotFound`] and leaves the machine where it was.
    pub fn add_transition(&mut self, from: S, event: E, to: S) -> Result<(), FsmError> {
        self.transitions.add(from, event, to)?;
        debug!(from = ?from, event = ?event, to = ?to, "added transition");
        Ok(())
    }

    pub fn remove_transition(&mut self, from: S, event: E) -> Result<(), FsmError> {
        self.transitions.remove(from, event)?;
        debug!(from = ?from, event = ?event, "removed transition");
        Ok(())
    }

    pub fn find_transition(&self, from: S, event: E) -> Option<TransitionEntry<S, E>> {
        self.transitions.find(from, event)
    }

    /// Reclaim transition slots freed by [`remove_transition`](Self::remove_transition).
    pub fn compact_transitions(&mut self) -> usize {
        let freed = self.transitions.compact();
        debug!(freed, "compacted transition table");
        freed
    }

    /// Make `id` the current state and enter it.
    ///
    /// An unregistered `id` fails with [`FsmError::StateNotFound`] and changes
    /// nothing. If the machine is already active the configured
    /// [`ReinitPolicy`] applies: `Reject` fails with
    /// [`FsmError::AlreadyInitialized`], `Reset` exits the current state
    /// before entering `id`.
    pub fn set_initial_state(&mut self, id: S) -> Result<(), FsmError> {
        let index = self.registry.index_of(id).ok_or(FsmError::StateNotFound)?;
        if let Some(old) = self.current {
            if self.config.reinit == ReinitPolicy::Reject {
                return Err(FsmError::AlreadyInitialized);
            }
            debug!(from = ?self.current_state_id(), to = ?id, "resetting machine");
            self.invoke(old, Hook::Exit, None);
        }
        self.current = Some(index);
        debug!(state = ?id, "initial state entered");
        self.invoke(index, Hook::Enter, None);
        self.drain();
        Ok(())
    }

    /// Handle `event` in the current state.
    ///
    /// On success the old state's `on_exit` runs, the current state switches
    /// to the destination, then the destination's `on_enter` runs. Events
    /// posted by those hooks are handled afterwards, in order. On failure no
    /// hook runs and the current state is unchanged.
    pub fn handle_event(&mut self, event: E) -> Result<(), FsmError> {
        self.dispatch(event)?;
        self.drain();
        Ok(())
    }

    /// Handle `event`, discarding the outcome.
    pub fn post_event(&mut self, event: E) {
        if let Err(err) = self.handle_event(event) {
            debug!(event = ?event, error = %err, "event ignored");
        }
    }

    /// Run the current state's `on_update` hook once.
    ///
    /// Does not consult the transition table, but events the hook posts are
    /// handled before returning.
    pub fn update(&mut self) -> Result<(), FsmError> {
        let index = self.current.ok_or(FsmError::NotInitialized)?;
        trace!(state = ?self.current_state_id(), "update");
        self.invoke(index, Hook::Update, None);
        self.drain();
        Ok(())
    }

    pub fn current_state(&self) -> Option<&(dyn State<S, E> + 'a)> {
        self.current.and_then(|index| self.registry.get(index))
    }

    pub fn current_state_id(&self) -> Option<S> {
        self.current_state().map(|state| state.id())
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    pub fn state_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of live transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.active_len()
    }

    pub fn registry(&self) -> &StateRegistry<'a, S, E, STATES> {
        &self.registry
    }

    pub fn transitions(&self) -> &TransitionTable<S, E, TRANSITIONS> {
        &self.transitions
    }

    /// Resolve and take one transition without draining posted events.
    fn dispatch(&mut self, event: E) -> Result<(), FsmError> {
        let from_index = self.current.ok_or(FsmError::NotInitialized)?;
        let from = self.current_state_id().ok_or(FsmError::NotInitialized)?;
        let entry = self
            .transitions
            .find(from, event)
            .ok_or(FsmError::TransitionNotFound)?;
        let to_index = self
            .registry
            .index_of(entry.to)
            .ok_or(FsmError::StateNotFound)?;

        self.invoke(from_index, Hook::Exit, Some(event));
        self.current = Some(to_index);
        debug!(from = ?from, event = ?event, to = ?entry.to, "transition");
        self.invoke(to_index, Hook::Enter, Some(event));
        Ok(())
    }

    /// Handle events posted by hooks until the queue is empty or the chain
    /// limit is reached.
    fn drain(&mut self) {
        let mut handled = 0;
        while let Some(event) = self.queue.pop() {
            if handled == self.config.max_event_chain {
                let dropped = self.queue.clear() + 1;
                warn!(
                    limit = self.config.max_event_chain,
                    dropped, "event chain limit reached, discarding posted events"
                );
                return;
            }
            handled += 1;
            if let Err(err) = self.dispatch(event) {
                debug!(event = ?event, error = %err, "posted event rejected");
            }
        }
    }

    fn invoke(&mut self, index: usize, hook: Hook, trigger: Option<E>) {
        let current = self.current_state_id();
        let Some(state) = self.registry.get_mut(index) else {
            return;
        };
        let mut ctx = Context::new(current, trigger, &mut self.queue);
        match hook {
            Hook::Enter => state.on_enter(&mut ctx),
            Hook::Exit => state.on_exit(&mut ctx),
            Hook::Update => state.on_update(&mut ctx),
        }
    }

    /// Install a transition table and current state in one step. Used when
    /// resuming from a checkpoint.
    pub(crate) fn resume(
        &mut self,
        entries: &[TransitionEntry<S, E>],
        current: Option<S>,
    ) -> Result<(), FsmError> {
        if self.current.is_some() {
            return Err(FsmError::AlreadyInitialized);
        }
        let index = match current {
            Some(id) => Some(self.registry.index_of(id).ok_or(FsmError::StateNotFound)?),
            None => None,
        };
        self.transitions.load(entries)?;
        if let Some(index) = index {
            self.current = Some(index);
            debug!(state = ?self.current_state_id(), "resumed state entered");
            self.invoke(index, Hook::Enter, None);
            self.drain();
        }
        Ok(())
    }
}

impl<S, E, const STATES: usize, const TRANSITIONS: usize, const QUEUE: usize> Default
    for StateMachine<'_, S, E, STATES, TRANSITIONS, QUEUE>
where
    S: StateId,
    E: EventId,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Table;
    use std::cell::RefCell;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Id {
        Idle,
        Running,
        Stopped,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Ev {
        Start,
        Stop,
        Pause,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Call {
        Enter(Id),
        Exit(Id),
        Update(Id),
    }

    /// Log entry: the hook that ran and the current state it observed.
    type Log = RefCell<Vec<(Call, Option<Id>)>>;

    struct Tracker<'l> {
        id: Id,
        log: &'l Log,
        post_on_enter: Option<Ev>,
        post_on_update: Option<Ev>,
    }

    impl<'l> Tracker<'l> {
        fn new(id: Id, log: &'l Log) -> Self {
            Self {
                id,
                log,
                post_on_enter: None,
                post_on_update: None,
            }
        }
    }

    impl State<Id, Ev> for Tracker<'_> {
        fn id(&self) -> Id {
            self.id
        }

        fn name(&self) -> &str {
            match self.id {
                Id::Idle => "Idle",
                Id::Running => "Running",
                Id::Stopped => "Stopped",
            }
        }

        fn on_enter(&mut self, ctx: &mut Context<'_, Id, Ev>) {
            self.log
                .borrow_mut()
                .push((Call::Enter(self.id), ctx.current_state()));
            if let Some(event) = self.post_on_enter {
                let _ = ctx.post_event(event);
            }
        }

        fn on_exit(&mut self, ctx: &mut Context<'_, Id, Ev>) {
            self.log
                .borrow_mut()
                .push((Call::Exit(self.id), ctx.current_state()));
        }

        fn on_update(&mut self, ctx: &mut Context<'_, Id, Ev>) {
            self.log
                .borrow_mut()
                .push((Call::Update(self.id), ctx.current_state()));
            if let Some(event) = self.post_on_update {
                let _ = ctx.post_event(event);
            }
        }
    }

    fn calls(log: &Log) -> Vec<Call> {
        log.borrow().iter().map(|(call, _)| *call).collect()
    }

    #[test]
    fn machine_starts_uninitialized() {
        let machine: StateMachine<'_, Id, Ev, 2, 8> = StateMachine::new();
        assert!(machine.current_state().is_none());
        assert!(!machine.is_initialized());
    }

    #[test]
    fn start_event_moves_idle_to_running() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        let mut running = Tracker::new(Id::Running, &log);

        let mut machine: StateMachine<'_, Id, Ev, 3, 8> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();
        machine.set_initial_state(Id::Idle).unwrap();
        log.borrow_mut().clear();

        assert!(machine.handle_event(Ev::Start).is_ok());
        assert_eq!(machine.current_state_id(), Some(Id::Running));
        assert_eq!(
            *log.borrow(),
            vec![
                (Call::Exit(Id::Idle), Some(Id::Idle)),
                (Call::Enter(Id::Running), Some(Id::Running)),
            ]
        );
    }

    #[test]
    fn unknown_event_is_refused_without_callbacks() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        let mut running = Tracker::new(Id::Running, &log);

        let mut machine: StateMachine<'_, Id, Ev, 3, 8> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();
        machine.set_initial_state(Id::Idle).unwrap();
        log.borrow_mut().clear();

        assert_eq!(
            machine.handle_event(Ev::Stop),
            Err(FsmError::TransitionNotFound)
        );
        assert!(log.borrow().is_empty());
        assert_eq!(machine.current_state_id(), Some(Id::Idle));
    }

    #[test]
    fn events_before_initialization_fail() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);

        let mut machine: StateMachine<'_, Id, Ev, 2, 8> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Idle)
            .unwrap();

        assert_eq!(machine.handle_event(Ev::Start), Err(FsmError::NotInitialized));
        assert_eq!(machine.update(), Err(FsmError::NotInitialized));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn dangling_destination_leaves_state_unchanged() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);

        let mut machine: StateMachine<'_, Id, Ev, 2, 8> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();
        machine.set_initial_state(Id::Idle).unwrap();
        log.borrow_mut().clear();

        assert_eq!(machine.handle_event(Ev::Start), Err(FsmError::StateNotFound));
        assert_eq!(machine.current_state_id(), Some(Id::Idle));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn destination_registered_later_is_reachable() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        let mut running = Tracker::new(Id::Running, &log);

        let mut machine: StateMachine<'_, Id, Ev, 2, 8> = StateMachine::new();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();
        machine.add_state(&mut idle).unwrap();
        machine.set_initial_state(Id::Idle).unwrap();
        assert!(machine.handle_event(Ev::Start).is_err());

        machine.add_state(&mut running).unwrap();
        assert!(machine.handle_event(Ev::Start).is_ok());
        assert_eq!(machine.current_state_id(), Some(Id::Running));
    }

    #[test]
    fn initial_state_must_be_registered() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);

        let mut machine: StateMachine<'_, Id, Ev, 2, 8> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();

        assert_eq!(
            machine.set_initial_state(Id::Running),
            Err(FsmError::StateNotFound)
        );
        assert!(!machine.is_initialized());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn reinitialization_is_rejected_by_default() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        let mut running = Tracker::new(Id::Running, &log);

        let mut machine: StateMachine<'_, Id, Ev, 2, 8> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine.set_initial_state(Id::Idle).unwrap();

        assert_eq!(
            machine.set_initial_state(Id::Running),
            Err(FsmError::AlreadyInitialized)
        );
        assert_eq!(machine.current_state_id(), Some(Id::Idle));
        assert_eq!(calls(&log), vec![Call::Enter(Id::Idle)]);
    }

    #[test]
    fn reset_policy_exits_then_enters() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        let mut running = Tracker::new(Id::Running, &log);

        let config = MachineConfig::default().with_reinit(ReinitPolicy::Reset);
        let mut machine: StateMachine<'_, Id, Ev, 2, 8> =
            StateMachine::with_config(config).unwrap();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine.set_initial_state(Id::Running).unwrap();
        machine.set_initial_state(Id::Idle).unwrap();

        assert_eq!(machine.current_state_id(), Some(Id::Idle));
        assert_eq!(
            calls(&log),
            vec![
                Call::Enter(Id::Running),
                Call::Exit(Id::Running),
                Call::Enter(Id::Idle),
            ]
        );
    }

    #[test]
    fn update_runs_hook_once_per_tick() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        let mut running = Tracker::new(Id::Running, &log);

        let mut machine: StateMachine<'_, Id, Ev, 2, 8> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();
        machine.set_initial_state(Id::Idle).unwrap();
        log.borrow_mut().clear();

        for _ in 0..5 {
            machine.update().unwrap();
        }

        assert_eq!(calls(&log), vec![Call::Update(Id::Idle); 5]);
        assert_eq!(machine.current_state_id(), Some(Id::Idle));
    }

    #[test]
    fn events_posted_from_enter_run_after_the_transition() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        let mut running = Tracker::new(Id::Running, &log);
        running.post_on_enter = Some(Ev::Stop);
        let mut stopped = Tracker::new(Id::Stopped, &log);

        let mut machine: StateMachine<'_, Id, Ev, 3, 8> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine.add_state(&mut stopped).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();
        machine
            .add_transition(Id::Running, Ev::Stop, Id::Stopped)
            .unwrap();
        machine.set_initial_state(Id::Idle).unwrap();
        log.borrow_mut().clear();

        machine.handle_event(Ev::Start).unwrap();

        assert_eq!(machine.current_state_id(), Some(Id::Stopped));
        assert_eq!(
            calls(&log),
            vec![
                Call::Exit(Id::Idle),
                Call::Enter(Id::Running),
                Call::Exit(Id::Running),
                Call::Enter(Id::Stopped),
            ]
        );
    }

    #[test]
    fn update_can_trigger_a_transition_by_posting() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        idle.post_on_update = Some(Ev::Start);
        let mut running = Tracker::new(Id::Running, &log);

        let mut machine: StateMachine<'_, Id, Ev, 2, 8> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();
        machine.set_initial_state(Id::Idle).unwrap();

        machine.update().unwrap();
        assert_eq!(machine.current_state_id(), Some(Id::Running));
    }

    #[test]
    fn event_chain_limit_stops_ping_pong() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        idle.post_on_enter = Some(Ev::Start);
        let mut running = Tracker::new(Id::Running, &log);
        running.post_on_enter = Some(Ev::Stop);

        let config = MachineConfig::default().with_max_event_chain(3);
        let mut machine: StateMachine<'_, Id, Ev, 2, 8> =
            StateMachine::with_config(config).unwrap();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();
        machine
            .add_transition(Id::Running, Ev::Stop, Id::Idle)
            .unwrap();

        // Initial Start is posted by Idle's enter hook; three chained
        // events run: Idle->Running, Running->Idle, Idle->Running.
        machine.set_initial_state(Id::Idle).unwrap();

        assert_eq!(machine.current_state_id(), Some(Id::Running));
        let enters = calls(&log)
            .into_iter()
            .filter(|call| matches!(call, Call::Enter(_)))
            .count();
        assert_eq!(enters, 4);
    }

    #[test]
    fn zero_event_chain_config_is_rejected() {
        let config = MachineConfig::default().with_max_event_chain(0);
        let result = StateMachine::<'_, Id, Ev, 2, 8>::with_config(config);
        assert!(matches!(result, Err(ConfigError::ZeroEventChain)));

        let config = MachineConfig::default().with_max_event_chain(1);
        let machine = StateMachine::<'_, Id, Ev, 2, 8>::with_config(config).unwrap();
        assert_eq!(machine.config().max_event_chain, 1);
    }

    #[test]
    fn single_event_chain_still_delivers_posted_event() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        idle.post_on_update = Some(Ev::Start);
        let mut running = Tracker::new(Id::Running, &log);

        let config = MachineConfig::default().with_max_event_chain(1);
        let mut machine: StateMachine<'_, Id, Ev, 2, 8> =
            StateMachine::with_config(config).unwrap();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();
        machine.set_initial_state(Id::Idle).unwrap();

        machine.update().unwrap();
        assert_eq!(machine.current_state_id(), Some(Id::Running));
    }

    #[test]
    fn rejected_posted_events_are_ignored() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        idle.post_on_update = Some(Ev::Pause);

        let mut machine: StateMachine<'_, Id, Ev, 1, 4> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine.set_initial_state(Id::Idle).unwrap();

        assert!(machine.update().is_ok());
        assert_eq!(machine.current_state_id(), Some(Id::Idle));
    }

    #[test]
    fn removed_transition_no_longer_fires() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        let mut running = Tracker::new(Id::Running, &log);

        let mut machine: StateMachine<'_, Id, Ev, 2, 2> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();
        machine.remove_transition(Id::Idle, Ev::Start).unwrap();
        machine.set_initial_state(Id::Idle).unwrap();

        assert_eq!(
            machine.handle_event(Ev::Start),
            Err(FsmError::TransitionNotFound)
        );
        assert_eq!(machine.transition_count(), 0);
        assert_eq!(machine.transitions().occupied(), 1);

        machine
            .add_transition(Id::Idle, Ev::Stop, Id::Running)
            .unwrap();
        assert_eq!(
            machine.add_transition(Id::Running, Ev::Stop, Id::Idle),
            Err(FsmError::CapacityExceeded {
                table: Table::Transitions,
                capacity: 2
            })
        );

        assert_eq!(machine.compact_transitions(), 1);
        assert!(machine.add_transition(Id::Running, Ev::Stop, Id::Idle).is_ok());
    }

    #[test]
    fn lookup_works_before_initialization() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);

        let mut machine: StateMachine<'_, Id, Ev, 1, 4> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();

        assert_eq!(machine.state(Id::Idle).map(|s| s.name()), Some("Idle"));
        assert!(machine.state(Id::Running).is_none());
        assert_eq!(machine.state_count(), 1);
    }

    #[test]
    fn post_event_swallows_failures() {
        let log = Log::default();
        let mut idle = Tracker::new(Id::Idle, &log);
        let mut running = Tracker::new(Id::Running, &log);

        let mut machine: StateMachine<'_, Id, Ev, 2, 4> = StateMachine::new();
        machine.add_state(&mut idle).unwrap();
        machine.add_state(&mut running).unwrap();
        machine
            .add_transition(Id::Idle, Ev::Start, Id::Running)
            .unwrap();

        machine.post_event(Ev::Start);
        assert!(!machine.is_initialized());

        machine.set_initial_state(Id::Idle).unwrap();
        machine.post_event(Ev::Pause);
        assert_eq!(machine.current_state_id(), Some(Id::Idle));
        machine.post_event(Ev::Start);
        assert_eq!(machine.current_state_id(), Some(Id::Running));
    }
}
