// State machine: at most one active state, strict finish-then-start ordering

use super::state::{Lifecycle, State, Transition};
use super::StateMachineError;
use crate::engine::game_loop::Tick;

/// Runs one state at a time
///
/// Changing state always finishes the old state before the new one starts,
/// and both happen inside the call, so no update ever sees two states. A
/// transition requested from `on_update` installs and starts the new state
/// immediately, but its first `on_update` is on the next tick.
#[derive(Debug)]
pub struct StateMachine<S> {
    /// Name used in logs and errors
    label: &'static str,
    /// Exclusively owned active state
    current: Option<S>,
    /// Lifecycle of the most recent state
    stage: Lifecycle,
    /// Number of states started so far
    transitions: u64,
}

impl<S> StateMachine<S> {
    /// Create an empty machine
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            current: None,
            stage: Lifecycle::NotStarted,
            transitions: 0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The active state, if any
    pub fn current(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Lifecycle of the most recent state
    pub fn stage(&self) -> Lifecycle {
        self.stage
    }

    /// Number of states started since creation
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// True exactly when no state is active
    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    /// Finish the active state (if any) and start `next`
    pub fn change_state<C>(&mut self, next: S, tick: &Tick, cx: &mut C)
    where
        S: State<C>,
    {
        self.finish_current(cx);

        log::trace!("[{}] start {}", self.label, next.name());
        let state = self.current.insert(next);
        self.stage = Lifecycle::Active;
        self.transitions += 1;
        state.on_start(tick, cx);
    }

    /// Like [`change_state`](Self::change_state), but rejects an absent state
    ///
    /// The machine is left untouched on error; emptying it is what
    /// [`reset`](Self::reset) is for.
    pub fn try_change_state<C>(
        &mut self,
        next: Option<S>,
        tick: &Tick,
        cx: &mut C,
    ) -> Result<(), StateMachineError>
    where
        S: State<C>,
    {
        let next = next.ok_or(StateMachineError::MissingState {
            machine: self.label,
        })?;
        self.change_state(next, tick, cx);
        Ok(())
    }

    /// Finish the active state (if any) and leave the machine empty
    ///
    /// Does nothing on an empty machine.
    pub fn reset<C>(&mut self, cx: &mut C)
    where
        S: State<C>,
    {
        if self.finish_current(cx) {
            self.stage = Lifecycle::Finished;
        }
    }

    /// Forward one tick to the active state and apply the transition it asks for
    pub fn update<C>(&mut self, tick: &Tick, cx: &mut C)
    where
        S: State<C>,
    {
        let Some(state) = self.current.as_mut() else {
            return;
        };

        match state.on_update(tick, cx) {
            Transition::Stay => {}
            Transition::Change(next) => self.change_state(next, tick, cx),
            Transition::Conclude => {
                log::trace!("[{}] {} concluded", self.label, state.name());
                self.reset(cx);
            }
        }
    }

    fn finish_current<C>(&mut self, cx: &mut C) -> bool
    where
        S: State<C>,
    {
        match self.current.take() {
            Some(mut old) => {
                log::trace!("[{}] finish {}", self.label, old.name());
                old.on_finish(cx);
                true
            }
            None => false,
        }
    }
}
