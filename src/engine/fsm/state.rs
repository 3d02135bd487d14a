// State lifecycle contract

use crate::engine::game_loop::Tick;

/// What a state asks of its machine after an update
#[derive(Debug)]
pub enum Transition<S> {
    /// Keep running this state
    Stay,
    /// Finish this state and start `S`
    Change(S),
    /// Finish this state and leave the machine empty
    Conclude,
}

/// Where a machine's most recent state is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No state has ever been started
    NotStarted,
    /// A state is running
    Active,
    /// The last state finished and nothing replaced it
    Finished,
}

/// A bundle of behaviour driven by a [`StateMachine`](super::StateMachine)
///
/// `C` is whatever the owning actor lends its states for the duration of a
/// call: a sprite slot, input, a command queue. States never hold a reference
/// to their machine; they return a [`Transition`] instead.
pub trait State<C>: Sized {
    /// Called exactly once when the state becomes active
    fn on_start(&mut self, _tick: &Tick, _cx: &mut C) {}

    /// Called once per tick while active
    fn on_update(&mut self, tick: &Tick, cx: &mut C) -> Transition<Self>;

    /// Called exactly once when the state is superseded or its machine is reset
    fn on_finish(&mut self, _cx: &mut C) {}

    /// Short name used in logs
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
