// Finite state machines and sprite animation states
//
// Every actor drives its behaviour through one or more `StateMachine`s:
// - `clock`: frame index from elapsed time and frame rate
// - `sequence`: immutable, shareable frame lists and playback direction
// - `state`: the lifecycle contract a state implements
// - `machine`: holds at most one active state and sequences transitions
// - `animation`: reusable animation payloads and the looping player state
//
// Per-actor state sets are plain enums implementing `State`, so each actor's
// behaviour is one exhaustive `match`.

pub mod animation;
pub mod clock;
pub mod machine;
pub mod sequence;
pub mod state;

// Re-export commonly used types
pub use animation::{Animator, FrameStep, LoopingAnimation};
pub use clock::AnimationClock;
pub use machine::StateMachine;
pub use sequence::{AnimationSequence, Playback};
pub use state::{Lifecycle, State, Transition};

/// State machine misuse
#[derive(Debug, thiserror::Error)]
pub enum StateMachineError {
    #[error("No state given to machine '{machine}' (use reset() to empty it)")]
    MissingState { machine: &'static str },
}
