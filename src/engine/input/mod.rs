// Input handling system
//
// Maps keyboard events from the window into game actions for the local player.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Binding configuration and remapping
// - `player`: Pressed / just-pressed / just-released state and direction axes
// - `buffer`: Ability presses held until a fixed step consumes them
// - `manager`: Feeds winit key events through the bindings
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::new();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // Fixed steps consume ability presses, then age the buffer
// if input.player_mut().consume(Action::Bite) { /* ... */ }
// input.end_fixed_step();
//
// // Frame updates read edges, then the frame is closed
// if input.player().just_pressed(Action::Confirm) { /* ... */ }
// input.end_frame();
// ```

pub mod action;
pub mod buffer;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::PlayerInput;
