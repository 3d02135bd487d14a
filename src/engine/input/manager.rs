// Input manager - turns window key events into player actions

use super::action::InputSource;
use super::config::InputConfig;
use super::player::PlayerInput;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Routes key events through the bindings into the player's input state
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(key_code, event.state == ElementState::Pressed, event.repeat);
        }
    }

    /// Process one key transition
    pub fn process_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) {
        let Some(action) = self.config.action_for(InputSource::key(key)) else {
            return;
        };

        if pressed {
            // Key repeats are not new presses
            if !repeat {
                self.player.press(action);
            }
        } else {
            self.player.release(action);
        }
    }

    /// Close the frame; call once per frame after the game has read input
    pub fn end_frame(&mut self) {
        self.player.end_frame();
    }

    /// Close a fixed step; call after every fixed update
    pub fn end_fixed_step(&mut self) {
        self.player.end_fixed_step();
    }

    /// Current input state
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Input state for the fixed step, which consumes buffered presses
    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }

    /// Forget everything currently pressed (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.player.reset();
    }
}
