// Player input state: what is held, what changed this frame

use super::action::Action;
use super::buffer::InputBuffer;
use glam::Vec2;
use std::collections::HashSet;

/// Input state of the local player
#[derive(Debug, Default, Clone)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions pressed since the last frame boundary
    just_pressed: HashSet<Action>,

    /// Actions released since the last frame boundary
    just_released: HashSet<Action>,

    /// Actions that were pressed in the previous frame
    previous_pressed: HashSet<Action>,

    /// Ability presses not yet consumed by a fixed step
    buffered: InputBuffer,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Check if an action is held (pressed for multiple frames)
    pub fn is_held(&self, action: Action) -> bool {
        self.pressed.contains(&action) && self.previous_pressed.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
            if action.is_ability() {
                self.buffered.push(action);
            }
        }
    }

    /// Take a buffered ability press; true at most once per press
    pub fn consume(&mut self, action: Action) -> bool {
        self.buffered.consume(action)
    }

    /// Close a fixed step: presses left unconsumed for too long expire
    pub fn end_fixed_step(&mut self) {
        self.buffered.update();
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Close the frame: clears the per-frame edges
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed = self.pressed.clone();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed.clear();
        self.buffered.clear();
    }

    /// First directional action pressed this frame, in down/up/right/left order
    pub fn direction_just_pressed(&self) -> Option<Action> {
        Action::DIRECTIONS
            .into_iter()
            .find(|action| self.just_pressed(*action))
    }

    /// Directional input as axis values in [-1, 1], +x right, +y up
    pub fn direction(&self) -> Vec2 {
        let mut direction = Vec2::ZERO;

        if self.is_pressed(Action::MoveLeft) {
            direction.x -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            direction.x += 1.0;
        }
        if self.is_pressed(Action::MoveDown) {
            direction.y -= 1.0;
        }
        if self.is_pressed(Action::MoveUp) {
            direction.y += 1.0;
        }

        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Bite);
        assert!(input.is_pressed(Action::Bite));
        assert!(input.just_pressed(Action::Bite));
    }

    #[test]
    fn test_release_action() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveUp);
        input.end_frame();
        input.release(Action::MoveUp);
        assert!(!input.is_pressed(Action::MoveUp));
        assert!(input.just_released(Action::MoveUp));
    }

    #[test]
    fn test_edges_cleared_at_frame_end() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveUp);
        input.end_frame();
        assert!(input.is_pressed(Action::MoveUp));
        assert!(!input.just_pressed(Action::MoveUp));
        assert!(input.is_held(Action::MoveUp));
    }

    #[test]
    fn test_repeat_press_is_not_a_new_edge() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveLeft);
        input.end_frame();
        input.press(Action::MoveLeft);
        assert!(!input.just_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new();
        input.release(Action::MoveLeft);
        assert!(!input.just_released(Action::MoveLeft));
    }

    #[test]
    fn test_ability_press_consumed_once() {
        let mut input = PlayerInput::new();
        input.press(Action::Bite);
        input.press(Action::MoveUp);

        // Survives the frame boundary until a step takes it
        input.end_frame();
        assert!(input.consume(Action::Bite));
        assert!(!input.consume(Action::Bite));
        assert!(!input.consume(Action::MoveUp));
    }

    #[test]
    fn test_unconsumed_press_expires() {
        let mut input = PlayerInput::new();
        input.press(Action::SummonWolves);
        for _ in 0..60 {
            input.end_fixed_step();
        }
        assert!(!input.consume(Action::SummonWolves));
    }

    #[test]
    fn test_direction() {
        let mut input = PlayerInput::new();
        assert_eq!(input.direction(), Vec2::ZERO);

        input.press(Action::MoveRight);
        input.press(Action::MoveUp);
        assert_eq!(input.direction(), Vec2::new(1.0, 1.0));

        input.press(Action::MoveLeft);
        assert_eq!(input.direction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_direction_just_pressed() {
        let mut input = PlayerInput::new();
        assert_eq!(input.direction_just_pressed(), None);
        input.press(Action::Bite);
        input.press(Action::MoveLeft);
        assert_eq!(input.direction_just_pressed(), Some(Action::MoveLeft));
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveUp);
        input.press(Action::Bite);
        input.reset();
        assert!(!input.is_pressed(Action::MoveUp));
        assert!(!input.just_pressed(Action::MoveUp));
        assert!(!input.consume(Action::Bite));
    }
}
