// Input buffering: presses that wait for the next fixed step

use super::action::Action;
use std::collections::VecDeque;

/// Maximum number of buffered presses to store
const MAX_BUFFER_SIZE: usize = 16;

/// How long a press waits to be consumed (in fixed steps, 0.1 s at 60 Hz)
const BUFFER_DURATION: u32 = 6;

/// A press waiting in the buffer
#[derive(Debug, Clone, Copy)]
pub struct BufferedInput {
    pub action: Action,
    pub steps_remaining: u32,
}

impl BufferedInput {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            steps_remaining: BUFFER_DURATION,
        }
    }

    /// Decrease the remaining steps
    pub fn age(&mut self) {
        if self.steps_remaining > 0 {
            self.steps_remaining -= 1;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.steps_remaining == 0
    }
}

/// Presses latched per frame and consumed by the fixed step
///
/// Frames and fixed steps do not line up one to one: a fast frame may run no
/// fixed step at all and a slow one several. Each press waits here until one
/// fixed step consumes it, so it acts exactly once.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    buffer: VecDeque<BufferedInput>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_BUFFER_SIZE),
        }
    }

    /// Add a press to the buffer
    pub fn push(&mut self, action: Action) {
        // Pressing twice before a step reads it still counts once
        if !self.has(action) {
            self.buffer.push_back(BufferedInput::new(action));

            if self.buffer.len() > MAX_BUFFER_SIZE {
                self.buffer.pop_front();
            }
        }
    }

    /// Check if an action is waiting in the buffer
    pub fn has(&self, action: Action) -> bool {
        self.buffer.iter().any(|input| input.action == action)
    }

    /// Consume an action from the buffer if it exists
    /// Returns true if the action was found and consumed
    pub fn consume(&mut self, action: Action) -> bool {
        if let Some(pos) = self.buffer.iter().position(|input| input.action == action) {
            self.buffer.remove(pos);
            true
        } else {
            false
        }
    }

    /// Age every press and drop expired ones; call once per fixed step
    pub fn update(&mut self) {
        for input in &mut self.buffer {
            input.age();
        }
        self.buffer.retain(|input| !input.is_expired());
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
