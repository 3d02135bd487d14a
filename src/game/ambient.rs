// Scenery that just loops a clip: the fireplace, the title artwork

use glam::Vec2;

use crate::engine::fsm::{AnimationSequence, LoopingAnimation, StateMachine};
use crate::engine::game_loop::Tick;
use crate::engine::sprite::SpriteRenderer;

#[derive(Debug)]
pub struct AmbientAnimation {
    position: Vec2,
    sprite: SpriteRenderer,
    machine: StateMachine<LoopingAnimation>,
}

impl AmbientAnimation {
    pub fn new(label: &'static str, position: Vec2, sequence: AnimationSequence, tick: &Tick) -> Self {
        let mut sprite = SpriteRenderer::new();
        let mut machine = StateMachine::new(label);
        machine.change_state(LoopingAnimation::new(sequence), tick, &mut sprite);
        Self {
            position,
            sprite,
            machine,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn sprite(&self) -> &SpriteRenderer {
        &self.sprite
    }

    pub fn update(&mut self, tick: &Tick) {
        self.machine.update(tick, &mut self.sprite);
    }
}
