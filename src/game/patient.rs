// Patients: walk in from the door, lie down, get bitten

use glam::Vec2;

use super::sprites::PatientSprites;
use super::tuning::PatientStats;
use super::world::{Body, Pathfinder};
use crate::engine::entity::EntityId;
use crate::engine::fsm::{LoopingAnimation, StateMachine};
use crate::engine::game_loop::Tick;
use crate::engine::sprite::SpriteRenderer;

/// Beds with a higher index are on the right-hand wall
const LAST_LEFT_BED: usize = 2;

#[derive(Debug)]
pub struct Patient {
    id: EntityId,
    stats: PatientStats,
    sprites: PatientSprites,
    sprite: SpriteRenderer,
    body: Body,
    pathfinder: Pathfinder,
    animation: StateMachine<LoopingAnimation>,

    bed: usize,
    walking: bool,
    bitten: bool,
    collider_enabled: bool,
    /// Sprite rotation in degrees, counter-clockwise
    rotation: f32,
}

impl Patient {
    /// Spawn at `position` and start walking to `bed_position`
    pub fn new(
        id: EntityId,
        position: Vec2,
        bed: usize,
        bed_position: Vec2,
        stats: PatientStats,
        sprites: PatientSprites,
        tick: &Tick,
    ) -> Self {
        let mut pathfinder = Pathfinder::new(stats.speed);
        pathfinder.set_target(bed_position);

        let mut patient = Self {
            id,
            body: Body::new(position, stats.radius),
            stats,
            sprites,
            sprite: SpriteRenderer::new(),
            pathfinder,
            animation: StateMachine::new("patient animation"),
            bed,
            walking: true,
            bitten: false,
            collider_enabled: true,
            rotation: 0.0,
        };
        let walk = LoopingAnimation::new(patient.sprites.movement.clone());
        patient.animation.change_state(walk, tick, &mut patient.sprite);
        patient
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn bed(&self) -> usize {
        self.bed
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn sprite(&self) -> &SpriteRenderer {
        &self.sprite
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Still on the way to the bed
    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn is_bitten(&self) -> bool {
        self.bitten
    }

    /// Whether bites and the door trigger can see this patient
    pub fn collider_enabled(&self) -> bool {
        self.collider_enabled
    }

    /// Physics step: walk, then settle into bed on arrival
    pub fn fixed_update(&mut self, tick: &Tick) {
        if !self.walking {
            return;
        }
        self.pathfinder.advance(&mut self.body, tick.delta);
        if self.pathfinder.target_reached() {
            self.lie_down(tick);
        }
    }

    /// Per-frame step: animation
    pub fn frame_update(&mut self, tick: &Tick) {
        self.animation.update(tick, &mut self.sprite);
    }

    /// The vampire fed on this patient
    ///
    /// Returns the seconds after which the patient leaves its bed.
    pub fn bitten(&mut self, tick: &Tick) -> f32 {
        log::info!("Patient {} screams", self.id);
        self.bitten = true;
        self.collider_enabled = false;
        let bitten = LoopingAnimation::new(self.sprites.bitten.clone());
        self.animation.change_state(bitten, tick, &mut self.sprite);
        self.stats.remove_time
    }

    fn lie_down(&mut self, tick: &Tick) {
        self.walking = false;
        // A live pathfinder would drag the patient back off the bed
        self.pathfinder.disable();
        self.body.velocity = Vec2::ZERO;

        let idle = LoopingAnimation::new(self.sprites.idle.clone());
        self.animation.change_state(idle, tick, &mut self.sprite);

        let mut position = self.body.position;
        position.x += 1.0;
        let mut turn = 1.0;
        if self.bed > LAST_LEFT_BED {
            turn = -1.0;
            self.sprite.flip_x = true;
            position.x -= 1.5;
            position.y -= 0.5;
        }
        self.rotation += 90.0 * turn;
        self.body.position = position;
        log::debug!("Patient {} lies down in bed {}", self.id, self.bed);
    }
}
