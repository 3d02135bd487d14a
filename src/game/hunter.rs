// Hunters: patrol the ward, chase the vampire, hide from wolves

use std::sync::Arc;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::sprites::HunterSprites;
use super::tuning::HunterStats;
use super::world::{Body, Contact, Pathfinder};
use crate::core::math::within_range;
use crate::engine::entity::EntityId;
use crate::engine::fsm::{AnimationSequence, LoopingAnimation, StateMachine};
use crate::engine::game_loop::Tick;
use crate::engine::sprite::SpriteRenderer;

/// Which clip a hunter is looping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunterPose {
    Idle,
    Moving,
    /// Moving clip, played faster
    Running,
    Stake,
    Hide,
}

#[derive(Debug)]
pub struct Hunter {
    id: EntityId,
    name: String,
    stats: HunterStats,
    sprites: HunterSprites,
    sprite: SpriteRenderer,
    body: Body,
    pathfinder: Pathfinder,
    animation: StateMachine<LoopingAnimation>,
    pose: HunterPose,

    patrol: Arc<[Vec2]>,
    /// Patrol point used as the hiding spot
    corner: usize,

    chasing: bool,
    /// Seconds of idling left, `None` while not idling
    idle_remaining: Option<f32>,
    /// Seconds since the hunter last left a patrol point
    cooldown_timer: f32,
    hiding: bool,
    /// The "!" above the hunter's head
    exclamation: bool,
}

impl Hunter {
    /// Spawn walking toward a random patrol point
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EntityId,
        name: &str,
        position: Vec2,
        corner: usize,
        patrol: Arc<[Vec2]>,
        stats: HunterStats,
        sprites: HunterSprites,
        tick: &Tick,
        rng: &mut StdRng,
    ) -> Self {
        let mut hunter = Self {
            id,
            name: name.to_string(),
            body: Body::new(position, stats.radius),
            pathfinder: Pathfinder::new(stats.speed),
            stats,
            sprites,
            sprite: SpriteRenderer::new(),
            animation: StateMachine::new("hunter animation"),
            pose: HunterPose::Moving,
            patrol,
            corner,
            chasing: false,
            idle_remaining: None,
            cooldown_timer: 0.0,
            hiding: false,
            exclamation: false,
        };
        hunter.set_pose(HunterPose::Moving, tick);
        hunter.pick_random_target(rng);
        hunter
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
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

    pub fn pose(&self) -> HunterPose {
        self.pose
    }

    pub fn is_hiding(&self) -> bool {
        self.hiding
    }

    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    pub fn shows_exclamation(&self) -> bool {
        self.exclamation
    }

    pub fn target(&self) -> Option<Vec2> {
        self.pathfinder.target()
    }

    pub fn speed(&self) -> f32 {
        self.pathfinder.speed
    }

    /// Physics step
    ///
    /// `vampire` is the vampire's position when hunters can see it, i.e. it
    /// is not a bat.
    pub fn fixed_update(&mut self, tick: &Tick, vampire: Option<Vec2>, rng: &mut StdRng) {
        self.cooldown_timer += tick.delta;

        if self.hiding {
            if self.pathfinder.target_reached() && self.pose != HunterPose::Hide {
                self.set_pose(HunterPose::Hide, tick);
            }
            self.pathfinder.advance(&mut self.body, tick.delta);
            return;
        }

        let spotted = vampire
            .filter(|v| within_range(self.body.position, *v, self.stats.detection_range));

        if let Some(target) = spotted {
            self.pathfinder.set_target(target);
            if !self.chasing {
                log::debug!("{} spotted the vampire", self.name);
            }
            self.chasing = true;
            if self.idle_remaining.take().is_some() {
                self.set_pose(HunterPose::Moving, tick);
            }
        } else if self.chasing {
            // Lost sight of it
            self.pick_random_target(rng);
            self.chasing = false;
        } else if self.pathfinder.target_reached()
            && self.cooldown_timer > self.stats.patrol_cooldown
        {
            let idle_remaining = self.idle_remaining;
            let remaining = match idle_remaining {
                Some(remaining) => remaining,
                None => {
                    self.set_pose(HunterPose::Idle, tick);
                    self.stats.idle_time
                }
            } - tick.delta;

            if remaining <= 0.0 {
                self.pick_random_target(rng);
                self.idle_remaining = None;
                self.set_pose(HunterPose::Moving, tick);
                self.cooldown_timer = 0.0;
            } else {
                self.idle_remaining = Some(remaining);
            }
        }

        self.exclamation = self.chasing;
        self.pathfinder.advance(&mut self.body, tick.delta);
    }

    /// Per-frame step: animation
    pub fn frame_update(&mut self, tick: &Tick) {
        self.animation.update(tick, &mut self.sprite);
    }

    /// The vampire touched (or stopped touching) this hunter
    pub fn on_vampire_contact(&mut self, contact: Contact, tick: &Tick, rng: &mut StdRng) {
        if self.hiding {
            return;
        }
        match contact {
            Contact::Enter => self.set_pose(HunterPose::Stake, tick),
            Contact::Exit => {
                self.set_pose(HunterPose::Moving, tick);
                self.pick_random_target(rng);
            }
            Contact::Stay => {}
        }
    }

    /// Flee to the hiding corner at extra speed
    ///
    /// Returns the seconds after which [`Hunter::resume_normal_movement`]
    /// should be called.
    pub fn run_to_corner(&mut self, tick: &Tick) -> f32 {
        match self.patrol.get(self.corner) {
            Some(corner) => self.pathfinder.set_target(*corner),
            None => log::warn!("{} has no corner {}", self.name, self.corner),
        }
        self.hiding = true;
        self.set_pose(HunterPose::Running, tick);
        self.exclamation = false;
        self.pathfinder.speed = self.stats.speed + self.stats.hide_speed_bonus;
        self.stats.hide_time
    }

    pub fn resume_normal_movement(&mut self) {
        log::debug!("{} resumes patrolling", self.name);
        self.hiding = false;
        self.pathfinder.speed = self.stats.speed;
    }

    fn pick_random_target(&mut self, rng: &mut StdRng) {
        if let Some(point) = self.patrol.choose(rng) {
            self.pathfinder.set_target(*point);
        }
    }

    /// Switch clips; a pose without frames keeps the clip already playing
    fn set_pose(&mut self, pose: HunterPose, tick: &Tick) {
        let clip = Some(self.sequence_for(pose))
            .filter(|sequence| !sequence.is_empty())
            .map(LoopingAnimation::new);
        if let Err(err) = self.animation.try_change_state(clip, tick, &mut self.sprite) {
            log::warn!("{} has no frames for {:?}: {}", self.name, pose, err);
        }
        self.pose = pose;
    }

    fn sequence_for(&self, pose: HunterPose) -> AnimationSequence {
        match pose {
            HunterPose::Idle => self.sprites.idle.clone(),
            HunterPose::Moving => self.sprites.movement.clone(),
            HunterPose::Running => self.sprites.running.clone(),
            HunterPose::Stake => self.sprites.stake.clone(),
            HunterPose::Hide => self.sprites.hide.clone(),
        }
    }
}
