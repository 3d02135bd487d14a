// The vampire: the player's actor
//
// Driven by two independent machines. The animation machine owns the sprite;
// the movement machine owns velocity and acts on the ability keys. States never
// touch the other machine directly, they push a `VampireCommand` that the
// vampire applies once the machine call returns.

use glam::Vec2;

use super::sprites::VampireSprites;
use super::tuning::VampireStats;
use super::world::{Body, Contact, Layer};
use crate::engine::entity::EntityId;
use crate::engine::fsm::{Animator, Playback, State, StateMachine, Transition};
use crate::engine::game_loop::Tick;
use crate::engine::input::{Action, PlayerInput};
use crate::engine::sprite::{SpriteRenderer, Tint};

/// Red/white switches in one damage flash (5 red, 5 white)
const FLASH_TOGGLES: u32 = 10;
/// Seconds each flash colour is held
const FLASH_INTERVAL: f32 = 0.1;
/// Seconds between bat point updates
const BAT_POWER_INTERVAL: f32 = 1.0;

/// Requests states make of their vampire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VampireCommand {
    /// Start changing into (or out of) bat form
    Metamorphosis,
    SummonWolves,
    Bite,
    /// Switch the movement machine
    Movement(VampireMovement),
    /// The death animation played its final frame
    Died,
}

/// What the ward has to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VampireEvent {
    /// Hunters must run to their corners
    WolvesSummoned,
    /// Look for a patient `reach` units straight below `origin`
    Bite { origin: Vec2, reach: f32 },
    /// Remove the vampire and end the run
    Died,
}

/// What the vampire lends its animation states
pub struct AnimationCx<'a> {
    pub input: &'a PlayerInput,
    pub sprite: &'a mut SpriteRenderer,
    pub sprites: &'a VampireSprites,
    pub commands: &'a mut Vec<VampireCommand>,
}

/// Ability presses one fixed step acts on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityPresses {
    pub metamorphosis: bool,
    pub summon_wolves: bool,
    pub bite: bool,
}

impl AbilityPresses {
    /// Take the buffered presses out of `input`
    pub fn take(input: &mut PlayerInput) -> Self {
        Self {
            metamorphosis: input.consume(Action::Metamorphosis),
            summon_wolves: input.consume(Action::SummonWolves),
            bite: input.consume(Action::Bite),
        }
    }
}

/// What the vampire lends its movement states
pub struct MovementCx<'a> {
    pub input: &'a PlayerInput,
    /// Presses not acted on this step are dropped
    pub abilities: AbilityPresses,
    pub body: &'a mut Body,
    pub stats: &'a VampireStats,
    pub is_bat: bool,
    pub bat_points: i32,
    pub wolves_ready: bool,
    pub commands: &'a mut Vec<VampireCommand>,
}

/// Animation states
#[derive(Debug, Clone)]
pub enum VampireAnimation {
    /// Standing pose, waits for a direction key
    Idle,
    /// Walk cycle while `key` stays held
    Walk { animator: Animator, key: Action },
    /// One-shot change of form
    Metamorphosis { animator: Animator, to_bat: bool },
    BatFlight { animator: Animator },
    /// One-shot bite, back to idle afterwards
    Attack { animator: Animator },
    /// One-shot, reports `Died` on its final frame
    Death { animator: Animator },
}

impl VampireAnimation {
    pub fn walk(sprites: &VampireSprites, key: Action) -> Self {
        Self::Walk {
            animator: Animator::new(sprites.movement.clone()),
            key,
        }
    }

    /// Turning back into a human plays the same frames backwards
    pub fn metamorphosis(sprites: &VampireSprites, to_bat: bool) -> Self {
        let playback = if to_bat {
            Playback::Forward
        } else {
            Playback::Reverse
        };
        Self::Metamorphosis {
            animator: Animator::new(sprites.to_bat.clone()).with_playback(playback),
            to_bat,
        }
    }

    pub fn bat_flight(sprites: &VampireSprites) -> Self {
        Self::BatFlight {
            animator: Animator::new(sprites.bat.clone()),
        }
    }

    pub fn attack(sprites: &VampireSprites) -> Self {
        Self::Attack {
            animator: Animator::new(sprites.attack.clone()),
        }
    }

    pub fn death(sprites: &VampireSprites) -> Self {
        Self::Death {
            animator: Animator::new(sprites.death.clone()),
        }
    }
}

impl<'a> State<AnimationCx<'a>> for VampireAnimation {
    fn on_start(&mut self, tick: &Tick, cx: &mut AnimationCx<'a>) {
        match self {
            Self::Idle => {
                if let Some(pose) = cx.sprites.movement.first() {
                    cx.sprite.set_sprite(pose);
                }
            }
            Self::Walk { animator, .. }
            | Self::Metamorphosis { animator, .. }
            | Self::BatFlight { animator }
            | Self::Attack { animator }
            | Self::Death { animator } => animator.start(tick.time),
        }
    }

    fn on_update(&mut self, tick: &Tick, cx: &mut AnimationCx<'a>) -> Transition<Self> {
        match self {
            Self::Idle => match cx.input.direction_just_pressed() {
                Some(key) => Transition::Change(Self::walk(cx.sprites, key)),
                None => Transition::Stay,
            },
            Self::Walk { animator, key } => {
                if animator.step(tick.time, cx.sprite).is_none() {
                    return Transition::Stay;
                }
                if cx.input.is_pressed(*key) {
                    Transition::Stay
                } else {
                    Transition::Change(Self::Idle)
                }
            }
            Self::Metamorphosis { animator, to_bat } => {
                match animator.step(tick.time, cx.sprite) {
                    Some(step) if step.is_last() => {
                        if *to_bat {
                            cx.commands
                                .push(VampireCommand::Movement(VampireMovement::Bat));
                            Transition::Change(Self::bat_flight(cx.sprites))
                        } else {
                            cx.commands
                                .push(VampireCommand::Movement(VampireMovement::Normal));
                            Transition::Change(Self::Idle)
                        }
                    }
                    _ => Transition::Stay,
                }
            }
            Self::BatFlight { animator } => {
                animator.step(tick.time, cx.sprite);
                Transition::Stay
            }
            Self::Attack { animator } => match animator.step(tick.time, cx.sprite) {
                Some(step) if step.is_last() => Transition::Change(Self::Idle),
                _ => Transition::Stay,
            },
            Self::Death { animator } => match animator.step(tick.time, cx.sprite) {
                Some(step) if step.is_last() => {
                    cx.commands.push(VampireCommand::Died);
                    Transition::Conclude
                }
                _ => Transition::Stay,
            },
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk { .. } => "walk",
            Self::Metamorphosis { .. } => "metamorphosis",
            Self::BatFlight { .. } => "bat flight",
            Self::Attack { .. } => "attack",
            Self::Death { .. } => "death",
        }
    }
}

/// Movement states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VampireMovement {
    /// Walking; abilities available in human form
    Normal,
    /// Flying; only the change back is available
    Bat,
    /// Frozen while dying
    Stunned,
}

impl<'a> State<MovementCx<'a>> for VampireMovement {
    fn on_start(&mut self, _tick: &Tick, cx: &mut MovementCx<'a>) {
        if *self == Self::Stunned {
            cx.body.velocity = Vec2::ZERO;
        }
    }

    fn on_update(&mut self, tick: &Tick, cx: &mut MovementCx<'a>) -> Transition<Self> {
        let input = cx.input;
        let pressed = cx.abilities;
        match self {
            Self::Normal => {
                cx.body.velocity =
                    input.direction() * cx.stats.walking_velocity * tick.delta_fraction;

                // No abilities mid-change
                if !cx.is_bat {
                    if pressed.metamorphosis && cx.bat_points > 0 {
                        cx.commands.push(VampireCommand::Metamorphosis);
                    }
                    if pressed.summon_wolves && cx.wolves_ready {
                        cx.commands.push(VampireCommand::SummonWolves);
                    }
                    if pressed.bite {
                        cx.commands.push(VampireCommand::Bite);
                    }
                }
            }
            Self::Bat => {
                cx.body.velocity =
                    input.direction() * cx.stats.flying_velocity * tick.delta_fraction;

                if pressed.metamorphosis && cx.is_bat {
                    cx.commands.push(VampireCommand::Metamorphosis);
                }
            }
            Self::Stunned => {}
        }
        Transition::Stay
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal movement",
            Self::Bat => "bat movement",
            Self::Stunned => "stunned",
        }
    }
}

/// Red/white blink after a hit
#[derive(Debug, Clone, Default)]
struct DamageFlash {
    toggles_left: u32,
    timer: f32,
}

impl DamageFlash {
    fn start(&mut self, sprite: &mut SpriteRenderer) {
        self.toggles_left = FLASH_TOGGLES;
        self.timer = 0.0;
        sprite.tint = Tint::Red;
    }

    fn update(&mut self, delta: f32, sprite: &mut SpriteRenderer) {
        if self.toggles_left == 0 {
            return;
        }
        self.timer += delta;
        while self.timer >= FLASH_INTERVAL && self.toggles_left > 0 {
            self.timer -= FLASH_INTERVAL;
            self.toggles_left -= 1;
        }
        sprite.tint = if self.toggles_left > 0 && self.toggles_left % 2 == 0 {
            Tint::Red
        } else {
            Tint::White
        };
    }
}

#[derive(Debug)]
pub struct Vampire {
    id: EntityId,
    stats: VampireStats,
    sprites: VampireSprites,
    sprite: SpriteRenderer,
    body: Body,

    animation: StateMachine<VampireAnimation>,
    movement: StateMachine<VampireMovement>,
    commands: Vec<VampireCommand>,

    health: i32,
    dead: bool,
    is_bat: bool,
    bat_points: i32,

    /// Seconds since the last hunter hit on contact enter
    hit_cooldown_timer: f32,
    /// Seconds of continuous hunter contact since the last hit
    contact_damage_timer: f32,
    wolf_cooldown_timer: f32,
    bat_power_timer: f32,
    flash: DamageFlash,
}

impl Vampire {
    /// Spawn standing still in human form with full health and bat points
    pub fn new(
        id: EntityId,
        position: Vec2,
        stats: VampireStats,
        sprites: VampireSprites,
        tick: &Tick,
    ) -> Self {
        let mut vampire = Self {
            id,
            body: Body::new(position, stats.radius),
            health: stats.max_health,
            bat_points: stats.total_bat_points,
            stats,
            sprites,
            sprite: SpriteRenderer::new(),
            animation: StateMachine::new("vampire animation"),
            movement: StateMachine::new("vampire movement"),
            commands: Vec::new(),
            dead: false,
            is_bat: false,
            hit_cooldown_timer: 0.0,
            contact_damage_timer: 0.0,
            wolf_cooldown_timer: 0.0,
            bat_power_timer: 0.0,
            flash: DamageFlash::default(),
        };

        let input = PlayerInput::new();
        vampire.change_animation(VampireAnimation::Idle, tick, &input);
        vampire.change_movement(VampireMovement::Normal, tick, &input);
        vampire
    }

    pub fn id(&self) -> EntityId {
        self.id
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

    pub fn stats(&self) -> &VampireStats {
        &self.stats
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_bat(&self) -> bool {
        self.is_bat
    }

    pub fn bat_points(&self) -> i32 {
        self.bat_points
    }

    pub fn wolf_cooldown_timer(&self) -> f32 {
        self.wolf_cooldown_timer
    }

    pub fn layer(&self) -> Layer {
        if self.is_bat {
            Layer::Bat
        } else {
            Layer::Dracula
        }
    }

    pub fn animation_state(&self) -> Option<&VampireAnimation> {
        self.animation.current()
    }

    pub fn movement_state(&self) -> Option<VampireMovement> {
        self.movement.current().copied()
    }

    /// Physics step: movement, bat points and wolf cooldown
    ///
    /// Consumes the buffered ability presses, so each press acts on exactly
    /// one step.
    pub fn fixed_update(&mut self, tick: &Tick, input: &mut PlayerInput) -> Vec<VampireEvent> {
        let mut events = Vec::new();
        let abilities = AbilityPresses::take(input);
        let input: &PlayerInput = input;

        let mut cx = MovementCx {
            input,
            abilities,
            body: &mut self.body,
            stats: &self.stats,
            is_bat: self.is_bat,
            bat_points: self.bat_points,
            wolves_ready: self.wolf_cooldown_timer >= self.stats.wolf_cooldown,
            commands: &mut self.commands,
        };
        self.movement.update(tick, &mut cx);
        self.apply_commands(tick, input, &mut events);

        self.body.integrate(tick.delta);

        self.bat_power_timer += tick.delta;
        if self.bat_power_timer > BAT_POWER_INTERVAL {
            self.bat_power_timer = 0.0;
            if self.is_bat {
                self.set_bat_points(self.bat_points - self.stats.bat_deplete);
            } else {
                self.set_bat_points(self.bat_points + self.stats.bat_regen);
            }
            if self.bat_points <= 0 {
                self.bat_points = 0;
                if self.is_bat {
                    log::debug!("Out of bat points, changing back");
                    self.begin_metamorphosis(tick, input);
                }
            }
        }

        self.wolf_cooldown_timer += tick.delta;
        events
    }

    /// Per-frame step: animation and damage flash
    pub fn frame_update(&mut self, tick: &Tick, input: &PlayerInput) -> Vec<VampireEvent> {
        let mut events = Vec::new();

        let mut cx = AnimationCx {
            input,
            sprite: &mut self.sprite,
            sprites: &self.sprites,
            commands: &mut self.commands,
        };
        self.animation.update(tick, &mut cx);
        self.apply_commands(tick, input, &mut events);

        self.hit_cooldown_timer += tick.delta;
        self.flash.update(tick.delta, &mut self.sprite);
        events
    }

    /// Set health, clamped to the maximum
    ///
    /// A drop larger than the passive damage flashes the sprite. Reaching
    /// zero kills the vampire once.
    pub fn set_health(&mut self, value: i32, tick: &Tick) {
        if self.health - value > self.stats.continuous_damage && value > 0 {
            self.flash.start(&mut self.sprite);
        }

        self.health = value.min(self.stats.max_health);

        if value <= 0 && !self.dead {
            self.dead = true;
            self.kill(tick);
        }
    }

    /// Clamped to the total; the caller handles running out
    pub fn set_bat_points(&mut self, value: i32) {
        self.bat_points = value.min(self.stats.total_bat_points);
    }

    /// Damage taken every passive damage interval
    pub fn passive_damage(&mut self, tick: &Tick) {
        self.set_health(self.health - self.stats.continuous_damage, tick);
    }

    /// A bite landed on a patient
    pub fn feed(&mut self, tick: &Tick) {
        self.set_health(self.health + self.stats.health_restored, tick);
    }

    /// React to a hunter touching the vampire during a physics step
    pub fn on_hunter_contact(&mut self, contact: Contact, hunter_hiding: bool, tick: &Tick) {
        match contact {
            Contact::Enter => {
                if !hunter_hiding && self.hit_cooldown_timer >= self.stats.damage_cooldown {
                    self.set_health(self.health - self.stats.damage_taken, tick);
                    self.hit_cooldown_timer = 0.0;
                }
            }
            Contact::Stay => {
                self.contact_damage_timer += tick.delta;
                if self.contact_damage_timer >= self.stats.damage_cooldown && !hunter_hiding {
                    self.set_health(self.health - self.stats.damage_taken, tick);
                    self.contact_damage_timer = 0.0;
                }
            }
            Contact::Exit => self.contact_damage_timer = 0.0,
        }
    }

    fn kill(&mut self, tick: &Tick) {
        log::info!("Vampire {} is dying", self.id);
        let input = PlayerInput::new();
        self.change_movement(VampireMovement::Stunned, tick, &input);
        let death = VampireAnimation::death(&self.sprites);
        self.change_animation(death, tick, &input);
    }

    fn begin_metamorphosis(&mut self, tick: &Tick, input: &PlayerInput) {
        let to_bat = !self.is_bat;
        let next = VampireAnimation::metamorphosis(&self.sprites, to_bat);
        self.change_animation(next, tick, input);
        self.is_bat = to_bat;
        log::debug!("Vampire changing {}", if to_bat { "into a bat" } else { "back" });
    }

    fn apply_commands(&mut self, tick: &Tick, input: &PlayerInput, events: &mut Vec<VampireEvent>) {
        while !self.commands.is_empty() {
            let batch = std::mem::take(&mut self.commands);
            for command in batch {
                match command {
                    VampireCommand::Metamorphosis => self.begin_metamorphosis(tick, input),
                    VampireCommand::SummonWolves => {
                        log::info!("Children of the night!");
                        self.wolf_cooldown_timer = 0.0;
                        events.push(VampireEvent::WolvesSummoned);
                    }
                    VampireCommand::Bite => {
                        let attack = VampireAnimation::attack(&self.sprites);
                        self.change_animation(attack, tick, input);
                        events.push(VampireEvent::Bite {
                            origin: self.body.position,
                            reach: self.stats.attack_distance,
                        });
                    }
                    VampireCommand::Movement(next) => self.change_movement(next, tick, input),
                    VampireCommand::Died => events.push(VampireEvent::Died),
                }
            }
        }
    }

    fn change_animation(&mut self, next: VampireAnimation, tick: &Tick, input: &PlayerInput) {
        let mut cx = AnimationCx {
            input,
            sprite: &mut self.sprite,
            sprites: &self.sprites,
            commands: &mut self.commands,
        };
        self.animation.change_state(next, tick, &mut cx);
    }

    fn change_movement(&mut self, next: VampireMovement, tick: &Tick, input: &PlayerInput) {
        let mut cx = MovementCx {
            input,
            abilities: AbilityPresses::default(),
            body: &mut self.body,
            stats: &self.stats,
            is_bat: self.is_bat,
            bat_points: self.bat_points,
            wolves_ready: self.wolf_cooldown_timer >= self.stats.wolf_cooldown,
            commands: &mut self.commands,
        };
        self.movement.change_state(next, tick, &mut cx);
    }
}
