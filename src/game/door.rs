// The ward door: swings open to let a patient in, swings shut behind them

use glam::Vec2;

use crate::engine::fsm::{AnimationSequence, Animator, Playback, State, StateMachine, Transition};
use crate::engine::game_loop::Tick;
use crate::engine::sprite::SpriteRenderer;

/// What the door lends its swing states
pub struct DoorCx<'a> {
    pub sprite: &'a mut SpriteRenderer,
    /// Raised when the door finishes opening
    pub spawn_pending: &'a mut bool,
}

/// One swing of the door; the machine is empty while the door rests
#[derive(Debug, Clone)]
pub enum DoorSwing {
    Opening(Animator),
    /// Opening frames played backwards
    Closing(Animator),
}

impl<'a> State<DoorCx<'a>> for DoorSwing {
    fn on_start(&mut self, tick: &Tick, _cx: &mut DoorCx<'a>) {
        match self {
            Self::Opening(animator) | Self::Closing(animator) => animator.start(tick.time),
        }
    }

    fn on_update(&mut self, tick: &Tick, cx: &mut DoorCx<'a>) -> Transition<Self> {
        let (animator, opening) = match self {
            Self::Opening(animator) => (animator, true),
            Self::Closing(animator) => (animator, false),
        };
        match animator.step(tick.time, cx.sprite) {
            Some(step) if step.is_last() => {
                if opening {
                    *cx.spawn_pending = true;
                }
                Transition::Conclude
            }
            _ => Transition::Stay,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Opening(_) => "door opening",
            Self::Closing(_) => "door closing",
        }
    }
}

#[derive(Debug)]
pub struct Door {
    position: Vec2,
    trigger_radius: f32,
    sequence: AnimationSequence,
    sprite: SpriteRenderer,
    machine: StateMachine<DoorSwing>,
    spawn_pending: bool,
}

impl Door {
    /// A closed door
    pub fn new(position: Vec2, trigger_radius: f32, sequence: AnimationSequence) -> Self {
        let mut sprite = SpriteRenderer::new();
        if let Some(closed) = sequence.first() {
            sprite.set_sprite(closed);
        }
        Self {
            position,
            trigger_radius,
            sequence,
            sprite,
            machine: StateMachine::new("door"),
            spawn_pending: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn trigger_radius(&self) -> f32 {
        self.trigger_radius
    }

    pub fn sprite(&self) -> &SpriteRenderer {
        &self.sprite
    }

    /// Not currently swinging
    pub fn is_idle(&self) -> bool {
        self.machine.is_finished()
    }

    /// Start opening; ignored mid-swing. Returns whether the door started.
    pub fn open_door(&mut self, tick: &Tick) -> bool {
        self.swing(DoorSwing::Opening(Animator::new(self.sequence.clone())), tick)
    }

    /// Start closing; ignored mid-swing. Returns whether the door started.
    pub fn close_door(&mut self, tick: &Tick) -> bool {
        let animator = Animator::new(self.sequence.clone()).with_playback(Playback::Reverse);
        self.swing(DoorSwing::Closing(animator), tick)
    }

    /// A patient walked out of the door's trigger zone
    pub fn on_patient_exit(&mut self, tick: &Tick) {
        if self.close_door(tick) {
            log::debug!("Door closing behind a patient");
        }
    }

    /// Per-frame step
    pub fn update(&mut self, tick: &Tick) {
        let mut cx = DoorCx {
            sprite: &mut self.sprite,
            spawn_pending: &mut self.spawn_pending,
        };
        self.machine.update(tick, &mut cx);
    }

    /// Late-update hook: true once after the door finished opening
    pub fn take_spawn_request(&mut self) -> bool {
        std::mem::take(&mut self.spawn_pending)
    }

    fn swing(&mut self, swing: DoorSwing, tick: &Tick) -> bool {
        if !self.is_idle() {
            return false;
        }
        let mut cx = DoorCx {
            sprite: &mut self.sprite,
            spawn_pending: &mut self.spawn_pending,
        };
        self.machine.change_state(swing, tick, &mut cx);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sprite::SpriteHandle;

    fn door() -> Door {
        Door::new(Vec2::ZERO, 1.5, AnimationSequence::strip("ward/door", 4, 6.0))
    }

    fn frame(i: usize) -> Option<SpriteHandle> {
        Some(SpriteHandle::named(&format!("ward/door_{}", i)))
    }

    #[test]
    fn test_new_door_is_closed_and_idle() {
        let door = door();
        assert!(door.is_idle());
        assert_eq!(door.sprite().sprite(), frame(0));
    }

    #[test]
    fn test_open_raises_spawn_once() {
        let mut door = door();
        assert!(door.open_door(&Tick::at(0.0)));
        assert!(!door.is_idle());

        door.update(&Tick::at(0.25));
        assert!(!door.take_spawn_request());

        // 4 frames at 6 fps: final frame at 0.5s
        door.update(&Tick::at(0.5));
        assert_eq!(door.sprite().sprite(), frame(3));
        assert!(door.is_idle());
        assert!(door.take_spawn_request());
        assert!(!door.take_spawn_request());
    }

    #[test]
    fn test_open_ignored_mid_swing() {
        let mut door = door();
        assert!(door.open_door(&Tick::at(0.0)));
        assert!(!door.open_door(&Tick::at(0.1)));
        assert!(!door.close_door(&Tick::at(0.1)));
    }

    #[test]
    fn test_close_plays_backwards_without_spawn() {
        let mut door = door();
        door.open_door(&Tick::at(0.0));
        door.update(&Tick::at(0.5));
        door.take_spawn_request();

        door.on_patient_exit(&Tick::at(1.0));
        door.update(&Tick::at(1.0));
        assert_eq!(door.sprite().sprite(), frame(3));
        door.update(&Tick::at(1.5));
        assert_eq!(door.sprite().sprite(), frame(0));
        assert!(door.is_idle());
        assert!(!door.take_spawn_request());
    }
}
