// Sprite animation payloads shared by all animated states

use super::clock::AnimationClock;
use super::sequence::{AnimationSequence, Playback};
use super::state::{State, Transition};
use crate::engine::game_loop::Tick;
use crate::engine::sprite::SpriteRenderer;

/// Frame shown by one animation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStep {
    /// Clock index (position in playback order)
    pub index: usize,
    /// Sequence length
    pub len: usize,
}

impl FrameStep {
    /// Check if this step shows the final frame of the playback order
    ///
    /// One-shot states complete on this. The clock itself keeps looping, so a
    /// tick that never lands on the final index never completes.
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.len
    }
}

/// Plays a sequence in one direction against an animation clock
#[derive(Debug, Clone)]
pub struct Animator {
    sequence: AnimationSequence,
    playback: Playback,
    clock: AnimationClock,
}

impl Animator {
    /// Animate `sequence` forward at its own frame rate
    pub fn new(sequence: AnimationSequence) -> Self {
        let clock = AnimationClock::new(sequence.fps());
        Self {
            sequence,
            playback: Playback::Forward,
            clock,
        }
    }

    /// Set the playback direction for this activation
    pub fn with_playback(mut self, playback: Playback) -> Self {
        self.playback = playback;
        self
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn sequence(&self) -> &AnimationSequence {
        &self.sequence
    }

    /// Restart the clock at `now`
    pub fn start(&mut self, now: f32) {
        self.clock.start(now);
    }

    /// Show the frame for `now` on `sprite`
    ///
    /// Returns `None` without touching the sprite when the sequence is empty.
    pub fn step(&self, now: f32, sprite: &mut SpriteRenderer) -> Option<FrameStep> {
        let len = self.sequence.len();
        let index = self.clock.frame_index(now, len)?;
        if let Some(frame) = self.sequence.frame(index, self.playback) {
            sprite.set_sprite(frame);
        }
        Some(FrameStep { index, len })
    }
}

/// Loops a sequence forever; its owner swaps it out when behaviour changes
///
/// Drives fireplaces, the title screen, hunters and patients.
#[derive(Debug, Clone)]
pub struct LoopingAnimation {
    animator: Animator,
}

impl LoopingAnimation {
    pub fn new(sequence: AnimationSequence) -> Self {
        Self {
            animator: Animator::new(sequence),
        }
    }

    pub fn sequence(&self) -> &AnimationSequence {
        self.animator.sequence()
    }
}

impl State<SpriteRenderer> for LoopingAnimation {
    fn on_start(&mut self, tick: &Tick, _sprite: &mut SpriteRenderer) {
        self.animator.start(tick.time);
    }

    fn on_update(&mut self, tick: &Tick, sprite: &mut SpriteRenderer) -> Transition<Self> {
        self.animator.step(tick.time, sprite);
        Transition::Stay
    }

    fn name(&self) -> &'static str {
        "looping animation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fsm::StateMachine;
    use crate::engine::sprite::SpriteHandle;

    fn sequence(len: u64, fps: f32) -> AnimationSequence {
        let frames: Vec<SpriteHandle> = (0..len).map(SpriteHandle::from_u64).collect();
        AnimationSequence::new(frames, fps)
    }

    /// One-shot test state counting how often its completion action runs
    struct Burst {
        animator: Animator,
    }

    struct BurstCx {
        sprite: SpriteRenderer,
        completions: u32,
    }

    impl State<BurstCx> for Burst {
        fn on_start(&mut self, tick: &Tick, _cx: &mut BurstCx) {
            self.animator.start(tick.time);
        }

        fn on_update(&mut self, tick: &Tick, cx: &mut BurstCx) -> Transition<Self> {
            match self.animator.step(tick.time, &mut cx.sprite) {
                Some(step) if step.is_last() => {
                    cx.completions += 1;
                    Transition::Conclude
                }
                _ => Transition::Stay,
            }
        }
    }

    fn burst_cx() -> BurstCx {
        BurstCx {
            sprite: SpriteRenderer::new(),
            completions: 0,
        }
    }

    #[test]
    fn test_step_writes_current_frame() {
        let mut animator = Animator::new(sequence(4, 6.0));
        let mut sprite = SpriteRenderer::new();
        animator.start(1.0);

        let step = animator.step(1.2, &mut sprite).unwrap();
        assert_eq!(step.index, 1);
        assert_eq!(sprite.sprite(), Some(SpriteHandle::from_u64(1)));
    }

    #[test]
    fn test_reverse_step_shows_frames_backwards() {
        let mut animator = Animator::new(sequence(4, 6.0)).with_playback(Playback::Reverse);
        let mut sprite = SpriteRenderer::new();
        animator.start(0.0);

        animator.step(0.0, &mut sprite);
        assert_eq!(sprite.sprite(), Some(SpriteHandle::from_u64(3)));

        let step = animator.step(0.5, &mut sprite).unwrap();
        assert!(step.is_last());
        assert_eq!(sprite.sprite(), Some(SpriteHandle::from_u64(0)));
    }

    #[test]
    fn test_empty_sequence_never_touches_sprite() {
        let mut machine = StateMachine::new("empty");
        let mut sprite = SpriteRenderer::new();
        machine.change_state(LoopingAnimation::new(sequence(0, 10.0)), &Tick::at(0.0), &mut sprite);

        for i in 0..20 {
            machine.update(&Tick::at(i as f32 * 0.1), &mut sprite);
        }
        assert_eq!(sprite.writes(), 0);
    }

    #[test]
    fn test_looping_animation_wraps() {
        let mut machine = StateMachine::new("fireplace");
        let mut sprite = SpriteRenderer::new();
        machine.change_state(LoopingAnimation::new(sequence(3, 10.0)), &Tick::at(2.0), &mut sprite);

        machine.update(&Tick::at(2.25), &mut sprite);
        assert_eq!(sprite.sprite(), Some(SpriteHandle::from_u64(2)));
        machine.update(&Tick::at(2.35), &mut sprite);
        assert_eq!(sprite.sprite(), Some(SpriteHandle::from_u64(0)));
        assert!(!machine.is_finished());
    }

    #[test]
    fn test_one_shot_fires_on_final_frame() {
        // 4 frames at 6 fps, final frame reached at 0.5s
        let mut machine = StateMachine::new("burst");
        let mut cx = burst_cx();
        machine.change_state(
            Burst {
                animator: Animator::new(sequence(4, 6.0)),
            },
            &Tick::at(0.0),
            &mut cx,
        );

        machine.update(&Tick::at(0.25), &mut cx);
        assert_eq!(cx.completions, 0);

        machine.update(&Tick::at(0.5), &mut cx);
        assert_eq!(cx.completions, 1);
        assert!(machine.is_finished());

        // Concluded, so nothing fires again
        machine.update(&Tick::at(1.0), &mut cx);
        assert_eq!(cx.completions, 1);
    }

    #[test]
    fn test_one_shot_fires_once_per_activation() {
        let mut machine = StateMachine::new("burst");
        let mut cx = burst_cx();

        for activation in 0..3 {
            let start = activation as f32 * 10.0;
            machine.change_state(
                Burst {
                    animator: Animator::new(sequence(4, 6.0)),
                },
                &Tick::at(start),
                &mut cx,
            );
            for k in 1..=12 {
                machine.update(&Tick::at(start + k as f32 / 24.0 + 0.01), &mut cx);
            }
        }
        assert_eq!(cx.completions, 3);
    }

    #[test]
    fn test_one_shot_misses_final_frame_on_coarse_ticks() {
        // 4 frames at 6 fps sampled every 2/6s only ever shows indices 0 and 2
        let mut machine = StateMachine::new("burst");
        let mut cx = burst_cx();
        machine.change_state(
            Burst {
                animator: Animator::new(sequence(4, 6.0)),
            },
            &Tick::at(0.0),
            &mut cx,
        );

        for k in 1..100 {
            machine.update(&Tick::at(k as f32 * (2.0 / 6.0) + 0.01), &mut cx);
        }
        assert_eq!(cx.completions, 0);
        assert!(!machine.is_finished(), "missed boundary keeps looping");
    }
}
