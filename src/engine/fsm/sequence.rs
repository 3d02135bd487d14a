// Immutable frame sequences and playback direction

use std::sync::Arc;

use crate::engine::sprite::SpriteHandle;

/// Direction an animation activation walks its sequence in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    #[default]
    Forward,
    Reverse,
}

impl Playback {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Position in the backing sequence shown at clock index `index`
    pub fn resolve(self, index: usize, len: usize) -> usize {
        match self {
            Self::Forward => index,
            Self::Reverse => len - 1 - index,
        }
    }
}

/// Ordered, fixed-length list of frames plus the rate they play at
///
/// Frames sit behind an `Arc`, so cloning a sequence or changing its frame
/// rate with [`AnimationSequence::with_fps`] never copies them.
#[derive(Debug, Clone)]
pub struct AnimationSequence {
    frames: Arc<[SpriteHandle]>,
    fps: f32,
}

impl AnimationSequence {
    /// Create a sequence from frames
    pub fn new(frames: impl Into<Arc<[SpriteHandle]>>, fps: f32) -> Self {
        Self {
            frames: frames.into(),
            fps,
        }
    }

    /// A sequence of sprites named `{prefix}_0` .. `{prefix}_{count - 1}`
    pub fn strip(prefix: &str, count: usize, fps: f32) -> Self {
        let frames: Vec<SpriteHandle> = (0..count)
            .map(|i| SpriteHandle::named(&format!("{}_{}", prefix, i)))
            .collect();
        Self::new(frames, fps)
    }

    /// Same frames, different frame rate
    pub fn with_fps(&self, fps: f32) -> Self {
        Self {
            frames: Arc::clone(&self.frames),
            fps,
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// First frame in storage order (the resting image of most actors)
    pub fn first(&self) -> Option<SpriteHandle> {
        self.frames.first().copied()
    }

    /// Frame shown at clock index `index` when playing in `playback` direction
    pub fn frame(&self, index: usize, playback: Playback) -> Option<SpriteHandle> {
        if index >= self.frames.len() {
            return None;
        }
        let position = playback.resolve(index, self.frames.len());
        self.frames.get(position).copied()
    }

    /// All frames in the order `playback` shows them
    pub fn ordered(&self, playback: Playback) -> Vec<SpriteHandle> {
        (0..self.len())
            .filter_map(|index| self.frame(index, playback))
            .collect()
    }

    /// Check if both sequences share the same frame storage
    pub fn shares_frames_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.frames, &other.frames)
    }
}
