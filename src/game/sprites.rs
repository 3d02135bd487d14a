// Sprite sequences for every actor
//
// Frames are addressed by name ("{sheet}/{clip}_{n}") and resolved by the
// host. Each set is built once per scene and shared by cloning, which only
// bumps the frame storage's reference count.

use crate::engine::fsm::AnimationSequence;

/// Vampire clips
#[derive(Debug, Clone)]
pub struct VampireSprites {
    /// Walk cycle; its first frame is the standing pose
    pub movement: AnimationSequence,
    /// Human to bat transformation (played backwards to turn back)
    pub to_bat: AnimationSequence,
    pub bat: AnimationSequence,
    pub attack: AnimationSequence,
    pub death: AnimationSequence,
}

impl VampireSprites {
    pub fn standard() -> Self {
        Self {
            movement: AnimationSequence::strip("vampire/move", 4, 6.0),
            to_bat: AnimationSequence::strip("vampire/to_bat", 6, 10.0),
            bat: AnimationSequence::strip("vampire/bat", 4, 10.0),
            attack: AnimationSequence::strip("vampire/attack", 4, 10.0),
            death: AnimationSequence::strip("vampire/death", 6, 5.0),
        }
    }
}

/// Hunter clips
#[derive(Debug, Clone)]
pub struct HunterSprites {
    pub idle: AnimationSequence,
    /// Patrol walk
    pub movement: AnimationSequence,
    /// Same frames as `movement`, played faster when running to a corner
    pub running: AnimationSequence,
    pub stake: AnimationSequence,
    pub hide: AnimationSequence,
}

impl HunterSprites {
    pub fn standard() -> Self {
        let movement = AnimationSequence::strip("hunter/move", 4, 10.0);
        Self {
            idle: AnimationSequence::strip("hunter/idle", 2, 10.0),
            running: movement.with_fps(15.0),
            movement,
            stake: AnimationSequence::strip("hunter/stake", 4, 10.0),
            hide: AnimationSequence::strip("hunter/hide", 2, 10.0),
        }
    }
}

/// Patient clips
#[derive(Debug, Clone)]
pub struct PatientSprites {
    pub idle: AnimationSequence,
    pub movement: AnimationSequence,
    pub bitten: AnimationSequence,
}

impl PatientSprites {
    pub fn standard() -> Self {
        Self {
            idle: AnimationSequence::strip("patient/idle", 2, 1.0),
            movement: AnimationSequence::strip("patient/move", 4, 6.0),
            bitten: AnimationSequence::strip("patient/bitten", 1, 1.0),
        }
    }
}

/// Props and scenery
#[derive(Debug, Clone)]
pub struct PropSprites {
    /// Door swinging open; closing plays it backwards
    pub door: AnimationSequence,
    pub fireplace: AnimationSequence,
    pub title: AnimationSequence,
}

impl PropSprites {
    pub fn standard(title_fps: f32) -> Self {
        Self {
            door: AnimationSequence::strip("ward/door", 4, 6.0),
            fireplace: AnimationSequence::strip("ward/fireplace", 4, 10.0),
            title: AnimationSequence::strip("title/castle", 8, title_fps),
        }
    }
}
