// Sprite handles and the renderable image slot that states write to

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier for a sprite image
///
/// Sprites are addressed by name (e.g. `"vampire/move_0"`); the host resolves
/// the hash to actual pixels. Equal names always produce equal handles.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(u64);

impl SpriteHandle {
    /// Create a handle from a sprite name
    pub fn named(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Create a handle from a raw u64
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SpriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpriteHandle({:#018x})", self.0)
    }
}

/// Colour multiplier applied to a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    White,
    Red,
}

/// Addressable "current image" slot of an on-screen object
#[derive(Debug, Clone, Default)]
pub struct SpriteRenderer {
    sprite: Option<SpriteHandle>,
    /// Colour multiplier
    pub tint: Tint,
    /// Mirror the image horizontally
    pub flip_x: bool,
    /// Number of times a sprite has been written
    writes: u64,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `sprite`
    pub fn set_sprite(&mut self, sprite: SpriteHandle) {
        self.sprite = Some(sprite);
        self.writes += 1;
    }

    /// Currently shown sprite, if any was ever set
    pub fn sprite(&self) -> Option<SpriteHandle> {
        self.sprite
    }

    /// How many times the image slot has been written
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_handle_from_name() {
        let a = SpriteHandle::named("vampire/move_0");
        let b = SpriteHandle::named("vampire/move_0");
        let c = SpriteHandle::named("vampire/move_1");

        assert_eq!(a, b, "Same names should produce same handles");
        assert_ne!(a, c, "Different names should produce different handles");
    }

    #[test]
    fn test_sprite_handle_roundtrip() {
        assert_eq!(SpriteHandle::from_u64(12345).as_u64(), 12345);
    }

    #[test]
    fn test_renderer_counts_writes() {
        let mut renderer = SpriteRenderer::new();
        assert_eq!(renderer.sprite(), None);
        assert_eq!(renderer.writes(), 0);

        renderer.set_sprite(SpriteHandle::from_u64(7));
        renderer.set_sprite(SpriteHandle::from_u64(8));
        assert_eq!(renderer.sprite(), Some(SpriteHandle::from_u64(8)));
        assert_eq!(renderer.writes(), 2);
    }
}
