// Entity identifiers

use std::fmt;

/// Unique identifier for an actor in a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out entity ids; ids are never reused within a scene
#[derive(Debug, Default)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
