// Minimal 2D world: circle bodies, straight-line path following, contacts
//
// The ward has no walls worth simulating, so bodies move freely and overlap
// tests are circle against circle.

use std::collections::BTreeSet;

use glam::Vec2;

use crate::core::math::move_towards;
use crate::engine::entity::EntityId;

/// Distance under which a path target counts as reached
const ARRIVAL_DISTANCE: f32 = 0.05;

/// Collision layer of an actor; hunters only see and touch `Dracula`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Dracula,
    Bat,
}

/// Position, velocity and circle collider of an actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    /// Units per second
    pub velocity: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
        }
    }

    /// Apply velocity over `dt` seconds
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Check if two circles touch
    pub fn overlaps(&self, other: &Body) -> bool {
        let reach = self.radius + other.radius;
        self.position.distance_squared(other.position) <= reach * reach
    }

    /// Check if this circle touches the vertical segment running `length`
    /// units straight down from `origin`
    pub fn hit_by_downward_ray(&self, origin: Vec2, length: f32) -> bool {
        let below = origin.y - self.position.y;
        (self.position.x - origin.x).abs() <= self.radius
            && below >= -self.radius
            && below <= length + self.radius
    }
}

/// Walks a body toward a target point at constant speed
#[derive(Debug, Clone)]
pub struct Pathfinder {
    target: Option<Vec2>,
    /// Units per second
    pub speed: f32,
    enabled: bool,
    reached: bool,
}

impl Pathfinder {
    pub fn new(speed: f32) -> Self {
        Self {
            target: None,
            speed,
            enabled: true,
            reached: false,
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = Some(target);
        self.reached = false;
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    /// True once the body arrived at the current target
    pub fn target_reached(&self) -> bool {
        self.reached
    }

    /// Stop steering; the body keeps its position
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Move `body` toward the target for `dt` seconds
    pub fn advance(&mut self, body: &mut Body, dt: f32) {
        let Some(target) = self.target else {
            body.velocity = Vec2::ZERO;
            return;
        };
        if !self.enabled {
            body.velocity = Vec2::ZERO;
            return;
        }

        let next = move_towards(body.position, target, self.speed * dt);
        body.velocity = if dt > 0.0 {
            (next - body.position) / dt
        } else {
            Vec2::ZERO
        };
        body.position = next;
        self.reached = body.position.distance(target) <= ARRIVAL_DISTANCE;
        if self.reached {
            // Settle exactly on the target
            body.position = target;
        }
    }
}

/// Phase of a contact between two actors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Enter,
    Stay,
    Exit,
}

/// Turns "who touches me now" snapshots into enter/stay/exit events
#[derive(Debug, Default)]
pub struct ContactTracker {
    touching: BTreeSet<EntityId>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the current overlaps with the previous step's
    ///
    /// Events come out in id order: exits first, then enters and stays.
    pub fn update(
        &mut self,
        touching_now: impl IntoIterator<Item = EntityId>,
    ) -> Vec<(EntityId, Contact)> {
        let now: BTreeSet<EntityId> = touching_now.into_iter().collect();
        let mut events = Vec::new();

        for id in self.touching.difference(&now) {
            events.push((*id, Contact::Exit));
        }
        for id in &now {
            let contact = if self.touching.contains(id) {
                Contact::Stay
            } else {
                Contact::Enter
            };
            events.push((*id, contact));
        }

        self.touching = now;
        events
    }

    /// Drop an actor without emitting an exit (it no longer exists)
    pub fn forget(&mut self, id: EntityId) {
        self.touching.remove(&id);
    }

    pub fn is_touching(&self, id: EntityId) -> bool {
        self.touching.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::entity::EntityAllocator;
    use approx::assert_relative_eq;

    #[test]
    fn test_overlap() {
        let a = Body::new(Vec2::ZERO, 0.5);
        let b = Body::new(Vec2::new(0.9, 0.0), 0.5);
        let c = Body::new(Vec2::new(1.1, 0.0), 0.5);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_downward_ray() {
        let target = Body::new(Vec2::new(0.2, -1.0), 0.4);
        assert!(target.hit_by_downward_ray(Vec2::ZERO, 1.0));
        // Above the origin
        assert!(!target.hit_by_downward_ray(Vec2::new(0.0, -3.0), 1.0));
        // Too far to the side
        assert!(!target.hit_by_downward_ray(Vec2::new(1.0, 0.0), 1.0));
        // Too far below
        assert!(!target.hit_by_downward_ray(Vec2::new(0.0, 2.0), 1.0));
    }

    #[test]
    fn test_pathfinder_reaches_target() {
        let mut body = Body::new(Vec2::ZERO, 0.4);
        let mut path = Pathfinder::new(2.0);
        path.set_target(Vec2::new(1.0, 0.0));

        path.advance(&mut body, 0.25);
        assert_relative_eq!(body.position.x, 0.5);
        assert_relative_eq!(body.velocity.x, 2.0);
        assert!(!path.target_reached());

        path.advance(&mut body, 0.5);
        assert_eq!(body.position, Vec2::new(1.0, 0.0));
        assert!(path.target_reached());
    }

    #[test]
    fn test_arrival_snaps_onto_target() {
        // 0.025 units per step leaves the body short of the target when it
        // enters the arrival distance
        let mut body = Body::new(Vec2::ZERO, 0.4);
        let mut path = Pathfinder::new(1.5);
        let target = Vec2::new(-2.0, 0.0);
        path.set_target(target);

        let mut steps = 0;
        while !path.target_reached() && steps < 600 {
            path.advance(&mut body, 1.0 / 60.0);
            steps += 1;
        }
        assert!(path.target_reached());
        assert_eq!(body.position, target);
    }

    #[test]
    fn test_disabled_pathfinder_holds_still() {
        let mut body = Body::new(Vec2::ZERO, 0.4);
        let mut path = Pathfinder::new(2.0);
        path.set_target(Vec2::new(5.0, 0.0));
        path.disable();
        path.advance(&mut body, 1.0);
        assert_eq!(body.position, Vec2::ZERO);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_new_target_clears_reached() {
        let mut body = Body::new(Vec2::ZERO, 0.4);
        let mut path = Pathfinder::new(10.0);
        path.set_target(Vec2::new(1.0, 0.0));
        path.advance(&mut body, 1.0);
        assert!(path.target_reached());
        path.set_target(Vec2::new(2.0, 0.0));
        assert!(!path.target_reached());
    }

    #[test]
    fn test_contact_phases() {
        let mut ids = EntityAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        let mut tracker = ContactTracker::new();

        assert_eq!(tracker.update([a]), vec![(a, Contact::Enter)]);
        assert_eq!(
            tracker.update([a, b]),
            vec![(a, Contact::Stay), (b, Contact::Enter)]
        );
        assert_eq!(
            tracker.update([b]),
            vec![(a, Contact::Exit), (b, Contact::Stay)]
        );
        assert_eq!(tracker.update([]), vec![(b, Contact::Exit)]);
        assert!(tracker.update([]).is_empty());
    }

    #[test]
    fn test_forget_skips_exit() {
        let mut ids = EntityAllocator::new();
        let a = ids.allocate();
        let mut tracker = ContactTracker::new();
        tracker.update([a]);
        tracker.forget(a);
        assert!(!tracker.is_touching(a));
        assert!(tracker.update([]).is_empty());
    }
}
