// Math utilities shared by the actors

use glam::Vec2;

/// Fraction of `value` over `max`, clamped to [0, 1]
///
/// Used for HUD sliders. A non-positive `max` reads as full.
pub fn unit_fraction(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 1.0;
    }
    (value / max).clamp(0.0, 1.0)
}

/// Move `from` toward `to` by at most `max_step`, never overshooting
pub fn move_towards(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let offset = to - from;
    let distance = offset.length();
    if distance <= max_step || distance <= f32::EPSILON {
        to
    } else {
        from + offset / distance * max_step
    }
}

/// Check if two points are within `range` of each other (inclusive)
pub fn within_range(a: Vec2, b: Vec2, range: f32) -> bool {
    a.distance_squared(b) <= range * range
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_fraction() {
        assert_eq!(unit_fraction(50.0, 100.0), 0.5);
        assert_eq!(unit_fraction(-5.0, 100.0), 0.0);
        assert_eq!(unit_fraction(150.0, 100.0), 1.0);
        assert_eq!(unit_fraction(3.0, 0.0), 1.0);
    }

    #[test]
    fn test_move_towards_partial_step() {
        let next = move_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.5);
        assert_relative_eq!(next.x, 2.5);
        assert_relative_eq!(next.y, 0.0);
    }

    #[test]
    fn test_move_towards_does_not_overshoot() {
        let target = Vec2::new(1.0, 1.0);
        assert_eq!(move_towards(Vec2::ZERO, target, 5.0), target);
    }

    #[test]
    fn test_within_range() {
        assert!(within_range(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.0));
        assert!(!within_range(Vec2::ZERO, Vec2::new(3.0, 4.1), 5.0));
    }
}
