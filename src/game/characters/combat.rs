// Combat targeting helpers

use crate::core::math::{clamp, normalize_degrees};
use crate::game::entity::EntityId;
use glam::Vec3;

/// Rotations closer than this (degrees) snap to the target
const YAW_SNAP_EPSILON: f32 = 1.0e-3;

/// The enemy the character faces while attacking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatTarget {
    pub id: EntityId,
    pub location: Vec3,
}

/// Pick the candidate closest to `origin`
pub fn closest_target(origin: Vec3, candidates: &[CombatTarget]) -> Option<CombatTarget> {
    candidates.iter().copied().min_by(|a, b| {
        a.location
            .distance_squared(origin)
            .total_cmp(&b.location.distance_squared(origin))
    })
}

/// Yaw (degrees, around +Z) that looks from `from` toward `to`
pub fn look_at_yaw(from: Vec3, to: Vec3) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x).to_degrees()
}

/// Move `current` toward `target` by a fraction `dt * speed` of the remaining arc
///
/// Takes the shortest way around. A non-positive speed jumps straight to the
/// target.
pub fn interp_yaw(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return normalize_degrees(target);
    }

    let delta = normalize_degrees(target - current);
    if delta.abs() < YAW_SNAP_EPSILON {
        return normalize_degrees(target);
    }

    let step = clamp(dt * speed, 0.0, 1.0);
    normalize_degrees(current + delta * step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn target(id: EntityId, x: f32, y: f32) -> CombatTarget {
        CombatTarget {
            id,
            location: Vec3::new(x, y, 0.0),
        }
    }

    #[test]
    fn test_closest_target() {
        let candidates = [target(1, 10.0, 0.0), target(2, 3.0, 4.0), target(3, -8.0, 0.0)];
        let closest = closest_target(Vec3::ZERO, &candidates).unwrap();
        assert_eq!(closest.id, 2);
    }

    #[test]
    fn test_closest_target_empty() {
        assert!(closest_target(Vec3::ZERO, &[]).is_none());
    }

    #[test]
    fn test_look_at_yaw() {
        assert_relative_eq!(look_at_yaw(Vec3::ZERO, Vec3::X), 0.0, epsilon = 1e-4);
        assert_relative_eq!(look_at_yaw(Vec3::ZERO, Vec3::Y), 90.0, epsilon = 1e-4);
        assert_relative_eq!(look_at_yaw(Vec3::ZERO, -Vec3::Y), -90.0, epsilon = 1e-4);
        // Height difference is ignored
        assert_relative_eq!(look_at_yaw(Vec3::ZERO, Vec3::new(1.0, 1.0, 50.0)), 45.0, epsilon = 1e-4);
    }

    #[test]
    fn test_interp_yaw_partial_step() {
        let yaw = interp_yaw(0.0, 90.0, 0.05, 10.0);
        assert_relative_eq!(yaw, 45.0, epsilon = 1e-4);
    }

    #[test]
    fn test_interp_yaw_takes_short_way() {
        // 170 -> -170 is 20 degrees through 180, not 340 back through 0
        let yaw = interp_yaw(170.0, -170.0, 0.05, 10.0);
        assert_relative_eq!(yaw, 180.0, epsilon = 1e-4);
    }

    #[test]
    fn test_interp_yaw_large_step_lands_on_target() {
        assert_relative_eq!(interp_yaw(0.0, 30.0, 1.0, 10.0), 30.0, epsilon = 1e-4);
        assert_relative_eq!(interp_yaw(0.0, 30.0, 0.1, 0.0), 30.0, epsilon = 1e-4);
    }
}
