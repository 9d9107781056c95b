//! Distance, field-of-view and line-of-sight checks.
//!
//! Occlusion is tested by casting the observer→target segment against every
//! static obstacle box.

use glam::DVec3;
use skirmish_core::types::Obstacle;

use crate::ray::segment_blocked;

/// Euclidean distance between two points.
pub fn distance(a: DVec3, b: DVec3) -> f64 {
    a.distance(b)
}

/// Distance on the ground plane, ignoring height.
pub fn planar_distance(a: DVec3, b: DVec3) -> f64 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Detection range and field of view of an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightCone {
    /// Maximum distance at which a target can be noticed (inclusive).
    pub range: f64,
    /// Cosine of the half-angle of the view cone. Targets need a strictly
    /// greater dot product with the facing vector.
    pub fov_cos: f64,
}

/// Whether an observer at `observer` facing `yaw` can see `target`.
///
/// Rejects targets beyond `cone.range` (exactly at range is visible), targets
/// outside the view cone, and targets hidden behind an obstacle.
pub fn can_see(
    observer: DVec3,
    yaw: f64,
    target: DVec3,
    cone: &SightCone,
    obstacles: &[Obstacle],
) -> bool {
    let dist = distance(observer, target);
    if dist > cone.range {
        return false;
    }
    if dist == 0.0 {
        return true;
    }

    let direction = (target - observer) / dist;
    let forward = DVec3::new(yaw.sin(), 0.0, yaw.cos());
    if forward.dot(direction) <= cone.fov_cos {
        return false;
    }

    !segment_blocked(observer, target, obstacles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONE: SightCone = SightCone {
        range: 30.0,
        fov_cos: 0.5,
    };

    #[test]
    fn test_distance() {
        let a = DVec3::new(0.0, 0.0, 0.0);
        let b = DVec3::new(3.0, 4.0, 0.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-12);
        assert!((planar_distance(a, b) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_visible_exactly_at_range() {
        let target = DVec3::new(0.0, 0.0, 30.0);
        assert!(can_see(DVec3::ZERO, 0.0, target, &CONE, &[]));
    }

    #[test]
    fn test_invisible_beyond_range() {
        let target = DVec3::new(0.0, 0.0, 30.000001);
        assert!(!can_see(DVec3::ZERO, 0.0, target, &CONE, &[]));
    }

    #[test]
    fn test_outside_view_cone() {
        // Directly behind.
        assert!(!can_see(DVec3::ZERO, 0.0, DVec3::new(0.0, 0.0, -10.0), &CONE, &[]));
        // Just past the 60° half-angle.
        let angle = 61f64.to_radians();
        let outside = DVec3::new(angle.sin() * 10.0, 0.0, angle.cos() * 10.0);
        assert!(!can_see(DVec3::ZERO, 0.0, outside, &CONE, &[]));
        // 45° off axis is inside.
        let angle = std::f64::consts::FRAC_PI_4;
        let inside = DVec3::new(angle.sin() * 10.0, 0.0, angle.cos() * 10.0);
        assert!(can_see(DVec3::ZERO, 0.0, inside, &CONE, &[]));
    }

    #[test]
    fn test_facing_follows_yaw() {
        let east = DVec3::new(10.0, 0.0, 0.0);
        assert!(!can_see(DVec3::ZERO, 0.0, east, &CONE, &[]));
        assert!(can_see(DVec3::ZERO, std::f64::consts::FRAC_PI_2, east, &CONE, &[]));
    }

    #[test]
    fn test_obstacle_blocks_sight() {
        let eye = DVec3::new(0.0, 1.6, 0.0);
        let target = DVec3::new(0.0, 1.7, 20.0);
        let wall = Obstacle::ground_box(0.0, 10.0, 10.0, 4.0, 1.0);
        assert!(!can_see(eye, 0.0, target, &CONE, &[wall]));

        let beside = Obstacle::ground_box(20.0, 10.0, 10.0, 4.0, 1.0);
        assert!(can_see(eye, 0.0, target, &CONE, &[beside]));
    }

    #[test]
    fn test_same_position_is_visible() {
        assert!(can_see(DVec3::ONE, 1.0, DVec3::ONE, &CONE, &[]));
    }
}
