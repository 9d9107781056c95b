//! Ground movement and facing.
//!
//! Enemies move on the x/z plane. Facing is a yaw where 0 looks along +z
//! and positive yaw turns toward +x.

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use skirmish_core::constants::{AI_TURN_RATE, ENEMY_BODY_RADIUS};
use skirmish_core::types::{Pose, WorldBounds};

/// Wrap an angle into `[-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// Yaw that faces from `from` toward `to` on the ground plane.
pub fn yaw_towards(from: DVec3, to: DVec3) -> f64 {
    (to.x - from.x).atan2(to.z - from.z)
}

/// Step toward `destination` at `speed` and turn smoothly toward the
/// direction of travel. The enemy stays inside the arena.
pub fn move_towards(pose: &mut Pose, destination: DVec3, speed: f64, dt: f64, bounds: &WorldBounds) {
    let dx = destination.x - pose.position.x;
    let dz = destination.z - pose.position.z;
    let length = (dx * dx + dz * dz).sqrt();
    if length <= f64::EPSILON {
        return;
    }
    let (dir_x, dir_z) = (dx / length, dz / length);

    let step = speed * dt;
    pose.position.x += dir_x * step;
    pose.position.z += dir_z * step;
    pose.position = bounds.clamp_point(pose.position, ENEMY_BODY_RADIUS);

    let desired = dir_x.atan2(dir_z);
    pose.yaw += normalize_angle(desired - pose.yaw) * AI_TURN_RATE * dt;
}

/// Snap facing toward `target`.
pub fn face(pose: &mut Pose, target: DVec3) {
    let dx = target.x - pose.position.x;
    let dz = target.z - pose.position.z;
    if dx == 0.0 && dz == 0.0 {
        return;
    }
    pose.yaw = dx.atan2(dz);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-9);
        assert!((normalize_angle(-3.0 * PI).abs() - PI).abs() < 1e-9);
        assert!((normalize_angle(-0.5) + 0.5).abs() < 1e-12);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-12);
        assert!((normalize_angle(TAU + 0.25) - 0.25).abs() < 1e-12);
        for i in -20..20 {
            let a = normalize_angle(i as f64 * 0.9);
            assert!((-PI..=PI).contains(&a), "{a} out of range");
        }
    }

    #[test]
    fn test_move_towards_advances_planar() {
        let bounds = WorldBounds::new(100.0);
        let mut pose = Pose::new(DVec3::ZERO, 0.0);
        move_towards(&mut pose, DVec3::new(10.0, 5.0, 0.0), 5.0, 0.1, &bounds);
        assert!((pose.position.x - 0.5).abs() < 1e-12);
        assert_eq!(pose.position.y, 0.0);
        assert!(pose.position.z.abs() < 1e-12);
        // Turned part of the way toward +x (yaw π/2).
        assert!(pose.yaw > 0.0 && pose.yaw < std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_move_towards_turns_shortest_way() {
        let bounds = WorldBounds::new(100.0);
        let mut pose = Pose::new(DVec3::ZERO, 3.0);
        // Destination almost behind at yaw -3.0: shortest turn crosses ±π.
        let dest = DVec3::new((-3.0f64).sin() * 10.0, 0.0, (-3.0f64).cos() * 10.0);
        move_towards(&mut pose, dest, 1.0, 0.01, &bounds);
        assert!(pose.yaw > 3.0, "should turn past π, got {}", pose.yaw);
    }

    #[test]
    fn test_move_towards_stays_in_bounds() {
        let bounds = WorldBounds::new(10.0);
        let mut pose = Pose::new(DVec3::new(9.4, 0.0, 0.0), 0.0);
        move_towards(&mut pose, DVec3::new(50.0, 0.0, 0.0), 100.0, 1.0, &bounds);
        assert!(pose.position.x <= 10.0 - ENEMY_BODY_RADIUS + 1e-12);
    }

    #[test]
    fn test_face_target() {
        let mut pose = Pose::new(DVec3::ZERO, 0.0);
        face(&mut pose, DVec3::new(-5.0, 1.7, 0.0));
        assert!((pose.yaw + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((yaw_towards(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0)).abs() - PI).abs() < 1e-12);
    }
}
