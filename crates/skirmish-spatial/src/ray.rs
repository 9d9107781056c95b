//! Ray casting against axis-aligned boxes (slab method).

use glam::DVec3;
use skirmish_core::types::Obstacle;

/// Distances shorter than this are treated as zero.
const RAY_EPSILON: f64 = 1e-9;

/// Intersect a ray with an axis-aligned box.
///
/// `direction` must be unit length. Returns the distance along the ray at
/// which it enters the box, or 0 when the origin is already inside. Boxes
/// entirely behind the origin miss.
pub fn ray_aabb(origin: DVec3, direction: DVec3, min: DVec3, max: DVec3) -> Option<f64> {
    let mut t_near = f64::NEG_INFINITY;
    let mut t_far = f64::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let (lo, hi) = (min[axis], max[axis]);

        if d.abs() < RAY_EPSILON {
            // Parallel to this slab: miss unless the origin lies inside it.
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (lo - o) * inv;
        let mut t1 = (hi - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(t_near.max(0.0))
}

/// Closest obstacle hit along a ray within `max_distance`.
///
/// Returns the obstacle index and the hit distance.
pub fn first_obstacle_hit(
    origin: DVec3,
    direction: DVec3,
    max_distance: f64,
    obstacles: &[Obstacle],
) -> Option<(usize, f64)> {
    obstacles
        .iter()
        .enumerate()
        .filter_map(|(i, ob)| {
            ray_aabb(origin, direction, ob.min(), ob.max())
                .filter(|t| *t < max_distance)
                .map(|t| (i, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Whether any obstacle intersects the segment `from → to` before reaching `to`.
pub fn segment_blocked(from: DVec3, to: DVec3, obstacles: &[Obstacle]) -> bool {
    let delta = to - from;
    let length = delta.length();
    if length < RAY_EPSILON {
        return false;
    }
    let direction = delta / length;
    obstacles.iter().any(|ob| {
        ray_aabb(from, direction, ob.min(), ob.max()).is_some_and(|t| t < length)
    })
}
