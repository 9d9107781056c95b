//! Goal generation: patrol loops, search points, cover and retreat spots.
//!
//! All generated points lie on the ground (y = 0) and are clamped
//! [`AI_WORLD_MARGIN`] inside the arena.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;
use skirmish_core::constants::*;
use skirmish_core::types::{Obstacle, WorldBounds};
use skirmish_spatial::{planar_distance, ring_point};

fn ground(point: DVec3) -> DVec3 {
    DVec3::new(point.x, 0.0, point.z)
}

fn random_ring_point<R: Rng + ?Sized>(
    rng: &mut R,
    center: DVec3,
    min_radius: f64,
    max_radius: f64,
    bounds: &WorldBounds,
) -> DVec3 {
    let radius = rng.gen_range(min_radius..max_radius);
    let angle = rng.gen_range(0.0..TAU);
    bounds.clamp_point(ground(ring_point(center, angle, radius)), AI_WORLD_MARGIN)
}

/// A patrol loop: the start point followed by 3–5 random waypoints at
/// radius [5, 15) around it.
pub fn patrol_path<R: Rng + ?Sized>(rng: &mut R, start: DVec3, bounds: &WorldBounds) -> Vec<DVec3> {
    let extra = rng.gen_range(AI_PATROL_EXTRA_POINTS_MIN..=AI_PATROL_EXTRA_POINTS_MAX);
    let mut path = Vec::with_capacity(extra + 1);
    path.push(bounds.clamp_point(ground(start), AI_WORLD_MARGIN));
    for _ in 0..extra {
        path.push(random_ring_point(
            rng,
            start,
            AI_PATROL_RADIUS_MIN,
            AI_PATROL_RADIUS_MAX,
            bounds,
        ));
    }
    path
}

/// 5–8 random points at radius [3, 10) around `center`.
pub fn search_points<R: Rng + ?Sized>(rng: &mut R, center: DVec3, bounds: &WorldBounds) -> Vec<DVec3> {
    let count = rng.gen_range(AI_SEARCH_POINTS_MIN..=AI_SEARCH_POINTS_MAX);
    (0..count)
        .map(|_| {
            random_ring_point(
                rng,
                center,
                AI_SEARCH_RADIUS_MIN,
                AI_SEARCH_RADIUS_MAX,
                bounds,
            )
        })
        .collect()
}

/// Best cover spot for an enemy at `position` hiding from `target`.
///
/// Each obstacle offers the point just behind it as seen from the target.
/// Candidates score `|dot(cover_dir, away_from_target)| × 10 − travel`.
/// Returns `None` without obstacles.
pub fn find_cover(
    position: DVec3,
    target: DVec3,
    obstacles: &[Obstacle],
    bounds: &WorldBounds,
) -> Option<DVec3> {
    let away_from_target = (ground(position) - ground(target)).normalize_or_zero();

    let mut best: Option<(DVec3, f64)> = None;
    for obstacle in obstacles {
        let center = ground(obstacle.center);
        let cover_dir = (center - ground(target)).normalize_or_zero();
        let offset = obstacle.planar_extent() + AI_COVER_STANDOFF;
        let candidate = bounds.clamp_point(center + cover_dir * offset, AI_WORLD_MARGIN);

        let score = cover_dir.dot(away_from_target).abs() * AI_COVER_ALIGNMENT_WEIGHT
            - planar_distance(position, candidate);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(point, _)| point)
}

/// Where to run to: 10–15 units straight away from the target, or 10–20
/// units in a random direction when there is no target.
pub fn retreat_destination<R: Rng + ?Sized>(
    rng: &mut R,
    position: DVec3,
    target: Option<DVec3>,
    bounds: &WorldBounds,
) -> DVec3 {
    let (direction, distance) = match target {
        Some(target) => {
            let away = (ground(position) - ground(target)).normalize_or_zero();
            let dist = rng.gen_range(AI_RETREAT_DISTANCE_MIN..AI_RETREAT_DISTANCE_MAX);
            (away, dist)
        }
        None => {
            let angle = rng.gen_range(0.0..TAU);
            let dist = rng.gen_range(AI_WANDER_DISTANCE_MIN..AI_WANDER_DISTANCE_MAX);
            (DVec3::new(angle.cos(), 0.0, angle.sin()), dist)
        }
    };
    bounds.clamp_point(ground(position) + direction * distance, AI_WORLD_MARGIN)
}

/// Point a fixed step straight away from the target; the per-tick retreat goal.
pub fn retreat_step(position: DVec3, target: DVec3, bounds: &WorldBounds) -> DVec3 {
    let away = (ground(position) - ground(target)).normalize_or_zero();
    bounds.clamp_point(ground(position) + away * AI_RETREAT_STEP, AI_WORLD_MARGIN)
}
