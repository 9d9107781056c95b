//! Grenade pool: ballistic flight with bounces, a fuse, and one detonation.

use std::collections::VecDeque;

use glam::DVec3;

use skirmish_core::config::GrenadeStats;
use skirmish_core::constants::*;
use skirmish_core::state::GrenadeView;
use skirmish_core::types::WorldBounds;

#[derive(Debug, Clone)]
pub struct Grenade {
    pub id: u32,
    pub position: DVec3,
    pub velocity: DVec3,
    pub fuse_remaining: f64,
    pub radius: f64,
    pub damage: f64,
    pub exploded: bool,
    /// Seconds the spent grenade lingers after detonating.
    pub cleanup_remaining: f64,
}

/// A detonation to resolve against enemies this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detonation {
    pub grenade_id: u32,
    pub position: DVec3,
    pub radius: f64,
    pub damage: f64,
}

#[derive(Debug, Clone)]
pub struct GrenadePool {
    grenades: VecDeque<Grenade>,
    capacity: usize,
    next_id: u32,
}

impl Default for GrenadePool {
    fn default() -> Self {
        Self::with_capacity(MAX_GRENADES)
    }
}

impl GrenadePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            grenades: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// Throw a grenade along `direction`. Only the horizontal part of the
    /// direction is scaled by the throw force; the upward speed is fixed.
    pub fn throw(&mut self, origin: DVec3, direction: DVec3, stats: &GrenadeStats) -> u32 {
        while self.grenades.len() >= self.capacity {
            self.grenades.pop_front();
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let push = direction.normalize_or_zero() * stats.throw_force;
        self.grenades.push_back(Grenade {
            id,
            position: origin,
            velocity: DVec3::new(push.x, GRENADE_UPWARD_SPEED, push.z),
            fuse_remaining: stats.fuse_secs,
            radius: stats.radius,
            damage: stats.damage,
            exploded: false,
            cleanup_remaining: GRENADE_CLEANUP_SECS,
        });
        id
    }

    /// Fly, bounce and burn fuses. Returns the grenades that detonated this
    /// tick; each grenade detonates exactly once.
    pub fn update(&mut self, dt: f64, bounds: &WorldBounds) -> Vec<Detonation> {
        let mut detonations = Vec::new();
        for grenade in self.grenades.iter_mut() {
            if grenade.exploded {
                grenade.cleanup_remaining -= dt;
                continue;
            }

            grenade.fuse_remaining -= dt;
            if grenade.fuse_remaining <= TIMER_EPSILON {
                grenade.exploded = true;
                detonations.push(Detonation {
                    grenade_id: grenade.id,
                    position: grenade.position,
                    radius: grenade.radius,
                    damage: grenade.damage,
                });
                continue;
            }

            integrate(grenade, dt, bounds);
        }
        self.grenades
            .retain(|g| !g.exploded || g.cleanup_remaining > TIMER_EPSILON);
        detonations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grenade> {
        self.grenades.iter()
    }

    pub fn len(&self) -> usize {
        self.grenades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grenades.is_empty()
    }

    pub fn clear(&mut self) {
        self.grenades.clear();
    }

    pub fn views(&self) -> Vec<GrenadeView> {
        self.grenades
            .iter()
            .map(|g| GrenadeView {
                id: g.id,
                position: g.position,
                fuse_remaining_secs: g.fuse_remaining.max(0.0),
                exploded: g.exploded,
            })
            .collect()
    }
}

fn integrate(grenade: &mut Grenade, dt: f64, bounds: &WorldBounds) {
    grenade.velocity.y -= GRAVITY * dt;
    grenade.position += grenade.velocity * dt;

    if grenade.position.y <= GRENADE_RADIUS {
        grenade.position.y = GRENADE_RADIUS;
        grenade.velocity.y = -grenade.velocity.y * GRENADE_BOUNCE;
        grenade.velocity.x *= GRENADE_GROUND_FRICTION;
        grenade.velocity.z *= GRENADE_GROUND_FRICTION;
    }

    let limit = bounds.size - GRENADE_RADIUS;
    if grenade.position.x.abs() > limit {
        grenade.position.x = grenade.position.x.clamp(-limit, limit);
        grenade.velocity.x = -grenade.velocity.x * GRENADE_BOUNCE;
    }
    if grenade.position.z.abs() > limit {
        grenade.position.z = grenade.position.z.clamp(-limit, limit);
        grenade.velocity.z = -grenade.velocity.z * GRENADE_BOUNCE;
    }
}
