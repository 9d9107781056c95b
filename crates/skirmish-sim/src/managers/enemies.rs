//! Enemy operations over the ECS world: spawning, capacity, damage and
//! hit tests.
//!
//! Live enemies are hecs entities carrying [`Enemy`], [`SpawnOrder`],
//! [`Pose`], [`Health`], [`CombatStats`] and an [`EnemyBrain`]. A dead enemy
//! additionally carries a [`DeathTimer`] until it is removed.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;

use skirmish_ai::steering::yaw_towards;
use skirmish_ai::EnemyBrain;
use skirmish_core::components::{CombatStats, DeathTimer, Enemy, SpawnOrder};
use skirmish_core::config::{EnemyStats, EnemyTable};
use skirmish_core::constants::*;
use skirmish_core::enums::EnemyKind;
use skirmish_core::types::{Health, Obstacle, Pose, WorldBounds};
use skirmish_spatial::{first_obstacle_hit, planar_distance, ray_aabb};

/// Result of a damage application that landed on a living enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDamage {
    pub entity: Entity,
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub position: DVec3,
    pub applied: f64,
    /// True only for the hit that killed the enemy.
    pub killed: bool,
    pub score_value: u32,
}

/// A ray that struck an enemy body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f64,
    pub point: DVec3,
}

/// Spawn one enemy facing `look_at`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_enemy<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    id: u32,
    order: u64,
    kind: EnemyKind,
    position: DVec3,
    look_at: DVec3,
    stats: EnemyStats,
    bounds: &WorldBounds,
) -> Entity {
    let brain = EnemyBrain::new(rng, position, bounds);
    world.spawn((
        Enemy { id, kind },
        SpawnOrder(order),
        Pose::new(position, yaw_towards(position, look_at)),
        Health::new(stats.max_health),
        CombatStats(stats),
        brain,
    ))
}

/// Weighted choice over enemy kinds. Falls back to `Regular` when every
/// weight is zero.
pub fn pick_kind<R: Rng + ?Sized>(rng: &mut R, table: &EnemyTable) -> EnemyKind {
    let total: f64 = EnemyKind::ALL
        .iter()
        .map(|&kind| table.get(kind).spawn_weight.max(0.0))
        .sum();
    if total <= 0.0 {
        return EnemyKind::Regular;
    }
    let mut roll = rng.gen::<f64>() * total;
    for &kind in &EnemyKind::ALL {
        let weight = table.get(kind).spawn_weight.max(0.0);
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    EnemyKind::Regular
}

/// Spawn point at `distance` from `around` along `angle`, or `None` when it
/// falls outside the arena.
pub fn spawn_point(around: DVec3, angle: f64, distance: f64, bounds: &WorldBounds) -> Option<DVec3> {
    let point = DVec3::new(
        around.x + angle.cos() * distance,
        0.0,
        around.z + angle.sin() * distance,
    );
    bounds.contains_planar(point).then_some(point)
}

pub fn living_count(world: &World) -> usize {
    world
        .query::<(&Enemy, &Health)>()
        .iter()
        .filter(|(_, (_, health))| health.alive)
        .count()
}

/// Remove enemies until fewer than `capacity` remain. Dying enemies go
/// first, then the oldest. Returns how many living enemies were removed.
pub fn make_room(world: &mut World, capacity: usize, despawn_buffer: &mut Vec<Entity>) -> u32 {
    despawn_buffer.clear();
    let mut candidates: Vec<(bool, SpawnOrder, Entity)> = world
        .query::<(&SpawnOrder, &Health)>()
        .iter()
        .map(|(entity, (order, health))| (health.alive, *order, entity))
        .collect();
    if candidates.len() < capacity {
        return 0;
    }
    // Dead (false) sorts before alive, then by age.
    candidates.sort_by_key(|&(alive, order, _)| (alive, order));
    let excess = candidates.len() + 1 - capacity.max(1);

    let mut living_removed = 0;
    for &(alive, order, entity) in candidates.iter().take(excess) {
        if alive {
            living_removed += 1;
            log::debug!("evicting enemy spawned #{}", order.0);
        }
        despawn_buffer.push(entity);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    living_removed
}

/// Apply `amount` damage to one enemy.
///
/// Returns `None` for a missing or already-dead enemy, so a kill can only
/// ever be reported once. A killing blow starts the removal countdown.
pub fn take_damage(world: &mut World, entity: Entity, amount: f64) -> Option<EnemyDamage> {
    let damage = {
        let (enemy, health, pose, stats) = world
            .query_one_mut::<(&Enemy, &mut Health, &Pose, &CombatStats)>(entity)
            .ok()?;
        if !health.alive {
            return None;
        }
        let outcome = health.take_damage(amount);
        EnemyDamage {
            entity,
            enemy_id: enemy.id,
            kind: enemy.kind,
            position: pose.position,
            applied: outcome.applied,
            killed: outcome.killed,
            score_value: stats.0.score_value,
        }
    };
    if damage.killed {
        let _ = world.insert_one(
            entity,
            DeathTimer {
                remaining_secs: ENEMY_DEATH_DELAY_SECS,
            },
        );
        log::debug!("enemy {} ({:?}) killed", damage.enemy_id, damage.kind);
    }
    Some(damage)
}

/// Damage every living enemy within `radius` (3D, inclusive) of `center`.
/// No falloff.
pub fn damage_in_radius(world: &mut World, center: DVec3, radius: f64, amount: f64) -> Vec<EnemyDamage> {
    let in_range: Vec<Entity> = world
        .query::<(&Enemy, &Pose, &Health)>()
        .iter()
        .filter(|(_, (_, pose, health))| health.alive && pose.position.distance(center) <= radius)
        .map(|(entity, _)| entity)
        .collect();

    in_range
        .into_iter()
        .filter_map(|entity| take_damage(world, entity, amount))
        .collect()
}

/// Body volume of an enemy standing at `position`.
fn body(position: DVec3) -> (DVec3, DVec3) {
    let half = DVec3::new(ENEMY_BODY_RADIUS, ENEMY_BODY_HEIGHT * 0.5, ENEMY_BODY_RADIUS);
    let center = position + DVec3::new(0.0, ENEMY_BODY_HEIGHT * 0.5, 0.0);
    (center - half, center + half)
}

/// Closest living enemy body struck by a ray within `range`, unless an
/// obstacle is struck first.
pub fn cast_ray(
    world: &World,
    origin: DVec3,
    direction: DVec3,
    range: f64,
    obstacles: &[Obstacle],
) -> Option<RayHit> {
    let direction = direction.try_normalize()?;
    let mut closest: Option<RayHit> = None;
    for (entity, (_, pose, health)) in world.query::<(&Enemy, &Pose, &Health)>().iter() {
        if !health.alive {
            continue;
        }
        let (min, max) = body(pose.position);
        let Some(t) = ray_aabb(origin, direction, min, max) else {
            continue;
        };
        if t > range || closest.is_some_and(|c| c.distance <= t) {
            continue;
        }
        closest = Some(RayHit {
            entity,
            distance: t,
            point: origin + direction * t,
        });
    }

    let hit = closest?;
    match first_obstacle_hit(origin, direction, hit.distance, obstacles) {
        Some(_) => None,
        None => Some(hit),
    }
}

/// Whether a hit at world height `y` on an enemy standing at `base` is a
/// headshot.
pub fn is_headshot(base: DVec3, y: f64) -> bool {
    y - base.y >= HEADSHOT_HEIGHT
}

/// Living enemy touching a player at `player` (planar), if any.
pub fn first_contact(world: &World, player: DVec3) -> Option<DVec3> {
    world
        .query::<(&Enemy, &Pose, &Health)>()
        .iter()
        .find(|(_, (_, pose, health))| {
            health.alive && planar_distance(pose.position, player) < PLAYER_CONTACT_RANGE
        })
        .map(|(_, (_, pose, _))| pose.position)
}

/// Count down dead enemies and remove those whose delay has passed.
pub fn remove_dead(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, timer) in world.query_mut::<&mut DeathTimer>() {
        timer.remaining_secs -= dt;
        if timer.remaining_secs <= TIMER_EPSILON {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
