//! Collision pass: bullets against enemies, grenade detonations, enemy
//! contact with the player, and item pickups. Runs in that order.

use glam::DVec3;
use hecs::{Entity, World};

use skirmish_core::components::Enemy;
use skirmish_core::config::GameConfig;
use skirmish_core::constants::*;
use skirmish_core::enums::{ItemKind, SoundKind};
use skirmish_core::events::GameEvent;
use skirmish_core::types::{Health, Obstacle, Pose};
use skirmish_spatial::planar_distance;

use crate::game_state::GameState;
use crate::managers::bullets::BulletPool;
use crate::managers::enemies::{self, EnemyDamage};
use crate::managers::grenades::Detonation;
use crate::managers::items::ItemPool;
use crate::managers::player::Player;

/// Run the full collision pass for one tick.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    player: &mut Player,
    bullets: &mut BulletPool,
    detonations: &[Detonation],
    items: &mut ItemPool,
    config: &GameConfig,
    game: &mut GameState,
    events: &mut Vec<GameEvent>,
    dt: f64,
) {
    bullet_hits(world, bullets, game, events);
    for detonation in detonations {
        explode(world, detonation, game, events);
    }
    contact_damage(world, player, dt, events);
    pickups(player, items, config, game, events);
}

/// Each bullet hits at most one living enemy: the first whose body it is
/// inside (planar reach, below body height). Hit bullets are removed.
pub fn bullet_hits(world: &mut World, bullets: &mut BulletPool, game: &mut GameState, events: &mut Vec<GameEvent>) {
    let targets: Vec<(Entity, DVec3)> = world
        .query::<(&Enemy, &Pose, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.alive)
        .map(|(entity, (_, pose, _))| (entity, pose.position))
        .collect();
    if targets.is_empty() {
        return;
    }

    for bullet in bullets.iter_mut() {
        if !bullet.active {
            continue;
        }
        for &(entity, base) in &targets {
            let height = bullet.position.y - base.y;
            if planar_distance(bullet.position, base) >= BULLET_HIT_RADIUS || height >= BULLET_HIT_HEIGHT {
                continue;
            }
            let headshot = enemies::is_headshot(base, bullet.position.y);
            // An enemy killed by an earlier bullet this tick no longer counts.
            if player_hit(world, entity, bullet.damage, headshot, game, events) {
                bullet.active = false;
                break;
            }
        }
    }
    bullets.retain_active();
}

/// Instant ray hit from a hitscan weapon. Returns true on a hit.
#[allow(clippy::too_many_arguments)]
pub fn hitscan(
    world: &mut World,
    origin: DVec3,
    direction: DVec3,
    range: f64,
    damage: f64,
    obstacles: &[Obstacle],
    game: &mut GameState,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Some(hit) = enemies::cast_ray(world, origin, direction, range, obstacles) else {
        return false;
    };
    let base = match world.get::<&Pose>(hit.entity) {
        Ok(pose) => pose.position,
        Err(_) => return false,
    };
    let headshot = enemies::is_headshot(base, hit.point.y);
    player_hit(world, hit.entity, damage, headshot, game, events)
}

/// Apply one of the player's hits to an enemy and report it.
fn player_hit(
    world: &mut World,
    entity: Entity,
    damage: f64,
    headshot: bool,
    game: &mut GameState,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Some(result) = enemies::take_damage(world, entity, damage) else {
        return false;
    };
    game.record_hit();
    events.push(GameEvent::EnemyHit {
        enemy_id: result.enemy_id,
        damage: result.applied,
        headshot,
    });
    events.push(GameEvent::Sound {
        sound: SoundKind::Hit,
        position: result.position,
    });
    if result.killed {
        report_kill(&result, headshot, game, events);
    }
    true
}

fn report_kill(result: &EnemyDamage, headshot: bool, game: &mut GameState, events: &mut Vec<GameEvent>) {
    let points = GameState::kill_points(result.score_value, headshot);
    events.push(GameEvent::EnemyKilled {
        enemy_id: result.enemy_id,
        kind: result.kind,
        headshot,
        score: points,
    });
    events.push(GameEvent::Sound {
        sound: SoundKind::EnemyDeath,
        position: result.position,
    });
    game.record_kill(result.kind, headshot, points, events);
}

/// Radius damage from one detonation.
pub fn explode(world: &mut World, detonation: &Detonation, game: &mut GameState, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::Sound {
        sound: SoundKind::Explosion,
        position: detonation.position,
    });

    let hits = enemies::damage_in_radius(world, detonation.position, detonation.radius, detonation.damage);
    let mut kills = 0;
    for hit in &hits {
        events.push(GameEvent::EnemyHit {
            enemy_id: hit.enemy_id,
            damage: hit.applied,
            headshot: false,
        });
        if hit.killed {
            kills += 1;
            report_kill(hit, false, game, events);
        }
    }

    events.push(GameEvent::Explosion {
        position: detonation.position,
        radius: detonation.radius,
        kills,
    });
    log::debug!("grenade {} detonated, {} hit, {} killed", detonation.grenade_id, hits.len(), kills);
}

/// Continuous damage while any living enemy touches the player.
pub fn contact_damage(world: &World, player: &mut Player, dt: f64, events: &mut Vec<GameEvent>) {
    if !player.alive() {
        return;
    }
    let Some(enemy_position) = enemies::first_contact(world, player.eye()) else {
        return;
    };
    let amount = PLAYER_CONTACT_DPS * dt;
    let outcome = player.take_damage(amount);
    let to_enemy = DVec3::new(
        enemy_position.x - player.eye().x,
        0.0,
        enemy_position.z - player.eye().z,
    );
    events.push(GameEvent::PlayerDamaged {
        amount,
        direction: to_enemy.normalize_or_zero(),
    });
    if outcome.killed {
        events.push(GameEvent::Sound {
            sound: SoundKind::PlayerDeath,
            position: player.eye(),
        });
        log::info!("player overrun");
    }
}

/// Collect items within reach and apply their effects.
pub fn pickups(
    player: &mut Player,
    items: &mut ItemPool,
    config: &GameConfig,
    game: &mut GameState,
    events: &mut Vec<GameEvent>,
) {
    if !player.alive() {
        return;
    }
    for item in items.collect_near(player.eye(), &config.items) {
        let value = config.items.get(item.kind).value;
        match item.kind {
            ItemKind::HealthPack => {
                player.heal(value);
            }
            ItemKind::ArmorPack => {
                player.add_armor(value);
            }
            ItemKind::AmmoPack => {
                player.arsenal.add_reserve(value.max(0.0).round() as u32);
            }
            ItemKind::GrenadePack => {
                player.add_grenades(value.max(0.0).round() as u32);
            }
            ItemKind::Intel => {}
        }
        events.push(GameEvent::ItemCollected {
            kind: item.kind,
            value,
        });
        events.push(GameEvent::Sound {
            sound: SoundKind::ItemPickup,
            position: item.position(),
        });
        game.record_pickup(item.kind, value, events);
    }
}
