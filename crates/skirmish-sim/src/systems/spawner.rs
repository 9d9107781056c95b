//! Enemy spawner: brings in a new enemy around the player at a fixed
//! interval, while the game rules allow it.

use std::f64::consts::TAU;

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::config::GameConfig;
use skirmish_core::enums::Difficulty;
use skirmish_core::events::GameEvent;
use skirmish_core::types::{timer_reached, WorldBounds};

use crate::game_state::GameState;
use crate::managers::enemies;

/// Spawn clock and id allocation.
#[derive(Debug, Clone)]
pub struct EnemySpawner {
    /// Time accumulated toward the next spawn attempt.
    pub timer: f64,
    pub next_id: u32,
    pub next_order: u64,
}

impl Default for EnemySpawner {
    fn default() -> Self {
        Self {
            timer: 0.0,
            next_id: 1,
            next_order: 0,
        }
    }
}

/// Attempt one spawn per interval. A spawn point outside the arena skips
/// the attempt until the next interval.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    spawner: &mut EnemySpawner,
    game: &mut GameState,
    config: &GameConfig,
    difficulty: Difficulty,
    player: DVec3,
    bounds: &WorldBounds,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
    dt: f64,
) {
    spawner.timer += dt;
    if !timer_reached(spawner.timer, config.spawning.interval_secs) {
        return;
    }
    spawner.timer = 0.0;

    if !game.may_spawn_enemy() {
        return;
    }

    let angle = rng.gen_range(0.0..TAU);
    let Some(position) = enemies::spawn_point(player, angle, config.spawning.distance, bounds) else {
        log::debug!("spawn point outside the arena, skipped");
        return;
    };

    let evicted = enemies::make_room(world, config.spawning.max_enemies, despawn_buffer);
    for _ in 0..evicted {
        game.enemy_evicted();
    }

    let kind = enemies::pick_kind(rng, &config.enemies);
    let stats = config.enemies.get(kind).scaled(config.difficulty.get(difficulty));
    let id = spawner.next_id;
    spawner.next_id = spawner.next_id.wrapping_add(1);
    let order = spawner.next_order;
    spawner.next_order += 1;

    enemies::spawn_enemy(world, rng, id, order, kind, position, player, stats, bounds);
    game.enemy_spawned();
    events.push(GameEvent::EnemySpawned {
        enemy_id: id,
        kind,
        position,
    });
    log::debug!("enemy {id} ({kind:?}) spawned at ({:.1}, {:.1})", position.x, position.z);
}
