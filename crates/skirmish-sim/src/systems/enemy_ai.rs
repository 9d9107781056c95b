//! Enemy AI system: runs every living enemy's brain, then resolves the
//! shots they fired at the player.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_ai::{AiContext, EnemyBrain};
use skirmish_core::components::{CombatStats, Enemy};
use skirmish_core::config::EnemyStats;
use skirmish_core::constants::ENEMY_EYE_HEIGHT;
use skirmish_core::enums::SoundKind;
use skirmish_core::events::GameEvent;
use skirmish_core::types::{Health, Obstacle, Pose, WorldBounds};
use skirmish_spatial::segment_blocked;

use crate::managers::player::Player;

/// Update every living enemy. Dead enemies neither think nor move.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    player: &mut Player,
    obstacles: &[Obstacle],
    bounds: &WorldBounds,
    now_secs: f64,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    let target = player.alive().then(|| player.eye());

    // Collect shots first; the player is damaged after the query ends.
    let mut shots: Vec<(u32, DVec3, EnemyStats)> = Vec::new();

    for (_entity, (enemy, health, stats, pose, brain)) in
        world.query_mut::<(&Enemy, &Health, &CombatStats, &mut Pose, &mut EnemyBrain)>()
    {
        if !health.alive {
            continue;
        }

        let ctx = AiContext {
            stats: &stats.0,
            health_fraction: health.fraction(),
            target,
            obstacles,
            bounds,
            now_secs,
            dt,
        };
        let update = skirmish_ai::update(brain, pose, &ctx, rng);

        if update.state_changed() {
            log::debug!("enemy {} {:?} -> {:?}", enemy.id, update.from, update.to);
        }
        if update.fired {
            shots.push((enemy.id, pose.position, stats.0));
        }
    }

    for (enemy_id, position, stats) in shots {
        resolve_enemy_shot(rng, player, enemy_id, position, &stats, obstacles, events);
    }
}

/// One enemy shot: blocked by cover, otherwise hits on an accuracy roll.
fn resolve_enemy_shot(
    rng: &mut ChaCha8Rng,
    player: &mut Player,
    enemy_id: u32,
    position: DVec3,
    stats: &EnemyStats,
    obstacles: &[Obstacle],
    events: &mut Vec<GameEvent>,
) {
    let muzzle = position + DVec3::new(0.0, ENEMY_EYE_HEIGHT, 0.0);
    events.push(GameEvent::Sound {
        sound: SoundKind::EnemyShot,
        position: muzzle,
    });

    if !player.alive() || segment_blocked(muzzle, player.eye(), obstacles) {
        return;
    }
    if !rng.gen_bool(stats.accuracy.clamp(0.0, 1.0)) {
        return;
    }

    let outcome = player.take_damage(stats.damage);
    events.push(GameEvent::PlayerDamaged {
        amount: stats.damage,
        direction: (muzzle - player.eye()).normalize_or_zero(),
    });
    events.push(GameEvent::Sound {
        sound: SoundKind::PlayerHit,
        position: player.eye(),
    });
    if outcome.killed {
        events.push(GameEvent::Sound {
            sound: SoundKind::PlayerDeath,
            position: player.eye(),
        });
        log::info!("player killed by enemy {enemy_id}");
    }
}
