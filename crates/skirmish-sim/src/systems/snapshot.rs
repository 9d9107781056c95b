//! Snapshot system: reads the world and the pools and builds a complete
//! GameStateSnapshot. Read-only.

use hecs::World;

use skirmish_ai::EnemyBrain;
use skirmish_core::components::Enemy;
use skirmish_core::enums::*;
use skirmish_core::events::GameEvent;
use skirmish_core::state::*;
use skirmish_core::types::{Health, Pose, SimTime};

use crate::game_state::GameState;
use crate::managers::bullets::BulletPool;
use crate::managers::grenades::GrenadePool;
use crate::managers::items::ItemPool;
use crate::managers::player::Player;

/// Build a complete GameStateSnapshot from the current simulation state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    difficulty: Difficulty,
    player: &Player,
    bullets: &BulletPool,
    grenades: &GrenadePool,
    items: &ItemPool,
    game: &GameState,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let in_game = phase != GamePhase::Menu;

    GameStateSnapshot {
        time: *time,
        phase,
        mode: game.mode,
        difficulty,
        outcome: game.outcome,
        player: player.view(),
        enemies: build_enemies(world),
        bullets: bullets.views(),
        grenades: grenades.views(),
        items: items.views(),
        score: game.score.view(),
        mode_status: in_game.then(|| game.mode_status()),
        events,
    }
}

/// Enemy views ordered by id so snapshots compare stably.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Pose, &Health, &EnemyBrain)>()
        .iter()
        .map(|(_, (enemy, pose, health, brain))| EnemyView {
            id: enemy.id,
            kind: enemy.kind,
            position: pose.position,
            yaw: pose.yaw,
            health: health.current,
            max_health: health.max,
            alive: health.alive,
            state: brain.state,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}
