//! Tests for the simulation engine: determinism, game flow, weapons,
//! collisions and the game rules.

use glam::DVec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::{PlayerCommand, PlayerInput};
use skirmish_core::components::Enemy;
use skirmish_core::config::{GameConfig, ModeConfig};
use skirmish_core::constants::{DEFAULT_DT, PLAYER_CONTACT_DPS};
use skirmish_core::enums::*;
use skirmish_core::events::GameEvent;
use skirmish_core::state::{GameStateSnapshot, ModeStatus};
use skirmish_core::types::{Health, Obstacle, WorldBounds};
use skirmish_spatial::planar_distance;

use crate::engine::{SimConfig, SimulationEngine};
use crate::game_state::GameState;
use crate::managers::enemies;
use crate::managers::grenades::Detonation;
use crate::systems::collision;

fn standing() -> PlayerInput {
    PlayerInput::new(DVec3::new(0.0, 1.7, 0.0), 0.0, 0.0)
}

/// Open arena with no spawning, so only the test's own enemies exist.
fn quiet_config(seed: u64) -> SimConfig {
    let mut game = GameConfig::default();
    game.world.box_count = 0;
    game.world.wall_count = 0;
    game.spawning.interval_secs = 1.0e9;
    game.items.spawn_interval_secs = 1.0e9;
    SimConfig {
        seed,
        game,
        ..Default::default()
    }
}

fn start(config: SimConfig, mode: GameMode) -> (SimulationEngine, GameStateSnapshot) {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartGame {
        mode,
        difficulty: Difficulty::Normal,
    });
    let snapshot = engine.tick(standing(), DEFAULT_DT);
    (engine, snapshot)
}

/// Tick `n` times and gather every event raised.
fn run_ticks(engine: &mut SimulationEngine, n: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        events.extend(engine.tick(standing(), DEFAULT_DT).events);
    }
    events
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    let start = PlayerCommand::StartGame {
        mode: GameMode::Survival,
        difficulty: Difficulty::Hard,
    };
    engine_a.queue_command(start.clone());
    engine_b.queue_command(start);

    for tick in 0..600 {
        if tick % 20 == 0 {
            engine_a.queue_command(PlayerCommand::Fire);
            engine_b.queue_command(PlayerCommand::Fire);
        }
        let input = PlayerInput::new(DVec3::new(0.0, 1.7, 0.0), tick as f64 * 0.01, 0.0);
        let snap_a = engine_a.tick(input, DEFAULT_DT);
        let snap_b = engine_b.tick(input, DEFAULT_DT);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed at tick {tick}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    let start = PlayerCommand::StartGame {
        mode: GameMode::Survival,
        difficulty: Difficulty::Normal,
    };
    engine_a.queue_command(start.clone());
    engine_b.queue_command(start);

    // Enemies appear at a random angle after two seconds.
    let mut diverged = false;
    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick(standing(), DEFAULT_DT)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(standing(), DEFAULT_DT)).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce different games");
}

// ---- Game flow ----

#[test]
fn test_engine_starts_in_menu() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snapshot = engine.tick(standing(), DEFAULT_DT);
    assert_eq!(snapshot.phase, GamePhase::Menu);
    assert!(snapshot.mode_status.is_none());
    assert_eq!(snapshot.time.tick, 0);
}

#[test]
fn test_start_game_begins_first_wave() {
    let (engine, snapshot) = start(quiet_config(1), GameMode::Survival);
    assert_eq!(engine.phase(), GamePhase::Playing);
    assert_eq!(snapshot.time.tick, 1);
    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        GameEvent::WaveStarted {
            wave: 1,
            enemy_count: 5
        }
    )));
    match snapshot.mode_status {
        Some(ModeStatus::Survival { wave, .. }) => assert_eq!(wave, 1),
        other => panic!("expected survival status, got {other:?}"),
    }
}

#[test]
fn test_start_game_builds_arena() {
    let (engine, _) = start(SimConfig::default(), GameMode::TimeChallenge);
    assert_eq!(engine.obstacles().len(), 30);
}

#[test]
fn test_pause_stops_time() {
    let (mut engine, _) = start(quiet_config(2), GameMode::TimeChallenge);
    run_ticks(&mut engine, 10);
    let before = engine.time();

    engine.queue_command(PlayerCommand::Pause);
    run_ticks(&mut engine, 30);
    assert_eq!(engine.phase(), GamePhase::Paused);
    assert_eq!(engine.time(), before);

    engine.queue_command(PlayerCommand::Resume);
    run_ticks(&mut engine, 1);
    assert_eq!(engine.time().tick, before.tick + 1);
}

#[test]
fn test_large_dt_is_clamped() {
    let (mut engine, _) = start(quiet_config(3), GameMode::TimeChallenge);
    let before = engine.time().elapsed_secs;
    engine.tick(standing(), 5.0);
    assert!((engine.time().elapsed_secs - before - 0.1).abs() < 1e-12);
    engine.tick(standing(), f64::NAN);
    assert!((engine.time().elapsed_secs - before - 0.1).abs() < 1e-12);
}

#[test]
fn test_restart_and_return_to_menu() {
    let (mut engine, _) = start(quiet_config(4), GameMode::Survival);
    engine.spawn_test_enemy(EnemyKind::Regular, DVec3::new(0.0, 0.0, 20.0));
    run_ticks(&mut engine, 30);

    engine.queue_command(PlayerCommand::Restart);
    let snapshot = engine.tick(standing(), DEFAULT_DT);
    assert_eq!(snapshot.phase, GamePhase::Playing);
    assert_eq!(snapshot.time.tick, 1);
    assert!(snapshot.enemies.is_empty());

    engine.queue_command(PlayerCommand::ReturnToMenu);
    let snapshot = engine.tick(standing(), DEFAULT_DT);
    assert_eq!(snapshot.phase, GamePhase::Menu);
    assert!(snapshot.mode_status.is_none());
    assert!(engine.obstacles().is_empty());
}

#[test]
fn test_actions_ignored_outside_play() {
    let mut engine = SimulationEngine::new(quiet_config(5));
    engine.queue_command(PlayerCommand::Fire);
    engine.queue_command(PlayerCommand::ThrowGrenade);
    let snapshot = engine.tick(standing(), DEFAULT_DT);
    assert!(snapshot.events.is_empty());
    assert_eq!(snapshot.score.shots_fired, 0);
    assert!(snapshot.grenades.is_empty());
}

#[test]
fn test_player_death_ends_game() {
    let (mut engine, _) = start(quiet_config(6), GameMode::Survival);
    engine.player_mut().take_damage(1000.0);
    let snapshot = engine.tick(standing(), DEFAULT_DT);

    assert_eq!(snapshot.phase, GamePhase::GameOver);
    assert_eq!(snapshot.outcome, Some(GameOutcome::Defeat));
    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        GameEvent::GameOver {
            outcome: GameOutcome::Defeat,
            ..
        }
    )));

    let frozen = engine.time();
    run_ticks(&mut engine, 10);
    assert_eq!(engine.time(), frozen);
}

// ---- Weapons and hits ----

#[test]
fn test_pistol_bullet_hits_enemy() {
    let (mut engine, _) = start(quiet_config(7), GameMode::Survival);
    let id = engine.spawn_test_enemy(EnemyKind::Regular, DVec3::new(0.0, 0.0, 5.0));

    engine.queue_command(PlayerCommand::Fire);
    let events = run_ticks(&mut engine, 10);

    let hits: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::EnemyHit {
                enemy_id,
                damage,
                headshot,
            } => Some((*enemy_id, *damage, *headshot)),
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![(id, 25.0, false)]);

    let snapshot = engine.tick(standing(), DEFAULT_DT);
    assert!(snapshot.bullets.is_empty());
    assert_eq!(snapshot.enemies[0].health, 75.0);
    assert_eq!(snapshot.score.shots_fired, 1);
    assert_eq!(snapshot.score.shots_hit, 1);
    assert_eq!(snapshot.player.weapon.ammo, 11);
}

#[test]
fn test_sniper_headshot_scores_double() {
    let (mut engine, _) = start(quiet_config(8), GameMode::Survival);
    let id = engine.spawn_test_enemy(EnemyKind::Regular, DVec3::new(0.0, 0.0, 10.0));

    engine.queue_command(PlayerCommand::SelectWeapon {
        weapon: WeaponKind::Sniper,
    });
    engine.queue_command(PlayerCommand::Fire);
    let snapshot = engine.tick(standing(), DEFAULT_DT);

    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        GameEvent::EnemyKilled {
            enemy_id,
            headshot: true,
            score: 200,
            ..
        } if *enemy_id == id
    )));
    assert_eq!(snapshot.score.score, 200);
    assert_eq!(snapshot.score.kills, 1);
    assert_eq!(snapshot.score.headshots, 1);
    assert!(snapshot.bullets.is_empty());
    assert!(!snapshot.enemies[0].alive);
}

#[test]
fn test_sniper_blocked_by_wall() {
    let (mut engine, _) = start(quiet_config(9), GameMode::Survival);
    engine.spawn_test_enemy(EnemyKind::Regular, DVec3::new(0.0, 0.0, 10.0));
    engine.set_obstacles(vec![Obstacle::ground_box(0.0, 5.0, 10.0, 4.0, 1.0)]);

    engine.queue_command(PlayerCommand::SelectWeapon {
        weapon: WeaponKind::Sniper,
    });
    engine.queue_command(PlayerCommand::Fire);
    let snapshot = engine.tick(standing(), DEFAULT_DT);

    assert_eq!(snapshot.score.shots_fired, 1);
    assert_eq!(snapshot.score.shots_hit, 0);
    assert!(snapshot.enemies[0].alive);
}

#[test]
fn test_shotgun_counts_every_pellet() {
    let (mut engine, _) = start(quiet_config(10), GameMode::Survival);
    engine.queue_command(PlayerCommand::SelectWeapon {
        weapon: WeaponKind::Shotgun,
    });
    engine.queue_command(PlayerCommand::Fire);
    let snapshot = engine.tick(standing(), DEFAULT_DT);

    assert_eq!(snapshot.score.shots_fired, 8);
    assert_eq!(snapshot.bullets.len(), 8);
    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        GameEvent::Sound {
            sound: SoundKind::ShotgunShot,
            ..
        }
    )));
}

#[test]
fn test_grenade_explodes_once() {
    let (mut engine, _) = start(quiet_config(11), GameMode::Survival);
    engine.queue_command(PlayerCommand::ThrowGrenade);
    let events = run_ticks(&mut engine, 300);

    let explosions = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Explosion { .. }))
        .count();
    assert_eq!(explosions, 1);

    let snapshot = engine.tick(standing(), DEFAULT_DT);
    assert_eq!(snapshot.player.grenades, 2);
    assert!(snapshot.grenades.is_empty());
}

#[test]
fn test_explosion_damages_only_inside_radius() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let bounds = WorldBounds::new(50.0);
    let stats = GameConfig::default().enemies.heavy;
    for (id, x) in [(1, 3.0), (2, 7.9), (3, 9.0)] {
        enemies::spawn_enemy(
            &mut world,
            &mut rng,
            id,
            id as u64,
            EnemyKind::Heavy,
            DVec3::new(x, 0.0, 0.0),
            DVec3::ZERO,
            stats,
            &bounds,
        );
    }
    let mut game = GameState::new(GameMode::TimeChallenge, ModeConfig::default());
    let mut events = Vec::new();

    let detonation = Detonation {
        grenade_id: 1,
        position: DVec3::new(0.0, 0.2, 0.0),
        radius: 8.0,
        damage: 50.0,
    };
    collision::explode(&mut world, &detonation, &mut game, &mut events);

    let mut health: Vec<(u32, f64)> = world
        .query::<(&Enemy, &Health)>()
        .iter()
        .map(|(_, (enemy, health))| (enemy.id, health.current))
        .collect();
    health.sort_by_key(|(id, _)| *id);
    assert_eq!(health, vec![(1, 150.0), (2, 150.0), (3, 200.0)]);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Explosion { kills: 0, .. }
    )));
}

#[test]
fn test_dead_enemy_scores_once() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let bounds = WorldBounds::new(50.0);
    let stats = GameConfig::default().enemies.regular;
    enemies::spawn_enemy(
        &mut world,
        &mut rng,
        1,
        0,
        EnemyKind::Regular,
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::ZERO,
        stats,
        &bounds,
    );
    let mut game = GameState::new(GameMode::TimeChallenge, ModeConfig::default());
    let mut events = Vec::new();

    let detonation = Detonation {
        grenade_id: 1,
        position: DVec3::ZERO,
        radius: 8.0,
        damage: 300.0,
    };
    collision::explode(&mut world, &detonation, &mut game, &mut events);
    collision::explode(&mut world, &detonation, &mut game, &mut events);

    let kills = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        .count();
    assert_eq!(kills, 1);
    assert_eq!(game.score.kills, 1);
    assert_eq!(game.score.score, 100);
}

// ---- Contact and pickups ----

#[test]
fn test_contact_damage_per_second() {
    let (mut engine, _) = start(quiet_config(14), GameMode::Survival);
    engine.spawn_test_enemy(EnemyKind::Regular, DVec3::new(0.5, 0.0, 0.0));
    let snapshot = engine.tick(standing(), DEFAULT_DT);

    let expected = PLAYER_CONTACT_DPS * DEFAULT_DT;
    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        GameEvent::PlayerDamaged { amount, .. } if (*amount - expected).abs() < 1e-12
    )));
    assert!((snapshot.player.health - (100.0 - expected)).abs() < 1e-9);
}

#[test]
fn test_item_pickup_applies_effect() {
    let (mut engine, _) = start(quiet_config(15), GameMode::Survival);
    engine
        .items_mut()
        .spawn(ItemKind::ArmorPack, DVec3::new(0.0, 0.5, 0.2));
    let snapshot = engine.tick(standing(), DEFAULT_DT);

    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        GameEvent::ItemCollected {
            kind: ItemKind::ArmorPack,
            ..
        }
    )));
    assert_eq!(snapshot.player.armor, 50.0);
    assert!(snapshot.items.is_empty());
}

#[test]
fn test_mission_places_intel() {
    let (_, snapshot) = start(quiet_config(16), GameMode::Mission);
    let intel = snapshot
        .items
        .iter()
        .filter(|i| i.kind == ItemKind::Intel)
        .count();
    assert_eq!(intel, 3);
}

// ---- Spawning ----

#[test]
fn test_enemies_spawn_at_fixed_distance() {
    let mut config = quiet_config(17);
    config.game.spawning.interval_secs = 2.0;
    let (mut engine, _) = start(config, GameMode::Survival);
    let events = run_ticks(&mut engine, 130);

    let spawns: Vec<DVec3> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::EnemySpawned { position, .. } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(spawns.len(), 1);
    assert!((planar_distance(spawns[0], DVec3::ZERO) - 30.0).abs() < 1e-9);
    assert_eq!(spawns[0].y, 0.0);
}

#[test]
fn test_snapshot_enemies_sorted_by_id() {
    let (mut engine, _) = start(quiet_config(18), GameMode::Survival);
    for z in [20.0, 25.0, 30.0] {
        engine.spawn_test_enemy(EnemyKind::Heavy, DVec3::new(5.0, 0.0, z));
    }
    let snapshot = engine.tick(standing(), DEFAULT_DT);
    let ids: Vec<u32> = snapshot.enemies.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}
