#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::commands::{PlayerCommand, PlayerInput};
    use crate::config::{ConfigError, GameConfig};
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::state::{GameStateSnapshot, ModeStatus};
    use crate::types::{timer_reached, Health, Obstacle, Pose, SimTime, WorldBounds};

    #[test]
    fn test_enemy_kind_serde() {
        for v in EnemyKind::ALL {
            let json = serde_json::to_string(&v).unwrap();
            let back: EnemyKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_objective_kind_serde() {
        let variants = vec![
            ObjectiveKind::Kill(EnemyKind::Heavy),
            ObjectiveKind::Collect(ItemKind::Intel),
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: ObjectiveKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
        let json = serde_json::to_string(&ObjectiveKind::Kill(EnemyKind::Sniper)).unwrap();
        assert_eq!(json, r#"{"type":"Kill","target":"Sniper"}"#);
    }

    /// PlayerCommand is a tagged union the host can write by hand.
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::StartGame {
                mode: GameMode::Mission,
                difficulty: Difficulty::Hard,
            },
            PlayerCommand::Pause,
            PlayerCommand::Resume,
            PlayerCommand::Restart,
            PlayerCommand::ReturnToMenu,
            PlayerCommand::SelectWeapon {
                weapon: WeaponKind::Shotgun,
            },
            PlayerCommand::Reload,
            PlayerCommand::Fire,
            PlayerCommand::ThrowGrenade,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"SelectWeapon","weapon":"Sniper"}"#).unwrap();
        assert!(matches!(
            parsed,
            PlayerCommand::SelectWeapon {
                weapon: WeaponKind::Sniper
            }
        ));
    }

    #[test]
    fn test_game_event_serde() {
        let events = vec![
            GameEvent::Sound {
                sound: SoundKind::Explosion,
                position: DVec3::new(1.0, 0.2, -3.0),
            },
            GameEvent::EnemyKilled {
                enemy_id: 4,
                kind: EnemyKind::Heavy,
                headshot: true,
                score: 400,
            },
            GameEvent::PlayerDamaged {
                amount: 10.0,
                direction: DVec3::X,
            },
            GameEvent::ObjectiveProgress {
                kind: ObjectiveKind::Collect(ItemKind::Intel),
                target: 3,
                count: 1,
            },
            GameEvent::GameOver {
                outcome: GameOutcome::Victory,
                score: 2100,
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let mut snapshot = GameStateSnapshot::default();
        snapshot.mode_status = Some(ModeStatus::Survival {
            wave: 2,
            enemies_remaining: 7,
            next_wave_in_secs: None,
        });
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(matches!(
            back.mode_status,
            Some(ModeStatus::Survival { wave: 2, .. })
        ));
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(DEFAULT_DT);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    /// Summing 1/60 falls just short of whole seconds; the timer check tolerates it.
    #[test]
    fn test_timer_reached_absorbs_float_drift() {
        let mut acc = 0.0;
        let mut ticks = 0;
        while !timer_reached(acc, 2.0) {
            acc += DEFAULT_DT;
            ticks += 1;
        }
        assert_eq!(ticks, 120);
        assert!(!timer_reached(1.9, 2.0));
    }

    #[test]
    fn test_pose_forward() {
        let pose = Pose::new(DVec3::ZERO, 0.0);
        assert!((pose.forward() - DVec3::Z).length() < 1e-12);
        let east = Pose::new(DVec3::ZERO, std::f64::consts::FRAC_PI_2);
        assert!((east.forward() - DVec3::X).length() < 1e-12);
    }

    #[test]
    fn test_aim_direction_is_unit() {
        let input = PlayerInput::new(DVec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0), 0.7, 0.3);
        assert!((input.aim_direction().length() - 1.0).abs() < 1e-12);
        let level = PlayerInput::new(DVec3::ZERO, 0.0, 0.0);
        assert!((level.aim_direction() - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_obstacle_ground_box() {
        let wall = Obstacle::ground_box(5.0, -2.0, 10.0, 4.0, 1.0);
        assert_eq!(wall.center, DVec3::new(5.0, 2.0, -2.0));
        assert_eq!(wall.min(), DVec3::new(0.0, 0.0, -2.5));
        assert_eq!(wall.max(), DVec3::new(10.0, 4.0, -1.5));
        assert_eq!(wall.planar_extent(), 5.0);
    }

    #[test]
    fn test_world_bounds_clamp() {
        let bounds = WorldBounds::new(100.0);
        assert_eq!(bounds.clamp_planar(150.0, -150.0, 2.0), (98.0, -98.0));
        assert_eq!(bounds.clamp_planar(10.0, 20.0, 2.0), (10.0, 20.0));
        let p = bounds.clamp_point(DVec3::new(-120.0, 3.0, 5.0), 1.0);
        assert_eq!(p, DVec3::new(-99.0, 3.0, 5.0));
        assert!(bounds.contains(DVec3::new(100.0, 0.0, -100.0)));
        assert!(!bounds.contains(DVec3::new(0.0, -0.1, 0.0)));
        assert!(!bounds.contains(DVec3::new(0.0, 101.0, 0.0)));
    }

    #[test]
    fn test_health_damage_sequence_stays_in_range() {
        let mut health = Health::new(100.0);
        let hits = [30.0, -5.0, 0.0, 45.0, 80.0, 10.0];
        let mut kills = 0;
        for amount in hits {
            let outcome = health.take_damage(amount);
            assert!(health.current >= 0.0 && health.current <= health.max);
            assert!(outcome.applied >= 0.0);
            if outcome.killed {
                kills += 1;
            }
        }
        assert_eq!(kills, 1, "kill must be reported exactly once");
        assert!(!health.alive);
        assert_eq!(health.current, 0.0);
    }

    #[test]
    fn test_health_dead_is_noop() {
        let mut health = Health::new(50.0);
        assert!(health.take_damage(50.0).killed);
        let again = health.take_damage(10.0);
        assert!(!again.killed);
        assert_eq!(again.applied, 0.0);
        assert_eq!(health.heal(20.0), 0.0);
    }

    #[test]
    fn test_health_heal_clamps() {
        let mut health = Health::new(100.0);
        health.take_damage(30.0);
        assert_eq!(health.heal(50.0), 30.0);
        assert_eq!(health.current, 100.0);
        assert!((health.fraction() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.world.size, 50.0);
        assert_eq!(config.weapons.get(WeaponKind::Shotgun).pellets, 8);
        assert!(config.weapons.get(WeaponKind::Sniper).hitscan);
        assert_eq!(config.enemies.get(EnemyKind::Heavy).score_value, 200);
        assert_eq!(config.modes.mission.objectives.len(), 4);
    }

    #[test]
    fn test_config_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json(r#"{"world":{"size":100.0},"spawning":{"interval_secs":1.0}}"#)
                .unwrap();
        assert_eq!(config.world.size, 100.0);
        assert_eq!(config.world.box_count, 20);
        assert_eq!(config.spawning.interval_secs, 1.0);
        assert_eq!(config.spawning.distance, 30.0);
        assert_eq!(config.grenade.radius, 8.0);
    }

    #[test]
    fn test_config_rejects_attack_beyond_detection() {
        let mut config = GameConfig::default();
        config.enemies.sniper.attack_range = 60.0;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => {
                assert!(field.contains("attack_range"), "field was {field}");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_config_rejects_bad_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"world":{"size":-5.0}}"#),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_config_load_missing_file() {
        let result = GameConfig::load("/nonexistent/skirmish-config.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_difficulty_scaling() {
        let config = GameConfig::default();
        let base = config.enemies.get(EnemyKind::Regular);
        let hard = base.scaled(config.difficulty.get(Difficulty::Hard));
        assert!((hard.max_health - 120.0).abs() < 1e-9);
        assert!((hard.damage - 13.0).abs() < 1e-9);
        assert!((hard.speed - 6.0).abs() < 1e-9);
        assert!((hard.accuracy - 0.91).abs() < 1e-9);
        assert_eq!(hard.detection_range, base.detection_range);

        let sniper = config.enemies.get(EnemyKind::Sniper);
        let scaled = sniper.scaled(config.difficulty.get(Difficulty::Hard));
        assert!(scaled.accuracy <= 1.0);
    }

    #[test]
    fn test_survival_wave_size() {
        let survival = GameConfig::default().modes.survival;
        assert_eq!(survival.wave_size(1), 5);
        assert_eq!(survival.wave_size(2), 7);
        assert_eq!(survival.wave_size(10), 23);
    }

    #[test]
    fn test_item_pickup_radius() {
        let items = GameConfig::default().items;
        assert!((items.get(ItemKind::HealthPack).pickup_radius() - 0.65).abs() < 1e-12);
        assert!((items.get(ItemKind::Intel).pickup_radius() - 0.6).abs() < 1e-12);
    }
}
