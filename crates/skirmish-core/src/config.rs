//! Game tuning tables.
//!
//! Every per-kind number is a row in a table keyed by an enum. `Default`
//! reproduces the stock tuning; a JSON file may override any subset of it
//! (missing fields fall back to the defaults). Tables are validated once at
//! load time so the simulation can trust them afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::*;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Complete tuning for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub weapons: WeaponTable,
    pub grenade: GrenadeStats,
    pub enemies: EnemyTable,
    pub difficulty: DifficultyTable,
    pub items: ItemTable,
    pub spawning: SpawnConfig,
    pub modes: ModeConfig,
}

/// Arena dimensions and static geometry generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Half side length of the square arena.
    pub size: f64,
    /// Number of 2×2×2 crates scattered over the arena.
    pub box_count: u32,
    /// Number of 10×4×1 wall segments.
    pub wall_count: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: 50.0,
            box_count: 20,
            wall_count: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: f64,
    pub max_armor: f64,
    pub starting_armor: f64,
    pub max_grenades: u32,
    pub starting_grenades: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_armor: 100.0,
            starting_armor: 0.0,
            max_grenades: 3,
            starting_grenades: 3,
        }
    }
}

/// Stats for one player weapon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Damage per bullet (per pellet for the shotgun).
    pub damage: f64,
    /// Shots per second.
    pub fire_rate: f64,
    /// Maximum random deviation applied to each aim axis.
    pub spread: f64,
    pub magazine_size: u32,
    pub reload_secs: f64,
    /// Reserve ammunition carried at the start of a game.
    pub max_ammo: u32,
    /// Hitscan reach; projectile weapons ignore it.
    pub range: f64,
    /// Bullets emitted per shot.
    pub pellets: u32,
    /// Resolve shots instantly with a ray instead of spawning bullets.
    pub hitscan: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    pub pistol: WeaponStats,
    pub rifle: WeaponStats,
    pub shotgun: WeaponStats,
    pub sniper: WeaponStats,
}

impl WeaponTable {
    pub fn get(&self, kind: WeaponKind) -> &WeaponStats {
        match kind {
            WeaponKind::Pistol => &self.pistol,
            WeaponKind::Rifle => &self.rifle,
            WeaponKind::Shotgun => &self.shotgun,
            WeaponKind::Sniper => &self.sniper,
        }
    }
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            pistol: WeaponStats {
                damage: 25.0,
                fire_rate: 2.0,
                spread: 0.02,
                magazine_size: 12,
                reload_secs: 1.5,
                max_ammo: 48,
                range: 30.0,
                pellets: 1,
                hitscan: false,
            },
            rifle: WeaponStats {
                damage: 30.0,
                fire_rate: 8.0,
                spread: 0.05,
                magazine_size: 30,
                reload_secs: 2.0,
                max_ammo: 90,
                range: 50.0,
                pellets: 1,
                hitscan: false,
            },
            shotgun: WeaponStats {
                damage: 15.0,
                fire_rate: 1.0,
                spread: 0.2,
                magazine_size: 8,
                reload_secs: 2.5,
                max_ammo: 32,
                range: 15.0,
                pellets: 8,
                hitscan: false,
            },
            sniper: WeaponStats {
                damage: 100.0,
                fire_rate: 1.0,
                spread: 0.01,
                magazine_size: 5,
                reload_secs: 3.5,
                max_ammo: 20,
                range: 100.0,
                pellets: 1,
                hitscan: true,
            },
        }
    }
}

/// Frag grenade parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrenadeStats {
    /// Damage dealt to every enemy inside the radius.
    pub damage: f64,
    pub radius: f64,
    /// Horizontal launch speed.
    pub throw_force: f64,
    pub fuse_secs: f64,
}

impl Default for GrenadeStats {
    fn default() -> Self {
        Self {
            damage: 100.0,
            radius: 8.0,
            throw_force: 15.0,
            fuse_secs: 3.0,
        }
    }
}

/// Base stats for one enemy archetype, before difficulty scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub max_health: f64,
    /// Damage per landed shot.
    pub damage: f64,
    /// Shots per second while attacking.
    pub fire_rate: f64,
    /// Movement speed (units/second).
    pub speed: f64,
    /// Probability that a shot lands.
    pub accuracy: f64,
    pub detection_range: f64,
    pub attack_range: f64,
    pub score_value: u32,
    /// Relative likelihood of this kind when spawning.
    pub spawn_weight: f64,
}

impl EnemyStats {
    /// Stats after applying a difficulty preset. Accuracy stays a probability.
    pub fn scaled(&self, modifiers: &DifficultyModifiers) -> EnemyStats {
        EnemyStats {
            max_health: self.max_health * modifiers.enemy_health,
            damage: self.damage * modifiers.enemy_damage,
            speed: self.speed * modifiers.enemy_speed,
            accuracy: (self.accuracy * modifiers.enemy_accuracy).clamp(0.0, 1.0),
            ..*self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub regular: EnemyStats,
    pub heavy: EnemyStats,
    pub sniper: EnemyStats,
}

impl EnemyTable {
    pub fn get(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Regular => &self.regular,
            EnemyKind::Heavy => &self.heavy,
            EnemyKind::Sniper => &self.sniper,
        }
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            regular: EnemyStats {
                max_health: 100.0,
                damage: 10.0,
                fire_rate: 1.0,
                speed: 5.0,
                accuracy: 0.7,
                detection_range: 30.0,
                attack_range: 20.0,
                score_value: 100,
                spawn_weight: 0.6,
            },
            heavy: EnemyStats {
                max_health: 200.0,
                damage: 20.0,
                fire_rate: 0.5,
                speed: 3.0,
                accuracy: 0.6,
                detection_range: 25.0,
                attack_range: 15.0,
                score_value: 200,
                spawn_weight: 0.25,
            },
            sniper: EnemyStats {
                max_health: 80.0,
                damage: 50.0,
                fire_rate: 0.3,
                speed: 4.0,
                accuracy: 0.9,
                detection_range: 50.0,
                attack_range: 40.0,
                score_value: 150,
                spawn_weight: 0.15,
            },
        }
    }
}

/// Multipliers applied by a difficulty preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyModifiers {
    pub enemy_health: f64,
    pub enemy_damage: f64,
    pub enemy_speed: f64,
    pub enemy_accuracy: f64,
    pub player_damage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub easy: DifficultyModifiers,
    pub normal: DifficultyModifiers,
    pub hard: DifficultyModifiers,
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyModifiers {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyModifiers {
                enemy_health: 0.8,
                enemy_damage: 0.7,
                enemy_speed: 0.8,
                enemy_accuracy: 0.7,
                player_damage: 1.2,
            },
            normal: DifficultyModifiers {
                enemy_health: 1.0,
                enemy_damage: 1.0,
                enemy_speed: 1.0,
                enemy_accuracy: 1.0,
                player_damage: 1.0,
            },
            hard: DifficultyModifiers {
                enemy_health: 1.2,
                enemy_damage: 1.3,
                enemy_speed: 1.2,
                enemy_accuracy: 1.3,
                player_damage: 0.8,
            },
        }
    }
}

/// One pickup type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    /// Health, armor, rounds, grenades or score granted on pickup.
    pub value: f64,
    /// Visual scale; also widens the pickup radius.
    pub scale: f64,
    /// Relative likelihood in random spawns. Zero keeps the kind out of them.
    pub spawn_weight: f64,
}

impl ItemStats {
    /// Planar distance at which the player collects the item.
    pub fn pickup_radius(&self) -> f64 {
        0.5 * self.scale + 0.5
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTable {
    pub health_pack: ItemStats,
    pub armor_pack: ItemStats,
    pub ammo_pack: ItemStats,
    pub grenade_pack: ItemStats,
    pub intel: ItemStats,
    /// Seconds between periodic random spawns.
    pub spawn_interval_secs: f64,
}

impl ItemTable {
    pub fn get(&self, kind: ItemKind) -> &ItemStats {
        match kind {
            ItemKind::HealthPack => &self.health_pack,
            ItemKind::ArmorPack => &self.armor_pack,
            ItemKind::AmmoPack => &self.ammo_pack,
            ItemKind::GrenadePack => &self.grenade_pack,
            ItemKind::Intel => &self.intel,
        }
    }
}

impl Default for ItemTable {
    fn default() -> Self {
        Self {
            health_pack: ItemStats {
                value: 50.0,
                scale: 0.3,
                spawn_weight: 0.4,
            },
            armor_pack: ItemStats {
                value: 50.0,
                scale: 0.3,
                spawn_weight: 0.3,
            },
            ammo_pack: ItemStats {
                value: 30.0,
                scale: 0.3,
                spawn_weight: 0.5,
            },
            grenade_pack: ItemStats {
                value: 2.0,
                scale: 0.25,
                spawn_weight: 0.2,
            },
            intel: ItemStats {
                value: 500.0,
                scale: 0.2,
                spawn_weight: 0.0,
            },
            spawn_interval_secs: 30.0,
        }
    }
}

/// Periodic enemy spawning around the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub interval_secs: f64,
    /// Distance from the player at which enemies appear.
    pub distance: f64,
    /// Enemy pool capacity; the oldest enemy is evicted when exceeded.
    pub max_enemies: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2.0,
            distance: 30.0,
            max_enemies: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    pub survival: SurvivalConfig,
    pub mission: MissionConfig,
    pub time_challenge: TimeChallengeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    pub initial_enemies: u32,
    pub enemies_per_wave: u32,
    /// Pause between clearing a wave and the next one.
    pub wave_interval_secs: f64,
    /// Clearing this wave wins the game.
    pub max_waves: u32,
    /// A health pack spawns at the start of every n-th wave.
    pub health_pack_every: u32,
}

impl SurvivalConfig {
    /// Number of enemies in wave `wave` (1-based).
    pub fn wave_size(&self, wave: u32) -> u32 {
        self.initial_enemies + wave.saturating_sub(1) * self.enemies_per_wave
    }
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            initial_enemies: 5,
            enemies_per_wave: 2,
            wave_interval_secs: 30.0,
            max_waves: 10,
            health_pack_every: 3,
        }
    }
}

/// A mission goal: reach `count` of `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveSpec {
    pub kind: ObjectiveKind,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub time_limit_secs: f64,
    pub objectives: Vec<ObjectiveSpec>,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 300.0,
            objectives: vec![
                ObjectiveSpec {
                    kind: ObjectiveKind::Kill(EnemyKind::Regular),
                    count: 10,
                },
                ObjectiveSpec {
                    kind: ObjectiveKind::Kill(EnemyKind::Heavy),
                    count: 5,
                },
                ObjectiveSpec {
                    kind: ObjectiveKind::Kill(EnemyKind::Sniper),
                    count: 3,
                },
                ObjectiveSpec {
                    kind: ObjectiveKind::Collect(ItemKind::Intel),
                    count: 3,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeChallengeConfig {
    pub duration_secs: f64,
    pub target_score: u32,
}

impl Default for TimeChallengeConfig {
    fn default() -> Self {
        Self {
            duration_secs: 180.0,
            target_score: 2000,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("loaded game config from {}", path.display());
        Ok(config)
    }

    /// Check every table for values the simulation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world.size", self.world.size)?;

        positive("player.max_health", self.player.max_health)?;
        non_negative("player.max_armor", self.player.max_armor)?;
        if self.player.starting_armor < 0.0 || self.player.starting_armor > self.player.max_armor {
            return Err(ConfigError::invalid(
                "player.starting_armor",
                "must lie within [0, max_armor]",
            ));
        }
        if self.player.starting_grenades > self.player.max_grenades {
            return Err(ConfigError::invalid(
                "player.starting_grenades",
                "must not exceed max_grenades",
            ));
        }

        for kind in WeaponKind::ALL {
            let w = self.weapons.get(kind);
            let name = format!("weapons.{kind:?}");
            non_negative(&format!("{name}.damage"), w.damage)?;
            positive(&format!("{name}.fire_rate"), w.fire_rate)?;
            non_negative(&format!("{name}.spread"), w.spread)?;
            non_negative(&format!("{name}.reload_secs"), w.reload_secs)?;
            positive(&format!("{name}.range"), w.range)?;
            if w.magazine_size == 0 {
                return Err(ConfigError::invalid(
                    format!("{name}.magazine_size"),
                    "must be at least 1",
                ));
            }
            if w.pellets == 0 {
                return Err(ConfigError::invalid(
                    format!("{name}.pellets"),
                    "must be at least 1",
                ));
            }
        }

        non_negative("grenade.damage", self.grenade.damage)?;
        positive("grenade.radius", self.grenade.radius)?;
        non_negative("grenade.throw_force", self.grenade.throw_force)?;
        positive("grenade.fuse_secs", self.grenade.fuse_secs)?;

        for kind in EnemyKind::ALL {
            let e = self.enemies.get(kind);
            let name = format!("enemies.{kind:?}");
            positive(&format!("{name}.max_health"), e.max_health)?;
            non_negative(&format!("{name}.damage"), e.damage)?;
            positive(&format!("{name}.fire_rate"), e.fire_rate)?;
            non_negative(&format!("{name}.speed"), e.speed)?;
            if !(0.0..=1.0).contains(&e.accuracy) {
                return Err(ConfigError::invalid(
                    format!("{name}.accuracy"),
                    "must lie within [0, 1]",
                ));
            }
            positive(&format!("{name}.detection_range"), e.detection_range)?;
            positive(&format!("{name}.attack_range"), e.attack_range)?;
            if e.attack_range > e.detection_range {
                return Err(ConfigError::invalid(
                    format!("{name}.attack_range"),
                    "must not exceed detection_range",
                ));
            }
            non_negative(&format!("{name}.spawn_weight"), e.spawn_weight)?;
        }
        let enemy_weight: f64 = EnemyKind::ALL
            .iter()
            .map(|k| self.enemies.get(*k).spawn_weight)
            .sum();
        positive("enemies.spawn_weight (sum)", enemy_weight)?;

        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let d = self.difficulty.get(difficulty);
            let name = format!("difficulty.{difficulty:?}");
            positive(&format!("{name}.enemy_health"), d.enemy_health)?;
            non_negative(&format!("{name}.enemy_damage"), d.enemy_damage)?;
            non_negative(&format!("{name}.enemy_speed"), d.enemy_speed)?;
            non_negative(&format!("{name}.enemy_accuracy"), d.enemy_accuracy)?;
            non_negative(&format!("{name}.player_damage"), d.player_damage)?;
        }

        for kind in ItemKind::ALL {
            let i = self.items.get(kind);
            let name = format!("items.{kind:?}");
            non_negative(&format!("{name}.value"), i.value)?;
            positive(&format!("{name}.scale"), i.scale)?;
            non_negative(&format!("{name}.spawn_weight"), i.spawn_weight)?;
        }
        let item_weight: f64 = ItemKind::ALL
            .iter()
            .map(|k| self.items.get(*k).spawn_weight)
            .sum();
        positive("items.spawn_weight (sum)", item_weight)?;
        positive("items.spawn_interval_secs", self.items.spawn_interval_secs)?;

        positive("spawning.interval_secs", self.spawning.interval_secs)?;
        positive("spawning.distance", self.spawning.distance)?;
        if self.spawning.max_enemies == 0 {
            return Err(ConfigError::invalid(
                "spawning.max_enemies",
                "must be at least 1",
            ));
        }

        let survival = &self.modes.survival;
        if survival.initial_enemies == 0 {
            return Err(ConfigError::invalid(
                "modes.survival.initial_enemies",
                "must be at least 1",
            ));
        }
        if survival.max_waves == 0 {
            return Err(ConfigError::invalid(
                "modes.survival.max_waves",
                "must be at least 1",
            ));
        }
        if survival.health_pack_every == 0 {
            return Err(ConfigError::invalid(
                "modes.survival.health_pack_every",
                "must be at least 1",
            ));
        }
        non_negative(
            "modes.survival.wave_interval_secs",
            survival.wave_interval_secs,
        )?;

        positive("modes.mission.time_limit_secs", self.modes.mission.time_limit_secs)?;
        if self.modes.mission.objectives.is_empty() {
            return Err(ConfigError::invalid(
                "modes.mission.objectives",
                "must list at least one objective",
            ));
        }
        if self.modes.mission.objectives.iter().any(|o| o.count == 0) {
            return Err(ConfigError::invalid(
                "modes.mission.objectives",
                "every objective count must be at least 1",
            ));
        }

        positive(
            "modes.time_challenge.duration_secs",
            self.modes.time_challenge.duration_secs,
        )?;

        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be non-negative, got {value}"),
        ))
    }
}
