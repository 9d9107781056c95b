//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Idle,
    Patrol,
    Chase,
    Attack,
    Search,
    Retreat,
    TakeCover,
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Balanced rifleman.
    #[default]
    Regular,
    /// Slow, durable, hard-hitting.
    Heavy,
    /// Long sight line, high accuracy, fragile.
    Sniper,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Regular, EnemyKind::Heavy, EnemyKind::Sniper];
}

/// Player weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Pistol,
    Rifle,
    Shotgun,
    Sniper,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Pistol,
        WeaponKind::Rifle,
        WeaponKind::Shotgun,
        WeaponKind::Sniper,
    ];

    /// Sound played when this weapon fires.
    pub fn shot_sound(self) -> SoundKind {
        match self {
            WeaponKind::Pistol => SoundKind::PistolShot,
            WeaponKind::Rifle => SoundKind::RifleShot,
            WeaponKind::Shotgun => SoundKind::ShotgunShot,
            WeaponKind::Sniper => SoundKind::SniperShot,
        }
    }
}

/// Pickup type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealthPack,
    ArmorPack,
    AmmoPack,
    GrenadePack,
    Intel,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::HealthPack,
        ItemKind::ArmorPack,
        ItemKind::AmmoPack,
        ItemKind::GrenadePack,
        ItemKind::Intel,
    ];
}

/// Difficulty preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Game mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Endless escalating waves.
    #[default]
    Survival,
    /// Objective list under a time limit.
    Mission,
    /// Reach a target score before the clock runs out.
    TimeChallenge,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Victory,
    Defeat,
}

/// Mission objective target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "target")]
pub enum ObjectiveKind {
    Kill(EnemyKind),
    Collect(ItemKind),
}

/// Entity categories known to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Enemy(EnemyKind),
    Bullet,
    Grenade,
    Item(ItemKind),
}

/// Sound cues for the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundKind {
    PistolShot,
    RifleShot,
    ShotgunShot,
    SniperShot,
    Empty,
    Reload,
    WeaponSwitch,
    Hit,
    EnemyShot,
    EnemyDeath,
    PlayerHit,
    PlayerDeath,
    GrenadeThrow,
    Explosion,
    ItemPickup,
}
