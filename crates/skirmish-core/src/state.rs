//! Game state snapshot: the complete visible state handed to the host each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Set once the game has ended.
    pub outcome: Option<GameOutcome>,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub grenades: Vec<GrenadeView>,
    pub items: Vec<ItemView>,
    pub score: ScoreView,
    pub mode_status: Option<ModeStatus>,
    /// Events raised since the previous snapshot.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec3,
    pub yaw: f64,
    pub health: f64,
    pub max_health: f64,
    pub armor: f64,
    pub max_armor: f64,
    pub grenades: u32,
    pub alive: bool,
    pub weapon: WeaponView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    /// Rounds in the magazine.
    pub ammo: u32,
    /// Rounds in reserve.
    pub reserve: u32,
    pub magazine_size: u32,
    pub reloading: bool,
    /// Seconds left on the current reload (0 when not reloading).
    pub reload_remaining_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub position: DVec3,
    pub yaw: f64,
    pub health: f64,
    pub max_health: f64,
    pub alive: bool,
    pub state: AiState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub id: u32,
    pub position: DVec3,
    pub direction: DVec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrenadeView {
    pub id: u32,
    pub position: DVec3,
    pub fuse_remaining_secs: f64,
    pub exploded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub id: u32,
    pub kind: ItemKind,
    /// Animated position (includes the float offset).
    pub position: DVec3,
    /// Spin angle in radians.
    pub rotation: f64,
}

/// Running statistics for the HUD and the end screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub kills: u32,
    pub headshots: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    /// shots_hit / shots_fired, 0 before the first shot.
    pub accuracy: f64,
    pub time_played_secs: f64,
}

/// Mode-specific progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum ModeStatus {
    Survival {
        wave: u32,
        enemies_remaining: u32,
        /// Countdown to the next wave once the current one is cleared.
        next_wave_in_secs: Option<f64>,
    },
    Mission {
        time_remaining_secs: f64,
        objectives: Vec<ObjectiveView>,
    },
    TimeChallenge {
        time_remaining_secs: f64,
        target_score: u32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub kind: ObjectiveKind,
    pub target: u32,
    pub progress: u32,
    pub completed: bool,
}
