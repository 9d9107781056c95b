//! Events emitted by the simulation for audio, HUD and effects.
//!
//! Events are queued during a tick and drained into the snapshot.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A sound cue for the audio collaborator.
    Sound { sound: SoundKind, position: DVec3 },
    /// Score changed by `delta` to `total`.
    ScoreChanged { delta: i64, total: u64 },
    /// An enemy entered the arena.
    EnemySpawned {
        enemy_id: u32,
        kind: EnemyKind,
        position: DVec3,
    },
    /// A player shot landed on an enemy.
    EnemyHit {
        enemy_id: u32,
        damage: f64,
        headshot: bool,
    },
    /// An enemy died.
    EnemyKilled {
        enemy_id: u32,
        kind: EnemyKind,
        headshot: bool,
        score: u32,
    },
    /// The player took damage. `direction` points from the player to the source.
    PlayerDamaged { amount: f64, direction: DVec3 },
    /// A grenade detonated.
    Explosion {
        position: DVec3,
        radius: f64,
        kills: u32,
    },
    /// The player picked something up.
    ItemCollected { kind: ItemKind, value: f64 },
    /// A mission objective advanced.
    ObjectiveProgress {
        kind: ObjectiveKind,
        target: u32,
        count: u32,
    },
    /// A mission objective reached its target.
    ObjectiveCompleted { kind: ObjectiveKind },
    /// A survival wave began.
    WaveStarted { wave: u32, enemy_count: u32 },
    /// A survival wave was cleared.
    WaveCompleted { wave: u32 },
    /// The game ended.
    GameOver { outcome: GameOutcome, score: u64 },
}
