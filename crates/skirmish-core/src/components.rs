//! ECS components for hecs enemy entities.
//!
//! Components are plain data structs. Game logic lives in the AI crate and
//! in the simulation managers, not here.

use serde::{Deserialize, Serialize};

use crate::config::EnemyStats;
use crate::enums::*;

/// Identity of an enemy entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable id reported in events and snapshots.
    pub id: u32,
    pub kind: EnemyKind,
}

/// Monotonic spawn sequence number; the smallest is evicted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// Difficulty-scaled stats this enemy was spawned with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStats(pub EnemyStats);

/// Countdown until a dead enemy is removed from the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeathTimer {
    pub remaining_secs: f64,
}
