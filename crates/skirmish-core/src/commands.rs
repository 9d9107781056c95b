//! Player input and commands sent from the host to the simulation.
//!
//! Continuous state (where the player stands and looks) arrives every tick
//! as [`PlayerInput`]. Discrete actions are queued as [`PlayerCommand`]s and
//! processed at the next tick boundary.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Player transform sampled by the host once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Eye position.
    pub position: DVec3,
    /// Look yaw in radians. 0 faces +z.
    pub yaw: f64,
    /// Look pitch in radians. Positive looks up.
    pub pitch: f64,
}

impl PlayerInput {
    pub fn new(position: DVec3, yaw: f64, pitch: f64) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Unit view direction.
    pub fn aim_direction(&self) -> DVec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        DVec3::new(
            self.yaw.sin() * cos_pitch,
            sin_pitch,
            self.yaw.cos() * cos_pitch,
        )
    }
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Game flow ---
    /// Start a new game from the menu or the game-over screen.
    StartGame {
        mode: GameMode,
        difficulty: Difficulty,
    },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Start over with the current mode and difficulty.
    Restart,
    /// Abandon the current game and return to the menu.
    ReturnToMenu,

    // --- Weapons ---
    /// Switch to another weapon.
    SelectWeapon { weapon: WeaponKind },
    /// Reload the current weapon.
    Reload,
    /// Pull the trigger once.
    Fire,
    /// Throw a frag grenade along the view direction.
    ThrowGrenade,
}
