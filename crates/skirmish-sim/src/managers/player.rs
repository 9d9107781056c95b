//! The player as seen by the simulation: transform from input, health,
//! armor, grenades and weapons.

use glam::DVec3;

use skirmish_core::commands::PlayerInput;
use skirmish_core::config::GameConfig;
use skirmish_core::constants::{PLAYER_EYE_HEIGHT, PLAYER_MUZZLE_DROP, PLAYER_WORLD_MARGIN};
use skirmish_core::state::PlayerView;
use skirmish_core::types::{DamageOutcome, Health, WorldBounds};

use super::arsenal::Arsenal;

#[derive(Debug, Clone)]
pub struct Player {
    /// Latest transform from the host.
    pub input: PlayerInput,
    pub health: Health,
    pub armor: f64,
    pub max_armor: f64,
    pub grenades: u32,
    pub max_grenades: u32,
    pub arsenal: Arsenal,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let player = &config.player;
        Self {
            input: PlayerInput::new(DVec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0), 0.0, 0.0),
            health: Health::new(player.max_health),
            armor: player.starting_armor.clamp(0.0, player.max_armor),
            max_armor: player.max_armor,
            grenades: player.starting_grenades.min(player.max_grenades),
            max_grenades: player.max_grenades,
            arsenal: Arsenal::new(&config.weapons),
        }
    }

    pub fn alive(&self) -> bool {
        self.health.alive
    }

    /// Eye position.
    pub fn eye(&self) -> DVec3 {
        self.input.position
    }

    /// Where shots and grenades leave from.
    pub fn muzzle(&self) -> DVec3 {
        self.eye() - DVec3::new(0.0, PLAYER_MUZZLE_DROP, 0.0)
    }

    pub fn aim(&self) -> DVec3 {
        self.input.aim_direction()
    }

    /// Take the host's transform, kept inside the arena and above the floor.
    pub fn apply_input(&mut self, input: PlayerInput, bounds: &WorldBounds) {
        if !input.position.is_finite() {
            return;
        }
        let mut position = bounds.clamp_point(input.position, PLAYER_WORLD_MARGIN);
        position.y = position.y.max(PLAYER_EYE_HEIGHT);
        self.input = PlayerInput {
            position,
            yaw: if input.yaw.is_finite() { input.yaw } else { 0.0 },
            pitch: if input.pitch.is_finite() { input.pitch } else { 0.0 },
        };
    }

    /// Armor soaks damage first; the remainder comes off health.
    pub fn take_damage(&mut self, amount: f64) -> DamageOutcome {
        if !self.alive() {
            return DamageOutcome {
                applied: 0.0,
                killed: false,
            };
        }
        let amount = amount.max(0.0);
        let absorbed = amount.min(self.armor);
        self.armor -= absorbed;
        self.health.take_damage(amount - absorbed)
    }

    pub fn heal(&mut self, amount: f64) -> f64 {
        self.health.heal(amount)
    }

    /// Returns the armor actually added.
    pub fn add_armor(&mut self, amount: f64) -> f64 {
        let before = self.armor;
        self.armor = (self.armor + amount.max(0.0)).min(self.max_armor);
        self.armor - before
    }

    /// Returns the grenades actually added.
    pub fn add_grenades(&mut self, count: u32) -> u32 {
        let accepted = count.min(self.max_grenades.saturating_sub(self.grenades));
        self.grenades += accepted;
        accepted
    }

    /// Take one grenade off the belt, if any are left.
    pub fn take_grenade(&mut self) -> bool {
        if self.grenades == 0 {
            return false;
        }
        self.grenades -= 1;
        true
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            position: self.input.position,
            yaw: self.input.yaw,
            health: self.health.current,
            max_health: self.health.max,
            armor: self.armor,
            max_armor: self.max_armor,
            grenades: self.grenades,
            alive: self.alive(),
            weapon: self.arsenal.view(),
        }
    }
}
