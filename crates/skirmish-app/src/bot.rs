//! Turret bot: a scripted player that stands still, turns toward the
//! nearest living enemy and shoots. Drives the headless runner.

use glam::DVec3;

use skirmish_core::commands::{PlayerCommand, PlayerInput};
use skirmish_core::constants::PLAYER_EYE_HEIGHT;
use skirmish_core::enums::{GamePhase, WeaponKind};
use skirmish_core::state::{EnemyView, GameStateSnapshot};

/// Height above an enemy's feet the bot aims at.
const AIM_HEIGHT: f64 = 1.2;

/// Enemies closer than this are grenade targets.
const GRENADE_RANGE: f64 = 15.0;

/// Crowd size that earns a grenade.
const GRENADE_CROWD: usize = 3;

/// Seconds between grenade throws.
const GRENADE_COOLDOWN_SECS: f64 = 5.0;

/// Yaw change per step while no enemy is alive.
const SCAN_RATE: f64 = 0.02;

/// What the bot does this step.
#[derive(Debug, Clone)]
pub struct BotAction {
    pub input: PlayerInput,
    pub commands: Vec<PlayerCommand>,
}

#[derive(Debug, Clone)]
pub struct TurretBot {
    position: DVec3,
    yaw: f64,
    pitch: f64,
    last_grenade_secs: Option<f64>,
}

impl TurretBot {
    /// A bot standing with its feet at `feet`.
    pub fn new(feet: DVec3) -> Self {
        Self {
            position: feet + DVec3::new(0.0, PLAYER_EYE_HEIGHT, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            last_grenade_secs: None,
        }
    }

    /// Current input without acting.
    pub fn input(&self) -> PlayerInput {
        PlayerInput::new(self.position, self.yaw, self.pitch)
    }

    /// Decide the next input and commands from the latest snapshot.
    pub fn step(&mut self, snapshot: &GameStateSnapshot) -> BotAction {
        let mut commands = Vec::new();
        if snapshot.phase != GamePhase::Playing || !snapshot.player.alive {
            return BotAction {
                input: self.input(),
                commands,
            };
        }

        match nearest_enemy(self.position, &snapshot.enemies) {
            Some(target) => {
                let aim = target.position + DVec3::new(0.0, AIM_HEIGHT, 0.0) - self.position;
                self.yaw = aim.x.atan2(aim.z);
                self.pitch = aim.y.atan2(aim.x.hypot(aim.z));

                let weapon = &snapshot.player.weapon;
                if weapon.ammo > 0 && !weapon.reloading {
                    commands.push(PlayerCommand::Fire);
                } else if weapon.ammo == 0 && weapon.reserve > 0 && !weapon.reloading {
                    commands.push(PlayerCommand::Reload);
                } else if weapon.ammo == 0 && weapon.reserve == 0 {
                    commands.push(PlayerCommand::SelectWeapon {
                        weapon: next_weapon(weapon.kind),
                    });
                }

                if self.should_throw(snapshot) {
                    self.last_grenade_secs = Some(snapshot.time.elapsed_secs);
                    commands.push(PlayerCommand::ThrowGrenade);
                }
            }
            None => {
                self.yaw = (self.yaw + SCAN_RATE) % std::f64::consts::TAU;
                self.pitch = 0.0;
            }
        }

        BotAction {
            input: self.input(),
            commands,
        }
    }

    fn should_throw(&self, snapshot: &GameStateSnapshot) -> bool {
        if snapshot.player.grenades == 0 {
            return false;
        }
        let ready = self
            .last_grenade_secs
            .map_or(true, |at| snapshot.time.elapsed_secs - at >= GRENADE_COOLDOWN_SECS);
        let crowd = snapshot
            .enemies
            .iter()
            .filter(|e| e.alive && planar(e.position, self.position) < GRENADE_RANGE)
            .count();
        ready && crowd >= GRENADE_CROWD
    }
}

fn planar(a: DVec3, b: DVec3) -> f64 {
    (a.x - b.x).hypot(a.z - b.z)
}

fn nearest_enemy(from: DVec3, enemies: &[EnemyView]) -> Option<&EnemyView> {
    enemies
        .iter()
        .filter(|e| e.alive)
        .min_by(|a, b| planar(a.position, from).total_cmp(&planar(b.position, from)))
}

fn next_weapon(kind: WeaponKind) -> WeaponKind {
    let all = WeaponKind::ALL;
    let index = all.iter().position(|&k| k == kind).unwrap_or(0);
    all[(index + 1) % all.len()]
}
