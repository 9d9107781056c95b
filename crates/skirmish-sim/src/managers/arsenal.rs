//! Player weapons: magazines, reserve ammo, fire cadence and reloads.

use glam::DVec3;
use rand::Rng;

use skirmish_core::config::{WeaponStats, WeaponTable};
use skirmish_core::constants::TIMER_EPSILON;
use skirmish_core::enums::WeaponKind;
use skirmish_core::state::WeaponView;

/// One round or pellet leaving the barrel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// Unit direction after spread.
    pub direction: DVec3,
    pub damage: f64,
}

/// Outcome of pulling the trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// The weapon fired these projectiles.
    Fired(Vec<Shot>),
    /// The magazine is empty.
    Empty,
    /// Still cycling or reloading.
    NotReady,
}

/// Runtime state of a single weapon.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub stats: WeaponStats,
    /// Rounds in the magazine.
    pub ammo: u32,
    /// Rounds in reserve, capped at `stats.max_ammo`.
    pub reserve: u32,
    /// Seconds until the next shot is allowed.
    pub cooldown: f64,
    /// Seconds left on an active reload.
    pub reload_remaining: Option<f64>,
}

impl Weapon {
    pub fn new(kind: WeaponKind, stats: WeaponStats) -> Self {
        Self {
            kind,
            stats,
            ammo: stats.magazine_size,
            reserve: stats.max_ammo,
            cooldown: 0.0,
            reload_remaining: None,
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_remaining.is_some()
    }

    fn update(&mut self, dt: f64) {
        self.cooldown = (self.cooldown - dt).max(0.0);

        let finished = match self.reload_remaining.as_mut() {
            Some(remaining) => {
                *remaining -= dt;
                *remaining <= TIMER_EPSILON
            }
            None => false,
        };
        if finished {
            self.reload_remaining = None;
            let moved = (self.stats.magazine_size - self.ammo).min(self.reserve);
            self.ammo += moved;
            self.reserve -= moved;
        }
    }

    fn start_reload(&mut self) -> bool {
        if self.is_reloading() || self.ammo >= self.stats.magazine_size || self.reserve == 0 {
            return false;
        }
        self.reload_remaining = Some(self.stats.reload_secs);
        true
    }

    fn pull_trigger<R: Rng + ?Sized>(&mut self, rng: &mut R, aim: DVec3, damage_scale: f64) -> Trigger {
        if self.is_reloading() {
            return Trigger::NotReady;
        }
        if self.ammo == 0 {
            return Trigger::Empty;
        }
        if self.cooldown > TIMER_EPSILON {
            return Trigger::NotReady;
        }

        self.ammo -= 1;
        self.cooldown = 1.0 / self.stats.fire_rate;

        let spread = self.stats.spread;
        let damage = self.stats.damage * damage_scale;
        let base = jitter(rng, aim, spread);
        let shots = if self.stats.pellets > 1 {
            (0..self.stats.pellets)
                .map(|_| Shot {
                    direction: jitter(rng, base, spread * 2.0),
                    damage,
                })
                .collect()
        } else {
            vec![Shot {
                direction: base,
                damage,
            }]
        };
        Trigger::Fired(shots)
    }

    pub fn view(&self) -> WeaponView {
        WeaponView {
            kind: self.kind,
            ammo: self.ammo,
            reserve: self.reserve,
            magazine_size: self.stats.magazine_size,
            reloading: self.is_reloading(),
            reload_remaining_secs: self.reload_remaining.unwrap_or(0.0).max(0.0),
        }
    }
}

/// Perturb each axis of `direction` by up to ±amount/2 and renormalize.
fn jitter<R: Rng + ?Sized>(rng: &mut R, direction: DVec3, amount: f64) -> DVec3 {
    let offset = DVec3::new(
        (rng.gen::<f64>() - 0.5) * amount,
        (rng.gen::<f64>() - 0.5) * amount,
        (rng.gen::<f64>() - 0.5) * amount,
    );
    (direction + offset).try_normalize().unwrap_or(direction)
}

/// Every weapon the player carries, with one held at a time.
#[derive(Debug, Clone)]
pub struct Arsenal {
    weapons: Vec<Weapon>,
    current: usize,
}

impl Arsenal {
    /// Full loadout with the pistol drawn.
    pub fn new(table: &WeaponTable) -> Self {
        Self {
            weapons: WeaponKind::ALL
                .iter()
                .map(|&kind| Weapon::new(kind, *table.get(kind)))
                .collect(),
            current: 0,
        }
    }

    pub fn current(&self) -> &Weapon {
        &self.weapons[self.current]
    }

    pub fn weapon(&self, kind: WeaponKind) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.kind == kind)
    }

    /// Draw another weapon. Cancels a reload in progress.
    /// Returns false when `kind` is already held.
    pub fn select(&mut self, kind: WeaponKind) -> bool {
        let Some(index) = self.weapons.iter().position(|w| w.kind == kind) else {
            return false;
        };
        if index == self.current {
            return false;
        }
        self.weapons[self.current].reload_remaining = None;
        self.current = index;
        true
    }

    /// Advance cooldown and reload of the held weapon.
    pub fn update(&mut self, dt: f64) {
        self.weapons[self.current].update(dt);
    }

    /// Begin reloading the held weapon. False if it is full, already
    /// reloading, or out of reserve ammo.
    pub fn start_reload(&mut self) -> bool {
        self.weapons[self.current].start_reload()
    }

    pub fn pull_trigger<R: Rng + ?Sized>(&mut self, rng: &mut R, aim: DVec3, damage_scale: f64) -> Trigger {
        self.weapons[self.current].pull_trigger(rng, aim, damage_scale)
    }

    /// Add reserve ammo to the held weapon. Returns the rounds accepted.
    pub fn add_reserve(&mut self, rounds: u32) -> u32 {
        let weapon = &mut self.weapons[self.current];
        let accepted = rounds.min(weapon.stats.max_ammo.saturating_sub(weapon.reserve));
        weapon.reserve += accepted;
        accepted
    }

    pub fn view(&self) -> WeaponView {
        self.current().view()
    }
}
