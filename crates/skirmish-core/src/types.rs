//! Fundamental geometric and simulation types.
//!
//! Coordinates follow the arena convention: x = East, z = South, y = Up.
//! The ground plane is y = 0 and yaw 0 faces +z.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::TIMER_EPSILON;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// True once an accumulated timer has reached `duration`.
///
/// Accumulating a frame delta such as 1/60 s drifts below the exact sum,
/// so the comparison tolerates [`TIMER_EPSILON`].
pub fn timer_reached(accumulated: f64, duration: f64) -> bool {
    accumulated + TIMER_EPSILON >= duration
}

/// Position and facing of a ground-bound actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    /// Facing yaw in radians. 0 faces +z, positive turns toward +x.
    pub yaw: f64,
}

impl Pose {
    pub fn new(position: DVec3, yaw: f64) -> Self {
        Self { position, yaw }
    }

    /// Unit forward vector on the ground plane.
    pub fn forward(&self) -> DVec3 {
        DVec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }
}

/// Axis-aligned static obstacle used for occlusion and cover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub center: DVec3,
    pub half_extents: DVec3,
}

impl Obstacle {
    pub fn new(center: DVec3, half_extents: DVec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// A ground-standing box of the given full size centred at (x, z).
    pub fn ground_box(x: f64, z: f64, width: f64, height: f64, depth: f64) -> Self {
        Self::new(
            DVec3::new(x, height * 0.5, z),
            DVec3::new(width * 0.5, height * 0.5, depth * 0.5),
        )
    }

    pub fn min(&self) -> DVec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> DVec3 {
        self.center + self.half_extents
    }

    /// Largest horizontal half-extent (cover stand-off is measured from it).
    pub fn planar_extent(&self) -> f64 {
        self.half_extents.x.max(self.half_extents.z)
    }
}

/// The square arena: x and z both lie within `[-size, size]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub size: f64,
}

impl WorldBounds {
    pub fn new(size: f64) -> Self {
        Self { size: size.abs() }
    }

    /// Clamp planar coordinates into `[-size + margin, size - margin]`.
    pub fn clamp_planar(&self, x: f64, z: f64, margin: f64) -> (f64, f64) {
        let limit = (self.size - margin).max(0.0);
        (x.clamp(-limit, limit), z.clamp(-limit, limit))
    }

    /// Clamp a point's x/z into the arena, keeping its height.
    pub fn clamp_point(&self, point: DVec3, margin: f64) -> DVec3 {
        let (x, z) = self.clamp_planar(point.x, point.z, margin);
        DVec3::new(x, point.y, z)
    }

    /// Whether x/z lie inside the arena (edges inclusive).
    pub fn contains_planar(&self, point: DVec3) -> bool {
        point.x.abs() <= self.size && point.z.abs() <= self.size
    }

    /// Whether a point lies inside the arena volume, from the ground up to `size`.
    pub fn contains(&self, point: DVec3) -> bool {
        self.contains_planar(point) && point.y >= 0.0 && point.y <= self.size
    }
}

/// Hit points of an actor.
///
/// Health never drops below zero and never exceeds `max`. Reaching zero
/// flips `alive` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
    pub alive: bool,
}

/// Result of applying damage to a [`Health`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// Health actually removed.
    pub applied: f64,
    /// True only on the call that brought the actor to zero.
    pub killed: bool,
}

impl Health {
    pub fn new(max: f64) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            alive: max > 0.0,
        }
    }

    /// Subtract `amount` (negative amounts are treated as zero).
    /// Damage to a dead actor is a no-op that reports "not killed".
    pub fn take_damage(&mut self, amount: f64) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome {
                applied: 0.0,
                killed: false,
            };
        }
        let amount = amount.max(0.0);
        let before = self.current;
        self.current = (self.current - amount).max(0.0);
        let killed = self.current <= 0.0;
        if killed {
            self.alive = false;
        }
        DamageOutcome {
            applied: before - self.current,
            killed,
        }
    }

    /// Restore up to `amount` health. Returns the amount restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if !self.alive {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - before
    }

    /// Current health as a fraction of max (0 when max is 0).
    pub fn fraction(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}
