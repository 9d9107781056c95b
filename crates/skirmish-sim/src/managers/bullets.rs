//! Bullet pool: straight-line projectiles with a fixed lifetime.

use std::collections::VecDeque;

use glam::DVec3;

use skirmish_core::constants::{BULLET_LIFETIME_SECS, BULLET_SPEED, MAX_BULLETS};
use skirmish_core::state::BulletView;
use skirmish_core::types::{timer_reached, WorldBounds};

#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub position: DVec3,
    /// Unit direction of travel.
    pub direction: DVec3,
    pub damage: f64,
    /// Seconds since the bullet was fired.
    pub age: f64,
    pub active: bool,
}

/// Live bullets in firing order.
#[derive(Debug, Clone)]
pub struct BulletPool {
    bullets: VecDeque<Bullet>,
    capacity: usize,
    next_id: u32,
}

impl Default for BulletPool {
    fn default() -> Self {
        Self::with_capacity(MAX_BULLETS)
    }
}

impl BulletPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bullets: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// Fire a bullet. The oldest bullet is dropped when the pool is full.
    pub fn spawn(&mut self, origin: DVec3, direction: DVec3, damage: f64) -> u32 {
        while self.bullets.len() >= self.capacity {
            self.bullets.pop_front();
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.bullets.push_back(Bullet {
            id,
            position: origin,
            direction: direction.normalize_or_zero(),
            damage,
            age: 0.0,
            active: true,
        });
        id
    }

    /// Age and move every bullet, then drop expired or escaped ones.
    pub fn update(&mut self, dt: f64, bounds: &WorldBounds) {
        for bullet in self.bullets.iter_mut() {
            bullet.age += dt;
            if timer_reached(bullet.age, BULLET_LIFETIME_SECS) {
                bullet.active = false;
                continue;
            }
            bullet.position += bullet.direction * BULLET_SPEED * dt;
            if !bounds.contains(bullet.position) {
                bullet.active = false;
            }
        }
        self.retain_active();
    }

    /// Drop bullets deactivated by hits.
    pub fn retain_active(&mut self) {
        self.bullets.retain(|b| b.active);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bullet> {
        self.bullets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
    }

    pub fn views(&self) -> Vec<BulletView> {
        self.bullets
            .iter()
            .map(|b| BulletView {
                id: b.id,
                position: b.position,
                direction: b.direction,
            })
            .collect()
    }
}
