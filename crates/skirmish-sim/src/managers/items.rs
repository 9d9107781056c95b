//! Item pool: floating pickups, periodic random drops, and pickup tests.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;

use skirmish_core::config::ItemTable;
use skirmish_core::constants::*;
use skirmish_core::enums::ItemKind;
use skirmish_core::state::ItemView;
use skirmish_core::types::{timer_reached, WorldBounds};
use skirmish_spatial::planar_distance;

#[derive(Debug, Clone)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    /// Resting position; the float offset is applied on top.
    pub base: DVec3,
    /// Float animation phase in radians.
    pub float_phase: f64,
    /// Spin angle in radians.
    pub rotation: f64,
    pub active: bool,
}

impl Item {
    /// Current animated position.
    pub fn position(&self) -> DVec3 {
        self.base + DVec3::new(0.0, self.float_phase.sin() * ITEM_FLOAT_HEIGHT, 0.0)
    }
}

#[derive(Debug, Clone)]
pub struct ItemPool {
    items: VecDeque<Item>,
    capacity: usize,
    next_id: u32,
    spawn_timer: f64,
}

impl Default for ItemPool {
    fn default() -> Self {
        Self::with_capacity(MAX_ITEMS)
    }
}

impl ItemPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 1,
            spawn_timer: 0.0,
        }
    }

    /// Place an item. The oldest item is removed when the pool is full.
    pub fn spawn(&mut self, kind: ItemKind, position: DVec3) -> u32 {
        while self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push_back(Item {
            id,
            kind,
            base: position,
            float_phase: 0.0,
            rotation: 0.0,
            active: true,
        });
        id
    }

    /// Place an item of `kind` at a random spot on the arena floor.
    pub fn spawn_at_random<R: Rng + ?Sized>(&mut self, rng: &mut R, kind: ItemKind, bounds: &WorldBounds) -> u32 {
        let position = random_position(rng, bounds);
        self.spawn(kind, position)
    }

    /// Place a randomly chosen item at a random spot. Returns `None` when
    /// no item kind has a spawn weight.
    pub fn spawn_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        table: &ItemTable,
        bounds: &WorldBounds,
    ) -> Option<u32> {
        let kind = pick_kind(rng, table)?;
        Some(self.spawn_at_random(rng, kind, bounds))
    }

    /// Animate items and run the periodic random drop.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R, table: &ItemTable, bounds: &WorldBounds) {
        for item in self.items.iter_mut() {
            item.float_phase = (item.float_phase + ITEM_FLOAT_SPEED * dt) % TAU;
            item.rotation = (item.rotation + ITEM_SPIN_SPEED * dt) % TAU;
        }

        self.spawn_timer += dt;
        if timer_reached(self.spawn_timer, table.spawn_interval_secs) {
            self.spawn_timer = 0.0;
            if let Some(id) = self.spawn_random(rng, table, bounds) {
                log::debug!("periodic item drop {id}");
            }
        }
    }

    /// Deactivate and return every item within pickup reach of `player`.
    pub fn collect_near(&mut self, player: DVec3, table: &ItemTable) -> Vec<Item> {
        let mut collected = Vec::new();
        for item in self.items.iter_mut() {
            if !item.active {
                continue;
            }
            let reach = table.get(item.kind).pickup_radius();
            if planar_distance(item.base, player) < reach {
                item.active = false;
                collected.push(item.clone());
            }
        }
        self.items.retain(|i| i.active);
        collected
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.spawn_timer = 0.0;
    }

    pub fn views(&self) -> Vec<ItemView> {
        self.items
            .iter()
            .map(|i| ItemView {
                id: i.id,
                kind: i.kind,
                position: i.position(),
                rotation: i.rotation,
            })
            .collect()
    }
}

/// Uniform spot on the floor, kept off the arena walls.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, bounds: &WorldBounds) -> DVec3 {
    let extent = (bounds.size - ITEM_WORLD_MARGIN).max(0.0);
    let x = rng.gen_range(-1.0..=1.0) * extent;
    let z = rng.gen_range(-1.0..=1.0) * extent;
    DVec3::new(x, ITEM_REST_HEIGHT, z)
}

/// Weighted choice over item kinds. Weights are normalized, so they need
/// not sum to one.
pub fn pick_kind<R: Rng + ?Sized>(rng: &mut R, table: &ItemTable) -> Option<ItemKind> {
    let total: f64 = ItemKind::ALL
        .iter()
        .map(|&kind| table.get(kind).spawn_weight.max(0.0))
        .sum();
    if total <= 0.0 {
        return None;
    }
    let mut roll = rng.gen::<f64>() * total;
    let mut last = None;
    for &kind in &ItemKind::ALL {
        let weight = table.get(kind).spawn_weight.max(0.0);
        if weight <= 0.0 {
            continue;
        }
        if roll < weight {
            return Some(kind);
        }
        roll -= weight;
        last = Some(kind);
    }
    last
}
