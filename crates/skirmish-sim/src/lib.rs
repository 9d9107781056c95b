//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs world of enemies, the player and the projectile and item
//! pools, runs the systems once per tick and produces GameStateSnapshots for
//! the host.

pub mod engine;
pub mod game_state;
pub mod managers;
pub mod systems;
pub mod world_setup;

pub use skirmish_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
