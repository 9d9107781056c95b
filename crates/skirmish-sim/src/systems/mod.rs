//! Systems that run over the simulation state each tick.
//!
//! Systems are free functions over the ECS world and the engine's pools.
//! They do not own state; all state lives in components and pools.

pub mod collision;
pub mod enemy_ai;
pub mod snapshot;
pub mod spawner;
