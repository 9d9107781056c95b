//! Entity pools owned by the engine.
//!
//! Enemies live in the hecs world and are handled by free functions in
//! [`enemies`]; the short-lived projectiles and pickups are plain bounded
//! pools that evict their oldest entry when full.

pub mod arsenal;
pub mod bullets;
pub mod enemies;
pub mod grenades;
pub mod items;
pub mod player;
