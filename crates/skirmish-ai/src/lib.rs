//! Enemy AI for SKIRMISH.
//!
//! Implements the enemy behavior state machine, ground steering, and the
//! tactical goal generators (patrol loops, search points, cover, retreat).

pub mod brain;
pub mod steering;
pub mod tactics;

pub use skirmish_core as core;

pub use brain::{update, AiContext, AiUpdate, EnemyBrain, LastSeen};
