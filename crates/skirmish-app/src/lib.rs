//! SKIRMISH host application.
//!
//! Wires the simulation engine to its collaborators: the host bridge that
//! feeds a renderer, audio and HUD, the fixed-rate game loop thread, a
//! scripted turret bot used by the headless runner, and logger setup.

pub mod bot;
pub mod game_loop;
pub mod host;
pub mod logging;

pub use skirmish_core as core;
