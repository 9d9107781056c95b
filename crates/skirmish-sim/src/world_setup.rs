//! Arena construction: scattered crates and freestanding walls.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::config::WorldConfig;
use skirmish_core::types::Obstacle;

/// Crates are 2×2×2 and scattered over 90% of the arena.
const CRATE_SIZE: f64 = 2.0;
const CRATE_SPREAD: f64 = 0.9;

/// Walls are 10 long, 4 high, 1 thick, and kept within 75% of the arena.
const WALL_LENGTH: f64 = 10.0;
const WALL_HEIGHT: f64 = 4.0;
const WALL_THICKNESS: f64 = 1.0;
const WALL_SPREAD: f64 = 0.75;

/// Generate the static obstacles for a new game.
pub fn generate_obstacles(rng: &mut ChaCha8Rng, config: &WorldConfig) -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity((config.box_count + config.wall_count) as usize);

    for _ in 0..config.box_count {
        let (x, z) = scatter(rng, config.size * CRATE_SPREAD);
        obstacles.push(Obstacle::ground_box(x, z, CRATE_SIZE, CRATE_SIZE, CRATE_SIZE));
    }

    for _ in 0..config.wall_count {
        let (x, z) = scatter(rng, config.size * WALL_SPREAD);
        // Walls run along either axis.
        let wall = if rng.gen_bool(0.5) {
            Obstacle::ground_box(x, z, WALL_LENGTH, WALL_HEIGHT, WALL_THICKNESS)
        } else {
            Obstacle::ground_box(x, z, WALL_THICKNESS, WALL_HEIGHT, WALL_LENGTH)
        };
        obstacles.push(wall);
    }

    log::debug!("arena built with {} obstacles", obstacles.len());
    obstacles
}

fn scatter(rng: &mut ChaCha8Rng, extent: f64) -> (f64, f64) {
    let x = rng.gen_range(-1.0..=1.0) * extent;
    let z = rng.gen_range(-1.0..=1.0) * extent;
    (x, z)
}

