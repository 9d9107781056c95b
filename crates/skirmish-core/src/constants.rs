//! Simulation constants and tuning parameters.
//!
//! Per-kind numbers (weapons, enemies, items, difficulty) live in
//! [`crate::config`]; the values here are fixed rules of the simulation.

/// Nominal frame rate the host drives ticks at (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal frame rate.
pub const DEFAULT_DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest frame delta accepted by the engine; longer frames are clamped.
pub const MAX_DT: f64 = 0.1;

/// Tolerance when comparing accumulated timers against their duration.
pub const TIMER_EPSILON: f64 = 1e-9;

// --- Enemy AI ---

/// Interval between AI decision cycles (seconds).
pub const AI_DECISION_INTERVAL_SECS: f64 = 0.5;

/// How long a last-seen target position stays trusted (seconds).
pub const AI_MEMORY_DURATION_SECS: f64 = 5.0;

/// Maximum time spent in `Search` before giving up (seconds).
pub const AI_MAX_SEARCH_SECS: f64 = 10.0;

/// Cosine of the half field-of-view angle (~120° cone).
pub const AI_FOV_COS: f64 = 0.5;

/// Below this health fraction an enemy considers retreating or taking cover.
pub const AI_LOW_HEALTH_FRACTION: f64 = 0.3;

/// Above this health fraction an enemy leaves cover.
pub const AI_COVER_EXIT_HEALTH_FRACTION: f64 = 0.5;

/// Per-tick chance of leaving cover regardless of health.
pub const AI_COVER_ABANDON_CHANCE: f64 = 0.01;

/// Distance at which a waypoint or cover spot counts as reached.
pub const AI_ARRIVAL_DISTANCE: f64 = 0.5;

/// Wait at each patrol waypoint (seconds).
pub const AI_PATROL_WAIT_SECS: f64 = 2.0;

/// Speed multipliers relative to the enemy's base speed.
pub const AI_PATROL_SPEED_FACTOR: f64 = 0.5;
pub const AI_SEARCH_SPEED_FACTOR: f64 = 0.7;
pub const AI_RETREAT_SPEED_FACTOR: f64 = 1.2;

/// Turn rate gain for smoothed facing (per second).
pub const AI_TURN_RATE: f64 = 5.0;

/// Maximum random yaw change per tick while idle (radians).
pub const AI_IDLE_YAW_DRIFT: f64 = 0.01;

/// Distance kept from the arena walls by generated AI goals.
pub const AI_WORLD_MARGIN: f64 = 2.0;

/// Random patrol waypoints added to the spawn point: 3..=5.
pub const AI_PATROL_EXTRA_POINTS_MIN: usize = 3;
pub const AI_PATROL_EXTRA_POINTS_MAX: usize = 5;
/// Patrol waypoint radius range around the spawn point.
pub const AI_PATROL_RADIUS_MIN: f64 = 5.0;
pub const AI_PATROL_RADIUS_MAX: f64 = 15.0;

/// Search points generated on entering `Search`: 5..=8.
pub const AI_SEARCH_POINTS_MIN: usize = 5;
pub const AI_SEARCH_POINTS_MAX: usize = 8;
/// Search point radius range around the last-seen position.
pub const AI_SEARCH_RADIUS_MIN: f64 = 3.0;
pub const AI_SEARCH_RADIUS_MAX: f64 = 10.0;

/// Distance ahead of the enemy used as the per-tick retreat goal.
pub const AI_RETREAT_STEP: f64 = 10.0;
/// Retreat destination distance when fleeing a known target.
pub const AI_RETREAT_DISTANCE_MIN: f64 = 10.0;
pub const AI_RETREAT_DISTANCE_MAX: f64 = 15.0;
/// Retreat destination distance when no target is known.
pub const AI_WANDER_DISTANCE_MIN: f64 = 10.0;
pub const AI_WANDER_DISTANCE_MAX: f64 = 20.0;
/// Retreat ends once the target is farther than this fraction of detection range.
pub const AI_RETREAT_SAFE_FRACTION: f64 = 0.8;

/// Extra distance beyond an obstacle's extent for a cover spot.
pub const AI_COVER_STANDOFF: f64 = 1.0;
/// Weight of occlusion alignment in the cover score.
pub const AI_COVER_ALIGNMENT_WEIGHT: f64 = 10.0;

// --- Enemy bodies ---

/// Enemy body height (feet at y = 0).
pub const ENEMY_BODY_HEIGHT: f64 = 2.0;

/// Eye height enemies look from.
pub const ENEMY_EYE_HEIGHT: f64 = 1.6;

/// Enemy body half-width used by hitscan and contact checks.
pub const ENEMY_BODY_RADIUS: f64 = 0.5;

/// Hits at or above this height count as headshots.
pub const HEADSHOT_HEIGHT: f64 = 1.5;

/// Score multiplier for headshot kills.
pub const HEADSHOT_SCORE_MULTIPLIER: u32 = 2;

/// Time a dead enemy lingers before removal (seconds).
pub const ENEMY_DEATH_DELAY_SECS: f64 = 3.0;

// --- Player ---

/// Camera height above the ground.
pub const PLAYER_EYE_HEIGHT: f64 = 1.7;

/// Muzzle offset below the eye for spawned bullets.
pub const PLAYER_MUZZLE_DROP: f64 = 0.3;

/// Distance kept from the arena walls by the player.
pub const PLAYER_WORLD_MARGIN: f64 = 1.0;

/// Player collision radius.
pub const PLAYER_RADIUS: f64 = 1.0;

/// Planar range within which a living enemy damages the player on contact.
pub const PLAYER_CONTACT_RANGE: f64 = PLAYER_RADIUS + ENEMY_BODY_RADIUS;

/// Contact damage per second while an enemy touches the player.
pub const PLAYER_CONTACT_DPS: f64 = 10.0;

// --- Bullets ---

/// Bullet travel speed (units/second).
pub const BULLET_SPEED: f64 = 50.0;

/// Bullet lifetime (seconds).
pub const BULLET_LIFETIME_SECS: f64 = 2.0;

/// Planar distance from an enemy at which a bullet hits.
pub const BULLET_HIT_RADIUS: f64 = 1.0;

/// Bullets at or above this height pass over enemies.
pub const BULLET_HIT_HEIGHT: f64 = 2.0;

/// Bullet pool capacity.
pub const MAX_BULLETS: usize = 100;

// --- Grenades ---

/// Gravity acceleration (units/second²).
pub const GRAVITY: f64 = 9.8;

/// Grenade radius; the ground contact height.
pub const GRENADE_RADIUS: f64 = 0.2;

/// Upward launch speed added to every throw.
pub const GRENADE_UPWARD_SPEED: f64 = 5.0;

/// Velocity retained on a bounce.
pub const GRENADE_BOUNCE: f64 = 0.5;

/// Horizontal velocity retained on a ground bounce.
pub const GRENADE_GROUND_FRICTION: f64 = 0.8;

/// Time an exploded grenade stays in the pool for effects (seconds).
pub const GRENADE_CLEANUP_SECS: f64 = 1.0;

/// Grenade pool capacity.
pub const MAX_GRENADES: usize = 10;

// --- Items ---

/// Rest height of a spawned item.
pub const ITEM_REST_HEIGHT: f64 = 0.5;

/// Float animation amplitude.
pub const ITEM_FLOAT_HEIGHT: f64 = 0.5;

/// Float animation phase speed (radians/second).
pub const ITEM_FLOAT_SPEED: f64 = 1.5;

/// Spin speed (radians/second).
pub const ITEM_SPIN_SPEED: f64 = 1.0;

/// Distance kept from the arena walls by random item spawns.
pub const ITEM_WORLD_MARGIN: f64 = 2.0;

/// Item pool capacity.
pub const MAX_ITEMS: usize = 10;

// --- Game flow ---

/// Delay between winning and the game-over screen (seconds).
pub const VICTORY_DELAY_SECS: f64 = 3.0;

/// Random items spawned when a survival wave is cleared.
pub const WAVE_CLEAR_ITEM_COUNT: u32 = 2;
