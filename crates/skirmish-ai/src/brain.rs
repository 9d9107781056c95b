//! Enemy behavior finite state machine.
//!
//! A brain re-evaluates its state once per decision interval and runs the
//! current state's behavior every tick. It works on plain data: the caller
//! hands in the enemy's pose and an [`AiContext`] describing the world, and
//! gets back whether the enemy fired this tick.

use glam::DVec3;
use rand::Rng;
use skirmish_core::config::EnemyStats;
use skirmish_core::constants::*;
use skirmish_core::enums::AiState;
use skirmish_core::types::{timer_reached, Obstacle, Pose, WorldBounds};
use skirmish_spatial::{can_see, distance, planar_distance, SightCone};

use crate::steering::{face, move_towards};
use crate::tactics;

/// Where and when the target was last seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastSeen {
    pub position: DVec3,
    pub at_secs: f64,
}

/// Per-enemy AI memory.
#[derive(Debug, Clone, Default)]
pub struct EnemyBrain {
    pub state: AiState,
    /// Time accumulated toward the next decision.
    pub decision_timer: f64,
    pub last_seen: Option<LastSeen>,
    pub patrol_path: Vec<DVec3>,
    pub patrol_index: usize,
    pub patrol_wait: f64,
    pub search_points: Vec<DVec3>,
    pub search_index: usize,
    pub search_timer: f64,
    pub attack_timer: f64,
    pub cover: Option<DVec3>,
    pub retreat_destination: Option<DVec3>,
}

impl EnemyBrain {
    /// A fresh brain in `Idle` with a patrol loop around `spawn`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, spawn: DVec3, bounds: &WorldBounds) -> Self {
        Self {
            patrol_path: tactics::patrol_path(rng, spawn, bounds),
            ..Self::default()
        }
    }
}

/// What the brain can perceive this tick.
pub struct AiContext<'a> {
    pub stats: &'a EnemyStats,
    /// Current health divided by max health.
    pub health_fraction: f64,
    /// Player eye position, absent when there is nothing to hunt.
    pub target: Option<DVec3>,
    pub obstacles: &'a [Obstacle],
    pub bounds: &'a WorldBounds,
    /// Simulation clock, used for target memory.
    pub now_secs: f64,
    pub dt: f64,
}

/// Result of one brain update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiUpdate {
    /// The enemy pulled the trigger this tick.
    pub fired: bool,
    /// State before the update.
    pub from: AiState,
    /// State after the update.
    pub to: AiState,
}

impl AiUpdate {
    pub fn state_changed(&self) -> bool {
        self.from != self.to
    }
}

/// Advance one enemy by one tick.
pub fn update<R: Rng + ?Sized>(
    brain: &mut EnemyBrain,
    pose: &mut Pose,
    ctx: &AiContext,
    rng: &mut R,
) -> AiUpdate {
    let from = brain.state;

    brain.decision_timer += ctx.dt;
    if timer_reached(brain.decision_timer, AI_DECISION_INTERVAL_SECS) {
        brain.decision_timer = 0.0;
        decide(brain, pose, ctx, rng);
    }

    let fired = behave(brain, pose, ctx, rng);

    AiUpdate {
        fired,
        from,
        to: brain.state,
    }
}

fn eye(pose: &Pose) -> DVec3 {
    pose.position + DVec3::new(0.0, ENEMY_EYE_HEIGHT, 0.0)
}

fn sees(pose: &Pose, target: DVec3, ctx: &AiContext) -> bool {
    let cone = SightCone {
        range: ctx.stats.detection_range,
        fov_cos: AI_FOV_COS,
    };
    can_see(eye(pose), pose.yaw, target, &cone, ctx.obstacles)
}

/// One decision cycle. Later checks may override earlier ones.
fn decide<R: Rng + ?Sized>(brain: &mut EnemyBrain, pose: &Pose, ctx: &AiContext, rng: &mut R) {
    let Some(target) = ctx.target else {
        change_state(brain, AiState::Patrol, pose, ctx, rng);
        return;
    };

    if sees(pose, target, ctx) {
        brain.last_seen = Some(LastSeen {
            position: target,
            at_secs: ctx.now_secs,
        });
        let dist = distance(eye(pose), target);
        if dist <= ctx.stats.attack_range {
            change_state(brain, AiState::Attack, pose, ctx, rng);
        } else if dist <= ctx.stats.detection_range {
            change_state(brain, AiState::Chase, pose, ctx, rng);
        }
    } else {
        let remembers = brain
            .last_seen
            .is_some_and(|seen| ctx.now_secs - seen.at_secs < AI_MEMORY_DURATION_SECS);
        if remembers {
            if brain.state != AiState::Search {
                change_state(brain, AiState::Search, pose, ctx, rng);
            }
        } else if brain.state == AiState::Search && brain.search_timer < AI_MAX_SEARCH_SECS {
            // Keep combing the area; skip the health check this cycle.
            return;
        } else {
            change_state(brain, AiState::Patrol, pose, ctx, rng);
        }
    }

    let health = ctx.health_fraction;
    if health < AI_LOW_HEALTH_FRACTION && rng.gen::<f64>() < 1.0 - health {
        let next = if rng.gen_bool(0.5) {
            AiState::Retreat
        } else {
            AiState::TakeCover
        };
        change_state(brain, next, pose, ctx, rng);
    }
}

/// Switch states, running exit and enter actions. Same-state is a no-op.
fn change_state<R: Rng + ?Sized>(
    brain: &mut EnemyBrain,
    next: AiState,
    pose: &Pose,
    ctx: &AiContext,
    rng: &mut R,
) {
    if brain.state == next {
        return;
    }

    match brain.state {
        AiState::Search => {
            brain.search_points.clear();
            brain.search_index = 0;
        }
        AiState::Retreat => brain.retreat_destination = None,
        _ => {}
    }

    brain.state = next;

    match next {
        AiState::Patrol => {
            brain.patrol_index = 0;
            brain.patrol_wait = 0.0;
        }
        AiState::Attack => brain.attack_timer = 0.0,
        AiState::Search => {
            brain.search_timer = 0.0;
            let center = brain
                .last_seen
                .map_or(pose.position, |seen| seen.position);
            brain.search_points = tactics::search_points(rng, center, ctx.bounds);
            brain.search_index = 0;
        }
        AiState::Retreat => {
            brain.retreat_destination = Some(tactics::retreat_destination(
                rng,
                pose.position,
                ctx.target,
                ctx.bounds,
            ));
        }
        AiState::TakeCover => {
            brain.cover = ctx
                .target
                .and_then(|t| tactics::find_cover(pose.position, t, ctx.obstacles, ctx.bounds));
        }
        AiState::Idle | AiState::Chase => {}
    }
}

/// Run the current state's per-tick behavior. Returns true when firing.
fn behave<R: Rng + ?Sized>(
    brain: &mut EnemyBrain,
    pose: &mut Pose,
    ctx: &AiContext,
    rng: &mut R,
) -> bool {
    let speed = ctx.stats.speed;
    let dt = ctx.dt;

    match brain.state {
        AiState::Idle => {
            pose.yaw += rng.gen_range(-1.0..=1.0) * AI_IDLE_YAW_DRIFT;
        }

        AiState::Patrol => {
            if brain.patrol_path.is_empty() {
                brain.patrol_path = tactics::patrol_path(rng, pose.position, ctx.bounds);
                return false;
            }
            let index = brain.patrol_index % brain.patrol_path.len();
            let waypoint = brain.patrol_path[index];
            if planar_distance(pose.position, waypoint) < AI_ARRIVAL_DISTANCE {
                brain.patrol_wait += dt;
                if timer_reached(brain.patrol_wait, AI_PATROL_WAIT_SECS) {
                    brain.patrol_wait = 0.0;
                    brain.patrol_index = (index + 1) % brain.patrol_path.len();
                }
            } else {
                move_towards(pose, waypoint, speed * AI_PATROL_SPEED_FACTOR, dt, ctx.bounds);
            }
        }

        AiState::Chase => match ctx.target {
            Some(target) => move_towards(pose, target, speed, dt, ctx.bounds),
            None => change_state(brain, AiState::Patrol, pose, ctx, rng),
        },

        AiState::Attack => {
            let Some(target) = ctx.target else {
                change_state(brain, AiState::Patrol, pose, ctx, rng);
                return false;
            };
            face(pose, target);
            brain.attack_timer += dt;
            if timer_reached(brain.attack_timer, 1.0 / ctx.stats.fire_rate) {
                brain.attack_timer = 0.0;
                return true;
            }
        }

        AiState::Search => {
            brain.search_timer += dt;
            if timer_reached(brain.search_timer, AI_MAX_SEARCH_SECS) {
                change_state(brain, AiState::Patrol, pose, ctx, rng);
                return false;
            }
            if brain.search_points.is_empty() {
                let center = brain
                    .last_seen
                    .map_or(pose.position, |seen| seen.position);
                brain.search_points = tactics::search_points(rng, center, ctx.bounds);
                brain.search_index = 0;
                return false;
            }
            let index = brain.search_index % brain.search_points.len();
            let point = brain.search_points[index];
            if planar_distance(pose.position, point) < AI_ARRIVAL_DISTANCE {
                brain.search_index = (index + 1) % brain.search_points.len();
            } else {
                move_towards(pose, point, speed * AI_SEARCH_SPEED_FACTOR, dt, ctx.bounds);
            }
        }

        AiState::Retreat => {
            let Some(target) = ctx.target else {
                change_state(brain, AiState::Patrol, pose, ctx, rng);
                return false;
            };
            let mut goal = tactics::retreat_step(pose.position, target, ctx.bounds);
            if planar_distance(pose.position, goal) < AI_ARRIVAL_DISTANCE {
                // Pinned against a wall: head for the spot picked on entry.
                if let Some(destination) = brain.retreat_destination {
                    goal = destination;
                }
            }
            move_towards(pose, goal, speed * AI_RETREAT_SPEED_FACTOR, dt, ctx.bounds);
            if distance(eye(pose), target) > ctx.stats.detection_range * AI_RETREAT_SAFE_FRACTION {
                change_state(brain, AiState::Patrol, pose, ctx, rng);
            }
        }

        AiState::TakeCover => {
            if brain.cover.is_none() {
                brain.cover = ctx
                    .target
                    .and_then(|t| tactics::find_cover(pose.position, t, ctx.obstacles, ctx.bounds));
            }
            let Some(spot) = brain.cover else {
                change_state(brain, AiState::Retreat, pose, ctx, rng);
                return false;
            };
            move_towards(pose, spot, speed, dt, ctx.bounds);
            if planar_distance(pose.position, spot) < AI_ARRIVAL_DISTANCE {
                if let Some(target) = ctx.target {
                    face(pose, target);
                }
                if ctx.health_fraction > AI_COVER_EXIT_HEALTH_FRACTION
                    || rng.gen_bool(AI_COVER_ABANDON_CHANCE)
                {
                    brain.cover = None;
                    let visible = ctx.target.is_some_and(|t| sees(pose, t, ctx));
                    let next = if visible {
                        AiState::Attack
                    } else {
                        AiState::Patrol
                    };
                    change_state(brain, next, pose, ctx, rng);
                }
            }
        }
    }

    false
}
