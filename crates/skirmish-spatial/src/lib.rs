//! Spatial queries for SKIRMISH.
//!
//! Distance, field-of-view and obstacle-occluded line-of-sight, ray tests
//! against axis-aligned boxes, and arena geometry helpers. Everything here is a
//! pure function over read-only geometry.

pub use skirmish_core as core;

pub mod bounds;
pub mod los;
pub mod ray;

// Re-export key functions for convenience.
pub use bounds::ring_point;
pub use los::{can_see, distance, planar_distance, SightCone};
pub use ray::{first_obstacle_hit, ray_aabb, segment_blocked};
