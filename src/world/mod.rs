//! World Module
//!
//! Block geometry and the tick-segmented collision raycaster.
//!
//! ## Module Structure
//!
//! - `shape`: Axis-aligned collision volumes, segment intersection
//! - `query`: Block lookup trait, in-memory voxel grid
//! - `raycast`: Trajectory tracing against the world

pub mod shape;
pub mod query;
pub mod raycast;

// Re-export key types
pub use shape::Aabb;
pub use query::{BlockSample, WorldQuery, VoxelGrid};
pub use raycast::{raycast, Intercept, CollisionResult};
