//! Core primitives.
//!
//! Plain value types shared by the solver and the raycaster, plus
//! fingerprinting used to verify that solves are reproducible.

pub mod vec2;
pub mod vec3;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use vec3::{Vec3, BlockPos};
pub use hash::{Fingerprint, SolutionHasher};
