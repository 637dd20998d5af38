//! Ballistics Module
//!
//! Everything needed to aim: projectile profiles and their registry,
//! the launch-angle / flight-time numerics, target prediction, and the
//! two-arc angle solver.
//!
//! ## Module Structure
//!
//! - `profile`: Projectile speed, gravity and charge behavior
//! - `registry`: Named profiles, built-in kinds, JSON loading
//! - `flight`: Launch offset, time of flight, quadratic roots
//! - `predict`: Target extrapolation and motion estimation
//! - `aim`: Low/high arc firing solutions

pub mod profile;
pub mod registry;
pub mod flight;
pub mod predict;
pub mod aim;

// Re-export key types
pub use profile::{ProjectileProfile, ChargeCurve};
pub use registry::{ProfileRegistry, registry};
pub use predict::{TargetState, predict};
pub use aim::{FiringSolution, ArcSolutions, aim_at, solve, solve_preferred, direction};
