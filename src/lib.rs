//! # Projectile Aim
//!
//! Firing solutions for gravity-affected projectiles in a tick-based voxel
//! world: predict where a target will be, find the yaw and pitch that put
//! a projectile there on the low and high arcs, then trace the resulting
//! trajectory through the world to see what it hits first.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PROJECTILE AIM                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Value types                               │
//! │  ├── vec2.rs     - 2D velocity vector                        │
//! │  ├── vec3.rs     - World position, block coordinates         │
//! │  └── hash.rs     - Solution fingerprints                     │
//! │                                                              │
//! │  ballistics/     - Aiming                                    │
//! │  ├── profile.rs  - Speed, gravity, charge curves             │
//! │  ├── registry.rs - Named projectile kinds                    │
//! │  ├── flight.rs   - Launch offset and time of flight          │
//! │  ├── predict.rs  - Target extrapolation                      │
//! │  └── aim.rs      - Low/high arc solver                       │
//! │                                                              │
//! │  world/          - Collision                                 │
//! │  ├── shape.rs    - Block collision volumes                   │
//! │  ├── query.rs    - Block lookup                              │
//! │  └── raycast.rs  - Tick-segmented trajectory tracing         │
//! │                                                              │
//! │  config.rs       - Solver and raycast tuning                 │
//! │  error.rs        - Profile loading errors                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Units
//!
//! Distances are blocks, time is ticks (20 per second), speeds are blocks
//! per tick and gravity is blocks per tick², negative meaning down. Angles
//! are radians; pitch is positive upward.
//!
//! ## Determinism
//!
//! Every operation is a pure function of its inputs. Solving the same
//! shot twice yields bit-identical angles, which fingerprints in
//! `core::hash` make cheap to check.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod ballistics;
pub mod world;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use core::vec2::Vec2;
pub use core::vec3::{Vec3, BlockPos};
pub use ballistics::profile::{ProjectileProfile, ChargeCurve};
pub use ballistics::registry::{ProfileRegistry, registry};
pub use ballistics::predict::TargetState;
pub use ballistics::aim::{FiringSolution, ArcSolutions, aim_at, solve, solve_preferred};
pub use world::query::{BlockSample, WorldQuery, VoxelGrid};
pub use world::raycast::{raycast, CollisionResult, Intercept};
pub use config::{SolverConfig, RaycastConfig, HitMode};
pub use error::ConfigError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 20;

/// Tick duration in milliseconds
pub const TICK_MS: u32 = 1000 / TICK_RATE;
