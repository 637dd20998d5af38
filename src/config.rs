//! Solver and raycaster configuration.
//!
//! Both configs bound the work done per call so a single tick never runs
//! away, whatever the target does.

use std::str::FromStr;
use tracing::warn;

/// Angle solver tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Maximum refinement passes per arc (at least one is always run).
    pub max_iterations: u32,
    /// Stop refining once the predicted destination moves less than this (blocks).
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 8,
            tolerance: 1e-3,
        }
    }
}

impl SolverConfig {
    /// Create config from environment variables.
    ///
    /// `AIM_MAX_ITERATIONS`, `AIM_TOLERANCE`. Unparseable values are logged
    /// and replaced by the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_iterations: env_or("AIM_MAX_ITERATIONS", defaults.max_iterations).max(1),
            tolerance: env_or("AIM_TOLERANCE", defaults.tolerance).abs(),
        }
    }
}

/// What the raycaster does after the first confirmed hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitMode {
    /// Stop at the first intercept.
    #[default]
    First,
    /// Record every intercepted block along the path.
    All,
}

/// Collision raycaster limits.
#[derive(Debug, Clone, PartialEq)]
pub struct RaycastConfig {
    /// Upper bound on simulated ticks.
    pub max_ticks: u32,
    /// Stop at the first hit or collect all.
    pub mode: HitMode,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            max_ticks: 200, // 10 seconds at 20 TPS
            mode: HitMode::First,
        }
    }
}

impl RaycastConfig {
    /// Create config from environment variables.
    ///
    /// `RAYCAST_MAX_TICKS`, `RAYCAST_COLLECT_ALL` (`true`/`1`).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let collect_all = std::env::var("RAYCAST_COLLECT_ALL")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        Self {
            max_ticks: env_or("RAYCAST_MAX_TICKS", defaults.max_ticks),
            mode: if collect_all { HitMode::All } else { HitMode::First },
        }
    }

    /// Same limits, collecting every hit.
    pub fn collect_all(mut self) -> Self {
        self.mode = HitMode::All;
        self
    }
}

fn env_or<T: FromStr + Copy + std::fmt::Debug>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring {}={:?}, using {:?}", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
