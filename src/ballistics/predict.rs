//! Target Prediction
//!
//! Extrapolates where a moving target will be after some number of ticks,
//! and estimates its motion from per-tick position samples.

use serde::{Serialize, Deserialize};

use crate::core::vec3::Vec3;

/// Vertical acceleration of a falling entity, blocks/tick².
pub const FALLING_ACCELERATION: f64 = -0.08;

/// Position after `elapsed_ticks` under constant acceleration.
///
/// `s = u·t + ½·a·t²` per axis. Zero, negative or non-finite elapsed time
/// returns `position` unchanged.
pub fn predict(position: Vec3, velocity: Vec3, acceleration: Vec3, elapsed_ticks: f64) -> Vec3 {
    if !elapsed_ticks.is_finite() || elapsed_ticks <= 0.0 {
        return position;
    }

    let t = elapsed_ticks;
    position + velocity * t + acceleration * (0.5 * t * t)
}

/// Whole ticks elapsed, for indexing tick-stepped data.
#[inline]
pub fn floor_ticks(elapsed_ticks: f64) -> u32 {
    if elapsed_ticks.is_nan() || elapsed_ticks <= 0.0 {
        return 0;
    }
    elapsed_ticks.floor().min(u32::MAX as f64) as u32
}

/// Snapshot of a target's motion.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetState {
    /// Position, blocks
    pub position: Vec3,
    /// Velocity, blocks/tick
    pub velocity: Vec3,
    /// Acceleration, blocks/tick²
    pub acceleration: Vec3,
}

impl TargetState {
    /// A target that is not moving.
    pub const fn stationary(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
        }
    }

    /// A target moving at constant velocity.
    pub const fn moving(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
        }
    }

    /// Predicted position after `elapsed_ticks`.
    #[inline]
    pub fn predict(&self, elapsed_ticks: f64) -> Vec3 {
        predict(self.position, self.velocity, self.acceleration, elapsed_ticks)
    }

    /// Estimate motion from positions sampled once per tick, oldest first.
    ///
    /// Velocity is the last finite difference; acceleration the last second
    /// difference. With fewer than three samples an `airborne` target is
    /// assumed to be falling. Returns `None` for an empty slice.
    pub fn from_samples(samples: &[Vec3], airborne: bool) -> Option<Self> {
        let (&position, history) = samples.split_last()?;

        let velocity = match history.last() {
            Some(&previous) => position - previous,
            None => Vec3::ZERO,
        };

        let acceleration = if samples.len() >= 3 {
            let n = samples.len();
            let previous_velocity = samples[n - 2] - samples[n - 3];
            velocity - previous_velocity
        } else if airborne {
            Vec3::new(0.0, FALLING_ACCELERATION, 0.0)
        } else {
            Vec3::ZERO
        };

        Some(Self {
            position,
            velocity,
            acceleration,
        })
    }
}
