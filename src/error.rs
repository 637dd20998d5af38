//! Configuration errors.
//!
//! Solving and raycasting never fail: an unreachable target is an ordinary
//! `None` / empty result. The only fault surface is building a profile
//! registry from malformed input, which happens once at startup.

use thiserror::Error;

/// Profile registry construction errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Gravity must be zero or downward.
    #[error("profile `{kind}`: gravity {gravity} is positive")]
    PositiveGravity {
        /// Projectile kind
        kind: String,
        /// Offending value
        gravity: f64,
    },

    /// Base speed must be finite and non-negative.
    #[error("profile `{kind}`: invalid base speed {speed}")]
    InvalidSpeed {
        /// Projectile kind
        kind: String,
        /// Offending value
        speed: f64,
    },

    /// Charge curves need a positive full-charge duration.
    #[error("profile `{kind}`: full charge duration must be positive")]
    InvalidChargeDuration {
        /// Projectile kind
        kind: String,
    },

    /// Charge curve decreases somewhere.
    #[error("profile `{kind}`: charge curve decreases at tick {tick}")]
    NonMonotonicCharge {
        /// Projectile kind
        kind: String,
        /// First tick where speed dropped
        tick: u32,
    },

    /// Registry file could not be parsed.
    #[error("registry parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Registry file could not be read.
    #[error("registry read error: {0}")]
    Io(#[from] std::io::Error),
}
