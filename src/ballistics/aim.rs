//! Angle Solver
//!
//! Turns a shooter position and a target snapshot into the yaw and pitch
//! that put a projectile on the target, for both the low and the high
//! ballistic arc.
//!
//! ## Look convention
//!
//! Angles follow the actuation side's look convention: yaw 0 faces −Z and
//! grows toward −X; positive pitch looks up. [`direction`] converts a
//! (yaw, pitch) pair back into the unit vector the projectile leaves along,
//! and the raycaster uses it so both sides agree on where "forward" is.
//!
//! ## Determinism
//!
//! Every call is a pure function of its inputs: identical inputs give
//! bit-identical solutions, which [`ArcSolutions::fingerprint`] checks.

use std::f64::consts::FRAC_PI_2;
use serde::{Serialize, Deserialize};
use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::core::hash::{Fingerprint, SolutionHasher};
use crate::core::vec3::Vec3;
use super::predict::TargetState;
use super::profile::ProjectileProfile;

/// Yaw and pitch to fire along, in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiringSolution {
    /// Horizontal look angle.
    pub yaw: f64,
    /// Vertical look angle, up positive.
    pub pitch: f64,
    /// Ticks until arrival on this arc; infinite when unknown.
    pub time_of_flight: f64,
    /// Point the solution was solved against, after target prediction.
    pub destination: Option<Vec3>,
}

impl FiringSolution {
    /// Bare angles with no known flight time.
    pub const fn new(yaw: f64, pitch: f64) -> Self {
        Self {
            yaw,
            pitch,
            time_of_flight: f64::INFINITY,
            destination: None,
        }
    }

    /// Unit look direction. A tilted profile launches `initial_angle` above it.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        direction(self.yaw, self.pitch)
    }

    fn hash_into(&self, hasher: &mut SolutionHasher) {
        hasher.update_f64(self.yaw);
        hasher.update_f64(self.pitch);
        hasher.update_f64(self.time_of_flight);
        hasher.update_bool(self.destination.is_some());
        if let Some(destination) = self.destination {
            hasher.update_vec3(destination);
        }
    }
}

/// Both ballistic arcs for one shot. Either may be unreachable.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ArcSolutions {
    /// Flat, fast arc.
    pub low: Option<FiringSolution>,
    /// Lobbed, slow arc.
    pub high: Option<FiringSolution>,
}

impl ArcSolutions {
    /// The low arc if reachable, else the high arc.
    pub fn preferred(&self) -> Option<FiringSolution> {
        self.low.or(self.high)
    }

    /// True when neither arc is reachable.
    pub fn is_empty(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// SHA-256 over the exact bits of both arcs.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = SolutionHasher::for_solutions();
        for arc in [&self.low, &self.high] {
            hasher.update_bool(arc.is_some());
            if let Some(solution) = arc {
                solution.hash_into(&mut hasher);
            }
        }
        hasher.finalize()
    }
}

/// Which of the two equal-range launch angles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Arc {
    Low,
    High,
}

impl Arc {
    fn offset(self, low_offset: f64) -> f64 {
        match self {
            Arc::Low => low_offset,
            Arc::High => FRAC_PI_2 - low_offset,
        }
    }
}

/// A converged arc before it is turned into angles.
struct ArcFix {
    offset: f64,
    time: f64,
    destination: Vec3,
}

/// Unit vector for a (yaw, pitch) pair in the look convention.
#[inline]
pub fn direction(yaw: f64, pitch: f64) -> Vec3 {
    let horizontal = pitch.cos();
    Vec3::new(-yaw.sin() * horizontal, pitch.sin(), -yaw.cos() * horizontal)
}

/// Yaw that faces from `from` toward `to`. Zero when `to` is straight
/// above or below.
#[inline]
pub fn yaw_toward(from: Vec3, to: Vec3) -> f64 {
    if from.horizontal_distance(to) == 0.0 {
        return 0.0;
    }
    (from.x - to.x).atan2(from.z - to.z)
}

/// Low-arc solution against a fixed destination, no prediction.
pub fn aim_at(
    profile: &ProjectileProfile,
    shooter: Vec3,
    destination: Vec3,
    charge_ticks: Option<f64>,
) -> Option<FiringSolution> {
    let offset = profile.launch_angle(shooter, destination, charge_ticks);
    let time = profile.arc_time(shooter.distance(destination), offset, charge_ticks);
    to_solution(profile, shooter, ArcFix { offset, time, destination })
}

/// Solve both arcs against a moving target.
///
/// `latency_ticks` is fixed delay before release (network, charge
/// remaining) during which the target keeps moving. Returns `None` when
/// neither arc can reach.
#[cfg_attr(feature = "debug-tracing", tracing::instrument(skip(profile, config)))]
pub fn solve(
    profile: &ProjectileProfile,
    shooter: Vec3,
    target: &TargetState,
    charge_ticks: Option<f64>,
    latency_ticks: Option<f64>,
    config: &SolverConfig,
) -> Option<ArcSolutions> {
    let latency = latency_ticks
        .filter(|t| t.is_finite() && *t > 0.0)
        .unwrap_or(0.0);

    let low = refine_arc(profile, shooter, target, charge_ticks, latency, Arc::Low, config);
    let mut high = if profile.gravity == 0.0 || profile.speed(charge_ticks) == 0.0 {
        // No drop or no launch speed: one straight line, not two arcs.
        None
    } else {
        refine_arc(profile, shooter, target, charge_ticks, latency, Arc::High, config)
    };

    let crossed = matches!((&low, &high), (Some(l), Some(h)) if l.offset > h.offset);
    if crossed {
        trace!("Arcs crossed, dropping high arc");
        high = None;
    }

    let solutions = ArcSolutions {
        low: low.and_then(|fix| to_solution(profile, shooter, fix)),
        high: high.and_then(|fix| to_solution(profile, shooter, fix)),
    };

    debug!(
        low = ?solutions.low.map(|s| (s.yaw, s.pitch)),
        high = ?solutions.high.map(|s| (s.yaw, s.pitch)),
        "Solved firing arcs"
    );

    if solutions.is_empty() {
        None
    } else {
        Some(solutions)
    }
}

/// Solve and keep the preferred arc.
pub fn solve_preferred(
    profile: &ProjectileProfile,
    shooter: Vec3,
    target: &TargetState,
    charge_ticks: Option<f64>,
    latency_ticks: Option<f64>,
    config: &SolverConfig,
) -> Option<FiringSolution> {
    solve(profile, shooter, target, charge_ticks, latency_ticks, config)?.preferred()
}

/// Iterate one arc until the predicted destination stops moving.
fn refine_arc(
    profile: &ProjectileProfile,
    shooter: Vec3,
    target: &TargetState,
    charge_ticks: Option<f64>,
    latency: f64,
    arc: Arc,
    config: &SolverConfig,
) -> Option<ArcFix> {
    let evaluate = |destination: Vec3| {
        let offset = arc.offset(profile.launch_angle(shooter, destination, charge_ticks));
        let time = profile.arc_time(shooter.distance(destination), offset, charge_ticks);
        (offset, time)
    };

    let mut destination = target.predict(latency);
    let (mut offset, mut time) = evaluate(destination);

    for iteration in 0..config.max_iterations.max(1) {
        if !offset.is_finite() || !time.is_finite() {
            trace!(?arc, iteration, "Arc unreachable");
            return None;
        }

        let refined = target.predict(latency + time);
        let shift = refined.distance(destination);
        destination = refined;
        (offset, time) = evaluate(destination);

        trace!(?arc, iteration, offset, time, shift, "Refined destination");
        if shift < config.tolerance {
            break;
        }
    }

    if !offset.is_finite() || !time.is_finite() {
        return None;
    }
    Some(ArcFix { offset, time, destination })
}

fn to_solution(profile: &ProjectileProfile, shooter: Vec3, fix: ArcFix) -> Option<FiringSolution> {
    let delta = fix.destination - shooter;
    let sight = delta.y.atan2(shooter.horizontal_distance(fix.destination));
    let yaw = yaw_toward(shooter, fix.destination);
    let pitch = sight + fix.offset - profile.initial_angle();

    if !yaw.is_finite() || !pitch.is_finite() || fix.time.is_nan() {
        return None;
    }

    Some(FiringSolution {
        yaw,
        pitch,
        time_of_flight: fix.time,
        destination: Some(fix.destination),
    })
}
