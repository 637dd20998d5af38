//! Collision Raycaster
//!
//! Walks a solved trajectory one tick at a time. Each tick contributes one
//! straight segment between the closed-form positions at `t - 1` and `t`;
//! every block cell the segment's bounding box spans is sampled and its
//! collision volumes intersected exactly with the segment.
//!
//! Work is bounded by the solution's flight time and `max_ticks`, so a
//! call always terminates even for shots into the void.

use std::collections::BTreeSet;
use tracing::{debug, trace};

use crate::ballistics::aim::{direction, FiringSolution};
use crate::ballistics::profile::ProjectileProfile;
use crate::config::{HitMode, RaycastConfig};
use crate::core::hash::{Fingerprint, SolutionHasher};
use crate::core::vec3::{BlockPos, Vec3};
use super::query::{BlockSample, WorldQuery};

/// One confirmed hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intercept {
    /// World position where the path meets the block's volume.
    pub point: Vec3,
    /// The block that was hit.
    pub block: BlockPos,
    /// Tick (1-based) during which the hit happens.
    pub tick: u32,
}

/// Hits along a trajectory, in the order the projectile reaches them.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CollisionResult {
    intercepts: Vec<Intercept>,
}

impl CollisionResult {
    /// All intercepts in hit order.
    pub fn intercepts(&self) -> &[Intercept] {
        &self.intercepts
    }

    /// Intercept points in hit order.
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.intercepts.iter().map(|hit| hit.point)
    }

    /// The first hit, if any.
    pub fn first(&self) -> Option<&Intercept> {
        self.intercepts.first()
    }

    /// Number of intercepts.
    pub fn len(&self) -> usize {
        self.intercepts.len()
    }

    /// True if the path is clear.
    pub fn is_empty(&self) -> bool {
        self.intercepts.is_empty()
    }

    /// SHA-256 over the exact bits of every intercept.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = SolutionHasher::for_collisions();
        hasher.update_u32(self.intercepts.len() as u32);
        for hit in &self.intercepts {
            hasher.update_u32(hit.tick);
            hasher.update_block(hit.block);
            hasher.update_vec3(hit.point);
        }
        hasher.finalize()
    }
}

/// Trace `solution` through `world` and report where it hits blocks.
///
/// An empty result is the normal outcome for a clear path.
#[cfg_attr(feature = "debug-tracing", tracing::instrument(skip(profile, world, config)))]
pub fn raycast<W>(
    profile: &ProjectileProfile,
    shooter: Vec3,
    solution: &FiringSolution,
    charge_ticks: Option<f64>,
    world: &W,
    config: &RaycastConfig,
) -> CollisionResult
where
    W: WorldQuery + ?Sized,
{
    // Look pitch excludes the profile's own tilt; the projectile does not.
    let launch = direction(solution.yaw, solution.pitch + profile.initial_angle());
    let velocity = launch * profile.speed(charge_ticks);
    let horizon = tick_horizon(solution.time_of_flight, config.max_ticks);

    let mut result = CollisionResult::default();
    let mut seen: BTreeSet<BlockPos> = BTreeSet::new();

    for tick in 1..=horizon {
        let start = shooter + displacement(velocity, profile.gravity, (tick - 1) as f64);
        let end = shooter + displacement(velocity, profile.gravity, tick as f64);
        if start == end {
            continue;
        }

        trace!(tick, %start, %end, "Tracing segment");

        for (t, block) in segment_hits(world, start, end) {
            if !seen.insert(block) {
                continue;
            }
            result.intercepts.push(Intercept {
                point: start.lerp(end, t),
                block,
                tick,
            });
            if config.mode == HitMode::First {
                debug!(tick, %block, "Trajectory blocked");
                return result;
            }
        }
    }

    debug!(hits = result.len(), horizon, "Raycast finished");
    result
}

/// Number of whole ticks to trace.
fn tick_horizon(time_of_flight: f64, max_ticks: u32) -> u32 {
    if time_of_flight.is_finite() && time_of_flight >= 0.0 {
        (time_of_flight.ceil().min(max_ticks as f64)) as u32
    } else {
        max_ticks
    }
}

/// `s = u·t + ½·g·t²`, gravity on the vertical axis only.
#[inline]
fn displacement(velocity: Vec3, gravity: f64, ticks: f64) -> Vec3 {
    velocity * ticks + Vec3::new(0.0, 0.5 * gravity * ticks * ticks, 0.0)
}

/// Inclusive cell range along one axis, ordered in the direction of travel.
fn axis_cells(from: f64, to: f64) -> Vec<i32> {
    let a = from.floor() as i32;
    let b = to.floor() as i32;
    if a <= b {
        (a..=b).collect()
    } else {
        (b..=a).rev().collect()
    }
}

/// Every cell in the segment's bounding box that the segment actually
/// enters, with the segment fraction of the hit, nearest first.
fn segment_hits<W>(world: &W, start: Vec3, end: Vec3) -> Vec<(f64, BlockPos)>
where
    W: WorldQuery + ?Sized,
{
    let xs = axis_cells(start.x, end.x);
    let ys = axis_cells(start.y, end.y);
    let zs = axis_cells(start.z, end.z);

    let mut hits = Vec::new();
    for &x in &xs {
        for &y in &ys {
            for &z in &zs {
                let block = BlockPos::new(x, y, z);
                let shapes = match world.block_at(block) {
                    BlockSample::Solid(shapes) => shapes,
                    BlockSample::Empty => continue,
                    BlockSample::Unknown => {
                        trace!(%block, "Block unknown, skipping");
                        continue;
                    }
                };

                let corner = block.min_corner();
                let nearest = shapes
                    .iter()
                    .filter_map(|shape| shape.translated(corner).segment_intersection(start, end))
                    .min_by(f64::total_cmp);
                if let Some(t) = nearest {
                    hits.push((t, block));
                }
            }
        }
    }

    hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    hits
}
