//! Collision Volumes
//!
//! Axis-aligned boxes making up a block's collision shape, and the exact
//! segment/box intersection the raycaster confirms hits with.

use serde::{Serialize, Deserialize};

use crate::core::vec3::Vec3;

/// Axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Full block, in block-local coordinates.
    pub const UNIT: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::new(1.0, 1.0, 1.0),
    };

    /// Bottom half-slab, block-local.
    pub const LOWER_SLAB: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::new(1.0, 0.5, 1.0),
    };

    /// Top half-slab, block-local.
    pub const UPPER_SLAB: Self = Self {
        min: Vec3::new(0.0, 0.5, 0.0),
        max: Vec3::new(1.0, 1.0, 1.0),
    };

    /// Create a box from two corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Same box moved by `offset`.
    #[inline]
    pub fn translated(self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Where the segment `start → end` meets this box, as a fraction of
    /// the segment in `[0, 1]`.
    ///
    /// Slab method. The entry point is preferred; a segment starting inside
    /// reports where it leaves. `None` if the segment misses.
    pub fn segment_intersection(&self, start: Vec3, end: Vec3) -> Option<f64> {
        let delta = end - start;
        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;

        for axis in 0..3 {
            let origin = start.axis(axis);
            let d = delta.axis(axis);
            let lo = self.min.axis(axis);
            let hi = self.max.axis(axis);

            if d == 0.0 {
                // Parallel to this slab: must already be within it.
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let t1 = (lo - origin) / d;
            let t2 = (hi - origin) / d;
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            t_enter = t_enter.max(near);
            t_exit = t_exit.min(far);
            if t_enter > t_exit {
                return None;
            }
        }

        if (0.0..=1.0).contains(&t_enter) {
            Some(t_enter)
        } else if t_enter < 0.0 && (0.0..=1.0).contains(&t_exit) {
            Some(t_exit)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_point() {
        let block = Aabb::UNIT.translated(Vec3::new(2.0, 0.0, 0.0));
        let t = block
            .segment_intersection(Vec3::new(0.0, 0.5, 0.5), Vec3::new(4.0, 0.5, 0.5))
            .unwrap();
        assert_eq!(t, 0.5);
    }

    #[test]
    fn test_miss() {
        let block = Aabb::UNIT;
        // passes above
        assert!(block
            .segment_intersection(Vec3::new(-1.0, 1.5, 0.5), Vec3::new(2.0, 1.5, 0.5))
            .is_none());
        // stops short
        assert!(block
            .segment_intersection(Vec3::new(-3.0, 0.5, 0.5), Vec3::new(-0.5, 0.5, 0.5))
            .is_none());
        // diagonal clipping past a corner
        assert!(block
            .segment_intersection(Vec3::new(-1.0, 0.5, 0.9), Vec3::new(0.5, 0.5, 2.5))
            .is_none());
    }

    #[test]
    fn test_start_inside_reports_exit() {
        let t = Aabb::UNIT
            .segment_intersection(Vec3::new(0.5, 0.5, 0.5), Vec3::new(0.5, 0.5, 2.5))
            .unwrap();
        assert_eq!(t, 0.25);
    }

    #[test]
    fn test_slab_shapes() {
        // Skims over a bottom slab, hits a top slab.
        let start = Vec3::new(-1.0, 0.75, 0.5);
        let end = Vec3::new(2.0, 0.75, 0.5);
        assert!(Aabb::LOWER_SLAB.segment_intersection(start, end).is_none());
        let t = Aabb::UPPER_SLAB.segment_intersection(start, end).unwrap();
        assert!((t - 1.0 / 3.0).abs() < 1e-12);
    }
}
