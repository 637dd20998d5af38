//! 3D Vector and Block Coordinates
//!
//! World-space positions, per-tick velocities and accelerations, and the
//! integer cell coordinates of the block grid.

use std::fmt;
use std::ops::{Add, Sub, Neg, Mul};
use serde::{Serialize, Deserialize};

/// 3D vector with `f64` components (blocks, blocks/tick, blocks/tick²).
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component (east)
    pub x: f64,
    /// Y component (up)
    pub y: f64,
    /// Z component (south)
    pub z: f64,
}

impl Vec3 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Translate by per-axis offsets.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Scale by a scalar.
    #[inline]
    pub fn scale(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }

    /// Squared length (avoids sqrt - prefer this for comparisons).
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Length (magnitude).
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Straight-line distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Distance in the XZ plane, ignoring height.
    #[inline]
    pub fn horizontal_distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.z - self.z)
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Floor each component.
    #[inline]
    pub fn floored(self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    /// Linear interpolation. `t = 0` returns self, `t = 1` returns other.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self).scale(t)
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component by axis index (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn axis(self, index: usize) -> f64 {
        match index {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Debug for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec3({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Integer coordinates of a unit block cell.
///
/// Ordered so it can key a `BTreeMap` with deterministic iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BlockPos {
    /// Cell X
    pub x: i32,
    /// Cell Y
    pub y: i32,
    /// Cell Z
    pub z: i32,
}

impl BlockPos {
    /// Create a new block position.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell containing a world position.
    #[inline]
    pub fn containing(position: Vec3) -> Self {
        let f = position.floored();
        Self::new(f.x as i32, f.y as i32, f.z as i32)
    }

    /// World position of the cell's minimum corner.
    #[inline]
    pub fn min_corner(self) -> Vec3 {
        Vec3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_add_sub() {
        let a = Vec3::new(3.0, 4.0, 5.0);
        let b = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(a + b, Vec3::new(4.0, 6.0, 8.0));
        assert_eq!(a - b, Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(-b, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_vec3_scale_and_offset() {
        let v = Vec3::new(2.0, 3.0, 4.0);
        assert_eq!(v * 2.0, Vec3::new(4.0, 6.0, 8.0));
        assert_eq!(v.offset(1.0, -1.0, 0.5), Vec3::new(3.0, 2.0, 4.5));
    }

    #[test]
    fn test_vec3_distance() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 3.0, 6.0);
        assert_eq!(a.distance_squared(b), 49.0);
        assert_eq!(a.distance(b), 7.0);
        assert_eq!(b.length(), 7.0);
        assert_eq!(a.horizontal_distance(Vec3::new(3.0, 100.0, 4.0)), 5.0);
    }

    #[test]
    fn test_block_pos_containing_negative() {
        let pos = BlockPos::containing(Vec3::new(-0.5, 1.999, 2.0));
        assert_eq!(pos, BlockPos::new(-1, 1, 2));
        assert_eq!(pos.min_corner(), Vec3::new(-1.0, 1.0, 2.0));
    }

    #[test]
    fn test_lerp() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 4.0, -2.0);
        assert_eq!(a.lerp(b, 0.5), Vec3::new(1.0, 2.0, -1.0));
    }
}
