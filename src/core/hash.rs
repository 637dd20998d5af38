//! Solution Fingerprinting
//!
//! SHA-256 over the exact bit patterns of solver output, used to check
//! that repeated solves of identical inputs are bit-identical.

use sha2::{Sha256, Digest};
use super::vec3::{Vec3, BlockPos};

/// Hash output type (256 bits / 32 bytes)
pub type Fingerprint = [u8; 32];

/// Deterministic hasher for solver output.
///
/// Order of updates is significant.
pub struct SolutionHasher {
    hasher: Sha256,
}

impl SolutionHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for firing solutions.
    pub fn for_solutions() -> Self {
        Self::new(b"PROJECTILE_AIM_SOLUTION_V1")
    }

    /// Create hasher for raycast results.
    pub fn for_collisions() -> Self {
        Self::new(b"PROJECTILE_AIM_COLLISION_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with the raw IEEE-754 bits of an f64.
    ///
    /// `0.0` and `-0.0` hash differently; so do distinct NaN payloads.
    #[inline]
    pub fn update_f64(&mut self, value: f64) {
        self.hasher.update(value.to_bits().to_le_bytes());
    }

    /// Update with a Vec3.
    #[inline]
    pub fn update_vec3(&mut self, value: Vec3) {
        self.update_f64(value.x);
        self.update_f64(value.y);
        self.update_f64(value.z);
    }

    /// Update with a BlockPos.
    #[inline]
    pub fn update_block(&mut self, value: BlockPos) {
        self.update_i32(value.x);
        self.update_i32(value.y);
        self.update_i32(value.z);
    }

    /// Update with a presence flag.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> Fingerprint {
        self.hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hasher_determinism() {
        let make_hash = || {
            let mut hasher = SolutionHasher::for_solutions();
            hasher.update_u32(100);
            hasher.update_f64(0.027_78);
            hasher.update_vec3(Vec3::new(1.0, 2.0, 3.0));
            hasher.update_bool(true);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = SolutionHasher::new(b"test");
            h.update_f64(1.0);
            h.update_f64(2.0);
            h.finalize()
        };

        let hash2 = {
            let mut h = SolutionHasher::new(b"test");
            h.update_f64(2.0);
            h.update_f64(1.0);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_signed_zero_distinguished() {
        let hash = |v: f64| {
            let mut h = SolutionHasher::for_solutions();
            h.update_f64(v);
            h.finalize()
        };
        assert_ne!(hash(0.0), hash(-0.0));
    }

    #[test]
    fn test_solution_and_collision_domains_differ() {
        let mut solutions = SolutionHasher::for_solutions();
        let mut collisions = SolutionHasher::for_collisions();
        solutions.update_u32(0);
        collisions.update_u32(0);
        assert_ne!(solutions.finalize(), collisions.finalize());
    }
}
