//! World Queries
//!
//! The raycaster's only view of the world. Implementations answer
//! synchronously; anything they cannot answer right now (unloaded chunk,
//! pending fetch) is `Unknown` and is simply skipped.

use std::collections::BTreeMap;

use crate::core::vec3::BlockPos;
use super::shape::Aabb;

/// What occupies one block cell.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockSample {
    /// Block data not available.
    Unknown,
    /// Nothing to collide with (air, grass, water).
    Empty,
    /// Collision volumes in block-local coordinates.
    Solid(Vec<Aabb>),
}

impl BlockSample {
    /// A full cube.
    pub fn full() -> Self {
        BlockSample::Solid(vec![Aabb::UNIT])
    }
}

/// Synchronous, side-effect-free block lookup.
pub trait WorldQuery {
    /// Sample the block at `pos`.
    fn block_at(&self, pos: BlockPos) -> BlockSample;
}

impl<F> WorldQuery for F
where
    F: Fn(BlockPos) -> BlockSample,
{
    fn block_at(&self, pos: BlockPos) -> BlockSample {
        self(pos)
    }
}

/// In-memory block grid.
///
/// Cells not set are empty; cells outside the loaded region (if one is
/// set) are unknown.
#[derive(Clone, Debug, Default)]
pub struct VoxelGrid {
    blocks: BTreeMap<BlockPos, Vec<Aabb>>,
    loaded: Option<(BlockPos, BlockPos)>,
}

impl VoxelGrid {
    /// Empty, fully loaded grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict known cells to the inclusive box `min..=max`.
    pub fn with_loaded_region(mut self, min: BlockPos, max: BlockPos) -> Self {
        self.loaded = Some((min, max));
        self
    }

    /// Place a full cube.
    pub fn set_solid(&mut self, pos: BlockPos) {
        self.blocks.insert(pos, vec![Aabb::UNIT]);
    }

    /// Place a block made of the given block-local volumes.
    pub fn set_shape(&mut self, pos: BlockPos, shapes: Vec<Aabb>) {
        if shapes.is_empty() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, shapes);
        }
    }

    /// Fill the inclusive box `min..=max` with full cubes.
    pub fn fill(&mut self, min: BlockPos, max: BlockPos) {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set_solid(BlockPos::new(x, y, z));
                }
            }
        }
    }

    /// Remove a block.
    pub fn clear(&mut self, pos: BlockPos) {
        self.blocks.remove(&pos);
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn is_loaded(&self, pos: BlockPos) -> bool {
        match self.loaded {
            None => true,
            Some((min, max)) => {
                (min.x..=max.x).contains(&pos.x)
                    && (min.y..=max.y).contains(&pos.y)
                    && (min.z..=max.z).contains(&pos.z)
            }
        }
    }
}

impl WorldQuery for VoxelGrid {
    fn block_at(&self, pos: BlockPos) -> BlockSample {
        if !self.is_loaded(pos) {
            return BlockSample::Unknown;
        }
        match self.blocks.get(&pos) {
            Some(shapes) => BlockSample::Solid(shapes.clone()),
            None => BlockSample::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_samples() {
        let mut grid = VoxelGrid::new();
        grid.set_solid(BlockPos::new(1, 0, 0));
        grid.set_shape(BlockPos::new(2, 0, 0), vec![Aabb::LOWER_SLAB]);

        assert_eq!(grid.block_at(BlockPos::new(1, 0, 0)), BlockSample::full());
        assert_eq!(grid.block_at(BlockPos::new(2, 0, 0)), BlockSample::Solid(vec![Aabb::LOWER_SLAB]));
        assert_eq!(grid.block_at(BlockPos::new(3, 0, 0)), BlockSample::Empty);

        grid.set_shape(BlockPos::new(2, 0, 0), Vec::new());
        assert_eq!(grid.len(), 1);

        grid.clear(BlockPos::new(1, 0, 0));
        assert_eq!(grid.block_at(BlockPos::new(1, 0, 0)), BlockSample::Empty);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_loaded_region() {
        let mut grid = VoxelGrid::new()
            .with_loaded_region(BlockPos::new(-8, 0, -8), BlockPos::new(7, 15, 7));
        grid.fill(BlockPos::new(0, 0, 0), BlockPos::new(1, 1, 1));
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.block_at(BlockPos::new(1, 1, 1)), BlockSample::full());
        assert_eq!(grid.block_at(BlockPos::new(8, 0, 0)), BlockSample::Unknown);
        assert_eq!(grid.block_at(BlockPos::new(0, -1, 0)), BlockSample::Unknown);
    }

    #[test]
    fn test_closure_query() {
        let floor = |pos: BlockPos| {
            if pos.y < 0 {
                BlockSample::full()
            } else {
                BlockSample::Empty
            }
        };
        assert_eq!(floor.block_at(BlockPos::new(5, -1, 5)), BlockSample::full());
        assert_eq!(floor.block_at(BlockPos::new(5, 0, 5)), BlockSample::Empty);
    }
}
