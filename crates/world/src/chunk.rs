//! Chunk coordinates and the per-chunk block buffer.

use std::fmt;

use crate::block::BlockType;

/// Chunk width (X axis) in voxels.
pub const CHUNK_SIZE: usize = 16;
/// Chunk height (Y axis) in voxels.
pub const CHUNK_HEIGHT: usize = 128;
/// Total voxel count per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE;

/// Chunk coordinate (X, Z) in chunk space.
///
/// Structured key for chunk maps; implements `Ord` so `BTreeMap`/`BTreeSet`
/// iteration stays deterministic (sorts by x, then z).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the given world column.
    pub fn containing(world_x: i32, world_z: i32) -> Self {
        Self {
            x: world_x.div_euclid(CHUNK_SIZE as i32),
            z: world_z.div_euclid(CHUNK_SIZE as i32),
        }
    }

    /// World-space coordinates of the chunk's (0, 0) column.
    pub fn world_origin(self) -> (i32, i32) {
        (self.x * CHUNK_SIZE as i32, self.z * CHUNK_SIZE as i32)
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Block buffer for one chunk, linearized as `y * 16 * 16 + x * 16 + z`.
///
/// Owned exclusively by its chunk and immutable once generation finishes;
/// there are no in-place edits after the carver passes run.
pub struct Chunk {
    position: ChunkPos,
    blocks: Vec<BlockType>,
}

impl Chunk {
    /// Allocate a fresh chunk filled with air.
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            blocks: vec![BlockType::Air; CHUNK_VOLUME],
        }
    }

    #[inline]
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    #[inline]
    fn index(x: i32, y: i32, z: i32) -> usize {
        (y as usize * CHUNK_SIZE * CHUNK_SIZE) + (x as usize * CHUNK_SIZE) + z as usize
    }

    #[inline]
    fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE as i32).contains(&x)
            && (0..CHUNK_HEIGHT as i32).contains(&y)
            && (0..CHUNK_SIZE as i32).contains(&z)
    }

    /// Fetch a block by chunk-local coordinates.
    ///
    /// Out-of-bounds lookups return air so neighbor checks at chunk edges
    /// and above the column top behave as empty space.
    pub fn block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if Self::in_bounds(x, y, z) {
            self.blocks[Self::index(x, y, z)]
        } else {
            BlockType::Air
        }
    }

    /// Write a block by chunk-local coordinates; out-of-bounds writes are
    /// dropped. Feature carvers rely on this when stamping structures whose
    /// footprint straddles the chunk edge.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) {
        if Self::in_bounds(x, y, z) {
            self.blocks[Self::index(x, y, z)] = block;
        }
    }

    /// Borrow the raw linear buffer.
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chunk_is_all_air() {
        let chunk = Chunk::new(ChunkPos::new(0, 0));
        assert!(chunk.blocks().iter().all(|b| b.is_air()));
    }

    #[test]
    fn set_and_get_block() {
        let mut chunk = Chunk::new(ChunkPos::new(2, -3));
        chunk.set_block(1, 40, 15, BlockType::Stone);
        assert_eq!(chunk.block(1, 40, 15), BlockType::Stone);
        assert_eq!(chunk.position(), ChunkPos::new(2, -3));
    }

    #[test]
    fn linear_index_matches_layout() {
        // y * 16 * 16 + x * 16 + z
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.set_block(3, 2, 7, BlockType::Dirt);
        assert_eq!(chunk.blocks()[2 * 256 + 3 * 16 + 7], BlockType::Dirt);
    }

    #[test]
    fn out_of_bounds_reads_are_air() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.set_block(0, 0, 0, BlockType::Bedrock);
        assert_eq!(chunk.block(-1, 0, 0), BlockType::Air);
        assert_eq!(chunk.block(0, CHUNK_HEIGHT as i32, 0), BlockType::Air);
        assert_eq!(chunk.block(0, -1, 0), BlockType::Air);
        assert_eq!(chunk.block(16, 0, 0), BlockType::Air);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.set_block(-1, 0, 0, BlockType::Stone);
        chunk.set_block(0, 200, 0, BlockType::Stone);
        assert!(chunk.blocks().iter().all(|b| b.is_air()));
    }

    #[test]
    fn containing_handles_negative_world_coords() {
        assert_eq!(ChunkPos::containing(0, 0), ChunkPos::new(0, 0));
        assert_eq!(ChunkPos::containing(15, 15), ChunkPos::new(0, 0));
        assert_eq!(ChunkPos::containing(16, 0), ChunkPos::new(1, 0));
        assert_eq!(ChunkPos::containing(-1, -16), ChunkPos::new(-1, -1));
        assert_eq!(ChunkPos::containing(-17, 0), ChunkPos::new(-2, 0));
    }

    #[test]
    fn chunk_pos_ordering_is_x_then_z() {
        assert!(ChunkPos::new(0, 5) < ChunkPos::new(1, 0));
        assert!(ChunkPos::new(0, 0) < ChunkPos::new(0, 1));
    }
}
