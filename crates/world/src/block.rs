//! Block type tags and their visibility/collision classes.

/// Block type stored per voxel.
///
/// Discriminants are stable: they double as the raw byte values inside chunk
/// buffers, and `Air = 0` always means "no solid, no collision, fully
/// transparent".
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BlockType {
    Air = 0,
    Stone = 1,
    Dirt = 2,
    Grass = 3,
    Sand = 4,
    Snow = 5,
    Trunk = 6,
    Leaf = 7,
    Water = 9,
    Bedrock = 10,
}

impl BlockType {
    /// Decode a raw buffer byte. Unknown values map to air.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => BlockType::Stone,
            2 => BlockType::Dirt,
            3 => BlockType::Grass,
            4 => BlockType::Sand,
            5 => BlockType::Snow,
            6 => BlockType::Trunk,
            7 => BlockType::Leaf,
            9 => BlockType::Water,
            10 => BlockType::Bedrock,
            _ => BlockType::Air,
        }
    }

    /// Whether a face against this block may need to render.
    ///
    /// The transparent set is fixed: air, water, and leaves.
    #[inline]
    pub fn is_transparent(self) -> bool {
        matches!(self, BlockType::Air | BlockType::Water | BlockType::Leaf)
    }

    /// Whether the block participates in collision. Water is passable.
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockType::Air | BlockType::Water)
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockType::Air
    }
}

impl Default for BlockType {
    fn default() -> Self {
        BlockType::Air
    }
}
