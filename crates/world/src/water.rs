//! Water fill pass.

use crate::block::BlockType;
use crate::chunk::Chunk;

/// Sea level: columns whose ground sits below this are flooded up to it.
pub const WATER_LEVEL: i32 = 30;

/// Flood one column with water from just above the ground up to and
/// including sea level. Only air is replaced; solids carved or stamped by
/// earlier passes are left alone.
pub fn flood_column(chunk: &mut Chunk, x: i32, z: i32, ground_height: i32) {
    if ground_height >= WATER_LEVEL {
        return;
    }
    for y in (ground_height + 1)..=WATER_LEVEL {
        if chunk.block(x, y, z) == BlockType::Air {
            chunk.set_block(x, y, z, BlockType::Water);
        }
    }
}
