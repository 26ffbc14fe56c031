//! Cave carving via 3D noise thresholding.

use crate::block::BlockType;
use crate::chunk::Chunk;
use crate::noise::NoiseField;

/// Spatial scale of the cave noise. Tuned constant; changing it reshapes
/// every cave in existing worlds.
pub const CAVE_NOISE_SCALE: f64 = 48.0;
/// Absolute noise value above which a cell is carved out.
pub const CAVE_THRESHOLD: f64 = 0.72;

/// Carve caves through one column.
///
/// Only the band [1, ground_height - 5) is eligible: bedrock stays intact
/// and a 5-block roof below the surface prevents caves from breaking
/// through the ground.
pub fn carve_column(
    noise: &NoiseField,
    chunk: &mut Chunk,
    x: i32,
    z: i32,
    world_x: i32,
    world_z: i32,
    ground_height: i32,
) {
    for y in 1..(ground_height - 5) {
        let value = noise.sample3(
            world_x as f64 / CAVE_NOISE_SCALE,
            y as f64 / CAVE_NOISE_SCALE,
            world_z as f64 / CAVE_NOISE_SCALE,
        );
        if value.abs() > CAVE_THRESHOLD {
            chunk.set_block(x, y, z, BlockType::Air);
        }
    }
}
