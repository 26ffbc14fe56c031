//! Terrain generation: column filling plus the fixed carver pass order.

use tracing::{debug, instrument};

use crate::block::BlockType;
use crate::caves;
use crate::chunk::{Chunk, ChunkPos, CHUNK_SIZE};
use crate::heightmap::Heightmap;
use crate::noise::NoiseField;
use crate::trees;
use crate::water::{self, WATER_LEVEL};

/// Ground heights strictly above this are capped with snow.
pub const SNOW_LINE: i32 = 65;

/// Fills chunks with terrain from a seeded noise field.
///
/// Pass order is fixed and observable in the output: terrain columns, then
/// water, then caves, then trees.
pub struct TerrainGenerator {
    noise: NoiseField,
}

impl TerrainGenerator {
    /// Create a terrain generator for the given world seed.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: NoiseField::new(seed),
        }
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.noise.seed()
    }

    /// Generate the block buffer and heightmap for a chunk.
    #[instrument(skip(self), fields(chunk_pos = %chunk_pos, seed = self.noise.seed()))]
    pub fn generate_chunk(&self, chunk_pos: ChunkPos) -> (Chunk, Heightmap) {
        debug!("generating chunk");
        let mut chunk = Chunk::new(chunk_pos);
        let heightmap = Heightmap::generate(&self.noise, chunk_pos);
        let (origin_x, origin_z) = chunk_pos.world_origin();

        // Terrain pass: one column per (x, z).
        for local_z in 0..CHUNK_SIZE {
            for local_x in 0..CHUNK_SIZE {
                self.fill_column(
                    &mut chunk,
                    local_x as i32,
                    local_z as i32,
                    heightmap.get(local_x, local_z),
                );
            }
        }

        // Water pass: flood low columns up to sea level.
        for local_z in 0..CHUNK_SIZE {
            for local_x in 0..CHUNK_SIZE {
                water::flood_column(
                    &mut chunk,
                    local_x as i32,
                    local_z as i32,
                    heightmap.get(local_x, local_z),
                );
            }
        }

        // Cave pass: 3D noise carving below the surface roof.
        for local_z in 0..CHUNK_SIZE {
            for local_x in 0..CHUNK_SIZE {
                caves::carve_column(
                    &self.noise,
                    &mut chunk,
                    local_x as i32,
                    local_z as i32,
                    origin_x + local_x as i32,
                    origin_z + local_z as i32,
                    heightmap.get(local_x, local_z),
                );
            }
        }

        // Tree pass: evaluated over the inflated footprint so neighbors'
        // canopies land in this chunk too.
        trees::plant_trees(&self.noise, &mut chunk);

        debug!("chunk generation complete");
        (chunk, heightmap)
    }

    /// Fill one vertical column: bedrock floor, stone body, dirt cap, and an
    /// elevation-dependent surface block.
    fn fill_column(&self, chunk: &mut Chunk, x: i32, z: i32, ground_height: i32) {
        for y in 0..=ground_height {
            let block = if y == 0 {
                BlockType::Bedrock
            } else if y == ground_height {
                self.surface_block(y)
            } else if y >= ground_height - 3 {
                BlockType::Dirt
            } else {
                BlockType::Stone
            };
            chunk.set_block(x, y, z, block);
        }
    }

    /// Surface block for a column topping out at `height`: snow above the
    /// snow line, sand in the beach band just above sea level, grass
    /// everywhere else.
    fn surface_block(&self, height: i32) -> BlockType {
        if height > SNOW_LINE {
            BlockType::Snow
        } else if height > WATER_LEVEL && height <= WATER_LEVEL + 3 {
            BlockType::Sand
        } else {
            BlockType::Grass
        }
    }
}
