//! Heightmap generation from layered noise bands.
//!
//! The column height function is pure in (seed, wx, wz): it is called both
//! while filling chunks and later for spawn/biome lookups, and must agree
//! with itself across those call sites without any caching guarantees.

use crate::chunk::{ChunkPos, CHUNK_SIZE};
use crate::noise::NoiseField;

/// Spatial period of the continental noise band.
const CONTINENTAL_PERIOD: f64 = 1024.0;
/// Spatial period of the hills band.
const HILLS_PERIOD: f64 = 256.0;
/// Spatial period of the fine-detail band.
const DETAIL_PERIOD: f64 = 64.0;
/// Spatial period of the mountain band.
const MOUNTAIN_PERIOD: f64 = 140.0;

/// Ground height for one world column. Always >= 1.
///
/// Four bands combine nonlinearly on purpose: hills are scaled by the
/// continental value so ranges cluster on continental highs, and the
/// mountain band is cubed so peaks stay rare and steep. Detail adds fine
/// jitter on top.
pub fn height_at(noise: &NoiseField, world_x: i32, world_z: i32) -> i32 {
    let wx = world_x as f64;
    let wz = world_z as f64;

    let continental = noise.sample2_unit(wx / CONTINENTAL_PERIOD, wz / CONTINENTAL_PERIOD);
    let hills = noise.sample2_unit(wx / HILLS_PERIOD, wz / HILLS_PERIOD);
    let detail = noise.sample2_unit(wx / DETAIL_PERIOD, wz / DETAIL_PERIOD);
    let mountain = noise
        .sample2_unit(wx / MOUNTAIN_PERIOD, wz / MOUNTAIN_PERIOD)
        .powi(3)
        * 100.0;

    let height = continental * 10.0 + (hills * 40.0) * continental + mountain + detail * 8.0;
    (height.floor() as i32).max(1)
}

/// Per-chunk cache of ground heights, one entry per (x, z) column.
///
/// Produced once at generation time and retained by the chunk store for
/// O(1) ground and biome queries without re-touching the block buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    /// Indexed as heights[z][x] for cache-friendly iteration.
    heights: [[i32; CHUNK_SIZE]; CHUNK_SIZE],
}

impl Heightmap {
    /// Generate the heightmap for a chunk.
    pub fn generate(noise: &NoiseField, chunk_pos: ChunkPos) -> Self {
        let (origin_x, origin_z) = chunk_pos.world_origin();
        let mut heights = [[0i32; CHUNK_SIZE]; CHUNK_SIZE];

        for (local_z, row) in heights.iter_mut().enumerate() {
            for (local_x, cell) in row.iter_mut().enumerate() {
                *cell = height_at(
                    noise,
                    origin_x + local_x as i32,
                    origin_z + local_z as i32,
                );
            }
        }

        Self { heights }
    }

    /// Ground height at a chunk-local column.
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds.
    pub fn get(&self, local_x: usize, local_z: usize) -> i32 {
        assert!(local_x < CHUNK_SIZE, "local_x out of bounds");
        assert!(local_z < CHUNK_SIZE, "local_z out of bounds");
        self.heights[local_z][local_x]
    }

    /// Highest column in the chunk.
    pub fn max_height(&self) -> i32 {
        self.heights
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .max()
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_at_is_deterministic() {
        let noise = NoiseField::new(12345);
        for (wx, wz) in [(0, 0), (1000, -500), (-3000, 77), (160, 160)] {
            assert_eq!(height_at(&noise, wx, wz), height_at(&noise, wx, wz));
        }
        // A fresh field with the same seed agrees too.
        let again = NoiseField::new(12345);
        assert_eq!(height_at(&noise, 512, -512), height_at(&again, 512, -512));
    }

    #[test]
    fn height_is_at_least_one() {
        let noise = NoiseField::new(9);
        for wx in (-400..400).step_by(13) {
            for wz in (-400..400).step_by(17) {
                assert!(height_at(&noise, wx, wz) >= 1);
            }
        }
    }

    #[test]
    fn heightmap_matches_column_function() {
        let noise = NoiseField::new(777);
        let pos = ChunkPos::new(-3, 5);
        let heightmap = Heightmap::generate(&noise, pos);
        let (origin_x, origin_z) = pos.world_origin();

        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                assert_eq!(
                    heightmap.get(x, z),
                    height_at(&noise, origin_x + x as i32, origin_z + z as i32)
                );
            }
        }
    }

    #[test]
    fn different_seeds_produce_different_heightmaps() {
        let hm1 = Heightmap::generate(&NoiseField::new(111), ChunkPos::new(0, 0));
        let hm2 = Heightmap::generate(&NoiseField::new(222), ChunkPos::new(0, 0));
        assert_ne!(hm1, hm2);
    }
}
