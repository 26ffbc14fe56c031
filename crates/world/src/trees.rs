//! Tree placement: noise-gated trunk and leaf stamping.
//!
//! Trees are decided per world column from noise alone, never from chunk
//! contents, so a chunk can stamp the overhanging parts of a tree whose
//! base belongs to a neighboring chunk and the two stay in agreement.

use crate::block::BlockType;
use crate::chunk::{Chunk, CHUNK_SIZE};
use crate::heightmap::height_at;
use crate::noise::NoiseField;
use crate::terrain::SNOW_LINE;
use crate::water::WATER_LEVEL;

/// Leaf sphere radius around the trunk top.
pub const LEAF_RADIUS: i32 = 2;
/// Cells past each chunk edge that are evaluated for tree bases, so leaves
/// straddling the boundary still get stamped. Must cover `LEAF_RADIUS`.
const FOOTPRINT_MARGIN: i32 = 2;

const FOREST_PERIOD: f64 = 150.0;
const PLACEMENT_PERIOD: f64 = 7.0;
const TRUNK_HEIGHT_PERIOD: f64 = 13.0;
/// Offset applied to trunk-height noise coordinates to decorrelate the
/// height from the placement gate.
const TRUNK_HEIGHT_OFFSET: i32 = 1234;

/// A tree base decided for one world column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreePlan {
    /// Ground height of the base column; the trunk starts one above.
    pub base_y: i32,
    /// Trunk cell count, in [4, 6].
    pub trunk_height: i32,
}

/// Decide whether a world column hosts a tree base.
///
/// Gates: the ground must sit strictly above the beach band and at or below
/// the snow line. Denser forest noise lowers the placement threshold, so
/// forests fill in while lone trees stay rare.
pub fn tree_at(noise: &NoiseField, world_x: i32, world_z: i32) -> Option<TreePlan> {
    let ground = height_at(noise, world_x, world_z);
    if ground > SNOW_LINE || ground <= WATER_LEVEL + 3 {
        return None;
    }

    let wx = world_x as f64;
    let wz = world_z as f64;
    let forest = noise.sample2_unit(wx / FOREST_PERIOD, wz / FOREST_PERIOD);
    let placement = noise.sample2_unit(wx / PLACEMENT_PERIOD, wz / PLACEMENT_PERIOD);
    let threshold = if forest > 0.6 { 0.65 } else { 0.92 };
    if placement <= threshold {
        return None;
    }

    let height_noise = noise.sample2_unit(
        (world_x + TRUNK_HEIGHT_OFFSET) as f64 / TRUNK_HEIGHT_PERIOD,
        (world_z + TRUNK_HEIGHT_OFFSET) as f64 / TRUNK_HEIGHT_PERIOD,
    );
    Some(TreePlan {
        base_y: ground,
        trunk_height: 4 + (height_noise * 3.0).floor() as i32,
    })
}

/// Stamp every tree whose base falls inside the chunk's inflated footprint.
///
/// Trunk cells are written unconditionally (clipped to chunk bounds); leaf
/// cells are written only where the buffer currently holds air, so trees
/// never overwrite terrain, caves, or each other's trunks.
pub fn plant_trees(noise: &NoiseField, chunk: &mut Chunk) {
    let (origin_x, origin_z) = chunk.position().world_origin();
    let size = CHUNK_SIZE as i32;

    for x in -FOOTPRINT_MARGIN..(size + FOOTPRINT_MARGIN) {
        for z in -FOOTPRINT_MARGIN..(size + FOOTPRINT_MARGIN) {
            let Some(plan) = tree_at(noise, origin_x + x, origin_z + z) else {
                continue;
            };

            for i in 1..=plan.trunk_height {
                chunk.set_block(x, plan.base_y + i, z, BlockType::Trunk);
            }

            let top_y = plan.base_y + plan.trunk_height;
            for ly in -LEAF_RADIUS..=LEAF_RADIUS {
                for lx in -LEAF_RADIUS..=LEAF_RADIUS {
                    for lz in -LEAF_RADIUS..=LEAF_RADIUS {
                        let dist_sq = (lx * lx + ly * ly + lz * lz) as f64;
                        if dist_sq > (LEAF_RADIUS * LEAF_RADIUS) as f64 + 0.5 {
                            continue;
                        }
                        if chunk.block(x + lx, top_y + ly, z + lz) == BlockType::Air {
                            chunk.set_block(x + lx, top_y + ly, z + lz, BlockType::Leaf);
                        }
                    }
                }
            }
        }
    }
}
