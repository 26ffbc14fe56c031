//! Deterministic voxel world generation.
//!
//! Turns a world seed into filled chunk buffers: layered-noise heightmaps,
//! block-type columns, then water, caves, and trees applied in a fixed order.

mod biome;
mod block;
mod caves;
mod chunk;
mod heightmap;
mod noise;
mod terrain;
mod trees;
mod water;

pub use biome::*;
pub use block::*;
pub use chunk::*;
pub use heightmap::*;
pub use noise::*;
pub use terrain::*;
pub use trees::*;

pub use caves::{CAVE_NOISE_SCALE, CAVE_THRESHOLD};
pub use water::WATER_LEVEL;
