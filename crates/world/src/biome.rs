//! Biome classification from ground height bands.

use std::fmt;

use crate::terrain::SNOW_LINE;
use crate::water::WATER_LEVEL;

/// Biome label derived purely from ground height vs. fixed bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Biome {
    /// Ground above the snow line.
    Snow,
    /// Within three blocks above sea level.
    Beach,
    /// Ground at or below sea level.
    Ocean,
    /// Everything in between.
    Plains,
}

impl Biome {
    /// Classify a column by its ground height.
    pub fn from_ground_height(height: i32) -> Self {
        if height > SNOW_LINE {
            Biome::Snow
        } else if height <= WATER_LEVEL {
            Biome::Ocean
        } else if height <= WATER_LEVEL + 3 {
            Biome::Beach
        } else {
            Biome::Plains
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Biome::Snow => "snow",
            Biome::Beach => "beach",
            Biome::Ocean => "ocean",
            Biome::Plains => "plains",
        };
        f.write_str(label)
    }
}
