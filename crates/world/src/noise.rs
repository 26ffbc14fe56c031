//! Seeded coherent-noise sampling.
//!
//! Thin wrapper over Perlin noise exposing the contract generation code
//! depends on: deterministic 2D/3D samples in [-1, 1] for a given seed.

use noise::{NoiseFn, Perlin};

/// Deterministic noise field, seeded once per world.
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
}

impl NoiseField {
    /// Create a noise field for the given world seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample 2D noise. Returns a value in [-1.0, 1.0].
    #[inline]
    pub fn sample2(&self, x: f64, z: f64) -> f64 {
        self.perlin.get([x, z])
    }

    /// Sample 3D noise. Returns a value in [-1.0, 1.0].
    #[inline]
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }

    /// Sample 2D noise remapped to [0.0, 1.0].
    #[inline]
    pub fn sample2_unit(&self, x: f64, z: f64) -> f64 {
        (self.sample2(x, z) + 1.0) / 2.0
    }
}
