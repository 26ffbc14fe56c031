//! Per-face corner offsets and UV tables.
//!
//! Corners sit at ±0.5 around the cell's integer coordinate, so a voxel at
//! (x, y, z) occupies the unit cube centered there.

const S: f32 = 0.5;

/// Axis-aligned face direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceDir {
    /// +Y
    Up,
    /// -Y
    Down,
    /// +X
    East,
    /// -X
    West,
    /// +Z
    North,
    /// -Z
    South,
}

/// Geometry template for one face direction: neighbor offset, the four
/// corner offsets in winding order, and one UV pair per corner.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub dir: FaceDir,
    pub offset: [i32; 3],
    pub corners: [[f32; 3]; 4],
    pub uvs: [f32; 8],
}

/// All six faces. Corner winding and UV layout are load-bearing: they fix
/// the visible orientation of every quad in the world.
pub const FACES: [Face; 6] = [
    Face {
        dir: FaceDir::Up,
        offset: [0, 1, 0],
        corners: [[-S, S, S], [-S, S, -S], [S, S, -S], [S, S, S]],
        uvs: [0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0],
    },
    Face {
        dir: FaceDir::Down,
        offset: [0, -1, 0],
        corners: [[-S, -S, -S], [-S, -S, S], [S, -S, S], [S, -S, -S]],
        uvs: [0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0],
    },
    Face {
        dir: FaceDir::East,
        offset: [1, 0, 0],
        corners: [[S, -S, S], [S, -S, -S], [S, S, -S], [S, S, S]],
        uvs: [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
    },
    Face {
        dir: FaceDir::West,
        offset: [-1, 0, 0],
        corners: [[-S, -S, -S], [-S, -S, S], [-S, S, S], [-S, S, -S]],
        uvs: [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
    },
    Face {
        dir: FaceDir::North,
        offset: [0, 0, 1],
        corners: [[-S, -S, S], [S, -S, S], [S, S, S], [-S, S, S]],
        uvs: [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
    },
    Face {
        dir: FaceDir::South,
        offset: [0, 0, -1],
        corners: [[S, -S, -S], [-S, -S, -S], [-S, S, -S], [S, S, -S]],
        uvs: [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
    },
];

/// The up face, used directly by the water surface special case.
pub const UP_FACE: &Face = &FACES[0];
