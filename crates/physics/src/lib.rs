//! Player kinematics and voxel-grid collision.

mod collision;
mod player;

pub use collision::*;
pub use player::*;
