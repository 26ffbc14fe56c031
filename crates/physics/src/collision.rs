//! Cylinder vs. voxel-grid collision test.

use glam::Vec3;
use voxelbrook_world::BlockType;

/// Read-only voxel access for collision queries.
///
/// Implementors must answer for any world coordinate; "no data" (unloaded
/// chunk, out of vertical bounds) is reported as air, so collision code
/// never distinguishes missing chunks from empty space.
pub trait VoxelSampler {
    /// Block at the given world cell.
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType;
}

impl<F> VoxelSampler for F
where
    F: Fn(i32, i32, i32) -> BlockType,
{
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        self(x, y, z)
    }
}

/// Upright cylinder anchored at the feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub radius: f32,
    pub height: f32,
}

/// Whether the cylinder at `position` (feet anchor) overlaps any solid cell.
///
/// Every grid cell whose integer bounds overlap the cylinder's bounding box
/// is considered; for each solid one, the squared distance from the
/// cylinder's horizontal center to the nearest point of the cell's square
/// footprint decides the hit. Air and water are passable.
pub fn cylinder_collides(
    sampler: &impl VoxelSampler,
    cylinder: Cylinder,
    position: Vec3,
) -> bool {
    let min_x = (position.x - cylinder.radius).floor() as i32;
    let max_x = (position.x + cylinder.radius).ceil() as i32;
    let min_y = position.y.floor() as i32;
    let max_y = (position.y + cylinder.height).ceil() as i32;
    let min_z = (position.z - cylinder.radius).floor() as i32;
    let max_z = (position.z + cylinder.radius).ceil() as i32;

    let radius_sq = cylinder.radius * cylinder.radius;

    for y in min_y..max_y {
        for x in min_x..max_x {
            for z in min_z..max_z {
                if !sampler.block_at(x, y, z).is_solid() {
                    continue;
                }
                let closest_x = position.x.clamp(x as f32, x as f32 + 1.0);
                let closest_z = position.z.clamp(z as f32, z as f32 + 1.0);
                let dx = closest_x - position.x;
                let dz = closest_z - position.z;
                if dx * dx + dz * dz < radius_sq {
                    return true;
                }
            }
        }
    }
    false
}
