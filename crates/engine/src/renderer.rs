//! Renderer collaborator boundary.

pub use voxelbrook_mesh::ChunkMesh;

use voxelbrook_world::ChunkPos;

/// Consumer of finished chunk geometry.
///
/// The engine hands over per-material buffers and a generation timestamp
/// (seconds since the store started, an explicit per-chunk render
/// parameter); building drawable objects and attaching them to a scene is
/// entirely the collaborator's business. `drop_chunk` releases whatever
/// the collaborator built when the chunk is evicted.
pub trait ChunkRenderer {
    fn build_chunk(&mut self, pos: ChunkPos, mesh: &ChunkMesh, generated_at: f32);
    fn drop_chunk(&mut self, pos: ChunkPos);
}

/// Renderer that discards everything; for headless use and tests.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl ChunkRenderer for NullRenderer {
    fn build_chunk(&mut self, _pos: ChunkPos, _mesh: &ChunkMesh, _generated_at: f32) {}
    fn drop_chunk(&mut self, _pos: ChunkPos) {}
}
