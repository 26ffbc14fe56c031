//! Chunk meshing: per-material vertex/UV/index buffers with per-face
//! visibility culling.
//!
//! The mesher walks a filled chunk buffer and emits the minimal set of
//! visible quads, grouped by material, ready for upload by whatever
//! renderer consumes them. The single most important property of the
//! output is buffer integrity: every emitted index is strictly less than
//! the buffer's vertex count, and buffers that would violate that are
//! dropped rather than handed out.

mod face;

pub use face::{Face, FaceDir, FACES, UP_FACE};

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, error};
use voxelbrook_world::{BlockType, Chunk, CHUNK_HEIGHT, CHUNK_SIZE};

/// Material slot a quad is assigned to.
///
/// One material per block type, except grass, whose faces split by
/// orientation, and bedrock, which reuses the stone material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Material {
    GrassTop,
    GrassSide,
    Dirt,
    Stone,
    Sand,
    Snow,
    Trunk,
    Leaf,
    Water,
}

impl Material {
    /// Stable name used by renderer collaborators to look up textures.
    pub fn name(self) -> &'static str {
        match self {
            Material::GrassTop => "grass_top",
            Material::GrassSide => "grass_side",
            Material::Dirt => "dirt",
            Material::Stone => "stone",
            Material::Sand => "sand",
            Material::Snow => "snow",
            Material::Trunk => "trunk",
            Material::Leaf => "leaf",
            Material::Water => "water",
        }
    }

    /// Fixed block-type to material table for the generic face loop.
    /// Grass and water take their special-cased paths before this is
    /// consulted; air has no material.
    fn for_block(block: BlockType) -> Option<Material> {
        match block {
            BlockType::Air => None,
            BlockType::Stone | BlockType::Bedrock => Some(Material::Stone),
            BlockType::Dirt => Some(Material::Dirt),
            BlockType::Grass => Some(Material::GrassSide),
            BlockType::Sand => Some(Material::Sand),
            BlockType::Snow => Some(Material::Snow),
            BlockType::Trunk => Some(Material::Trunk),
            BlockType::Leaf => Some(Material::Leaf),
            BlockType::Water => Some(Material::Water),
        }
    }
}

/// Triangle index buffer at the narrowest width that fits the mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(v) => v.len(),
            IndexBuffer::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest index referenced by the buffer.
    pub fn max_index(&self) -> Option<u32> {
        match self {
            IndexBuffer::U16(v) => v.iter().max().map(|&i| u32::from(i)),
            IndexBuffer::U32(v) => v.iter().max().copied(),
        }
    }
}

/// Geometry buffers for one material: parallel positions (3 floats per
/// vertex), UVs (2 floats per vertex), and triangle indices.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: IndexBuffer,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Geometry that failed the post-pass and must not reach a renderer.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Nothing to draw for this material; a legitimate outcome, not a fault.
    #[error("empty geometry for material {material}")]
    Empty { material: &'static str },
    /// An index references a vertex that does not exist. This is a
    /// generation-integrity defect; the buffer is dropped instead of
    /// producing a corrupt render.
    #[error("index {max_index} out of range for {vertex_count} vertices in material {material}")]
    IndexOutOfRange {
        material: &'static str,
        max_index: u32,
        vertex_count: usize,
    },
}

/// Finished mesh for one chunk, keyed by material.
///
/// Materials with nothing to draw are absent; every geometry present
/// satisfies `max(indices) < vertex_count`.
#[derive(Debug, Clone, Default)]
pub struct ChunkMesh {
    pub geometries: BTreeMap<Material, Geometry>,
}

impl ChunkMesh {
    pub fn geometry(&self, material: Material) -> Option<&Geometry> {
        self.geometries.get(&material)
    }

    pub fn total_vertices(&self) -> usize {
        self.geometries.values().map(Geometry::vertex_count).sum()
    }

    pub fn total_indices(&self) -> usize {
        self.geometries.values().map(|g| g.indices.len()).sum()
    }
}

/// Accumulates quads for one material before the post-pass.
#[derive(Debug, Default)]
struct GeometryBuilder {
    positions: Vec<f32>,
    uvs: Vec<f32>,
    indices: Vec<u32>,
}

impl GeometryBuilder {
    /// Append one quad: 4 vertices, 4 UV pairs, 2 triangles indexed
    /// `[0, 1, 2, 0, 2, 3]` relative to the face's base vertex.
    fn push_face(&mut self, x: i32, y: i32, z: i32, face: &Face) {
        let base = (self.positions.len() / 3) as u32;
        for corner in &face.corners {
            self.positions.push(x as f32 + corner[0]);
            self.positions.push(y as f32 + corner[1]);
            self.positions.push(z as f32 + corner[2]);
        }
        self.uvs.extend_from_slice(&face.uvs);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Post-pass: verify integrity and pick the narrowest index width that
    /// fits the vertex count.
    fn finish(self, material: Material) -> Result<Geometry, GeometryError> {
        if self.positions.is_empty() || self.indices.is_empty() {
            return Err(GeometryError::Empty {
                material: material.name(),
            });
        }

        let vertex_count = self.positions.len() / 3;
        let max_index = self.indices.iter().copied().max().unwrap_or(0);
        if max_index as usize >= vertex_count {
            return Err(GeometryError::IndexOutOfRange {
                material: material.name(),
                max_index,
                vertex_count,
            });
        }

        let indices = if max_index < u32::from(u16::MAX) + 1 {
            IndexBuffer::U16(self.indices.into_iter().map(|i| i as u16).collect())
        } else {
            IndexBuffer::U32(self.indices)
        };

        Ok(Geometry {
            positions: self.positions,
            uvs: self.uvs,
            indices,
        })
    }
}

/// A face renders when exactly one side is transparent, or when both sides
/// are transparent but of different block types (water against leaf must
/// still draw the boundary). Opaque-opaque and identical transparent pairs
/// never emit.
#[inline]
fn face_visible(cell: BlockType, neighbor: BlockType) -> bool {
    let cell_transparent = cell.is_transparent();
    let neighbor_transparent = neighbor.is_transparent();
    cell_transparent != neighbor_transparent || (cell_transparent && cell != neighbor)
}

/// Mesh a filled chunk into per-material geometry buffers.
pub fn mesh_chunk(chunk: &Chunk) -> ChunkMesh {
    let mut builders: BTreeMap<Material, GeometryBuilder> = BTreeMap::new();

    for y in 0..CHUNK_HEIGHT as i32 {
        for x in 0..CHUNK_SIZE as i32 {
            for z in 0..CHUNK_SIZE as i32 {
                let block = chunk.block(x, y, z);
                match block {
                    BlockType::Air => {}
                    BlockType::Grass => mesh_grass(chunk, &mut builders, x, y, z),
                    BlockType::Water => mesh_water_surface(chunk, &mut builders, x, y, z),
                    _ => mesh_generic(chunk, &mut builders, x, y, z, block),
                }
            }
        }
    }

    let mut mesh = ChunkMesh::default();
    for (material, builder) in builders {
        match builder.finish(material) {
            Ok(geometry) => {
                mesh.geometries.insert(material, geometry);
            }
            Err(err @ GeometryError::Empty { .. }) => {
                debug!(%err, "skipping empty material buffer");
            }
            Err(err @ GeometryError::IndexOutOfRange { .. }) => {
                error!(%err, chunk = %chunk.position(), "dropping corrupt material buffer");
            }
        }
    }
    mesh
}

/// Generic path: one material for all six faces.
fn mesh_generic(
    chunk: &Chunk,
    builders: &mut BTreeMap<Material, GeometryBuilder>,
    x: i32,
    y: i32,
    z: i32,
    block: BlockType,
) {
    let Some(material) = Material::for_block(block) else {
        return;
    };
    for face in &FACES {
        let neighbor = chunk.block(x + face.offset[0], y + face.offset[1], z + face.offset[2]);
        if face_visible(block, neighbor) {
            builders.entry(material).or_default().push_face(x, y, z, face);
        }
    }
}

/// Grass splits by orientation: a distinct top material, dirt underneath,
/// grass-side around.
fn mesh_grass(
    chunk: &Chunk,
    builders: &mut BTreeMap<Material, GeometryBuilder>,
    x: i32,
    y: i32,
    z: i32,
) {
    for face in &FACES {
        let neighbor = chunk.block(x + face.offset[0], y + face.offset[1], z + face.offset[2]);
        if !face_visible(BlockType::Grass, neighbor) {
            continue;
        }
        let material = match face.dir {
            FaceDir::Up => Material::GrassTop,
            FaceDir::Down => Material::Dirt,
            _ => Material::GrassSide,
        };
        builders.entry(material).or_default().push_face(x, y, z, face);
    }
}

/// Water renders as an infinite volume: only the top skin matters, and only
/// where air sits directly above.
fn mesh_water_surface(
    chunk: &Chunk,
    builders: &mut BTreeMap<Material, GeometryBuilder>,
    x: i32,
    y: i32,
    z: i32,
) {
    if y < CHUNK_HEIGHT as i32 - 1 && chunk.block(x, y + 1, z) == BlockType::Air {
        builders
            .entry(Material::Water)
            .or_default()
            .push_face(x, y, z, UP_FACE);
    }
}
