//! Chunk store and streaming manager.
//!
//! Tracks per-chunk lifecycle (`absent → pending → loaded`), decides which
//! chunks to request or evict around the player, and caches each loaded
//! chunk's heightmap and raw block buffer for O(1) queries.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Instant;

use anyhow::Result;
use glam::Vec3;
use tracing::{debug, info};

use voxelbrook_physics::VoxelSampler;
use voxelbrook_world::{Biome, BlockType, Chunk, ChunkPos, Heightmap, CHUNK_HEIGHT, CHUNK_SIZE};

use crate::renderer::ChunkRenderer;
use crate::worker::{GeneratedChunk, GenerationWorker, WorkerRequest};

/// Lifecycle state for one tracked chunk. Absence from the store means
/// "not requested".
enum ChunkState {
    /// Requested from the worker; no data yet.
    Pending,
    /// Generation results arrived and were handed to the renderer.
    Loaded(LoadedChunk),
}

struct LoadedChunk {
    chunk: Chunk,
    heightmap: Heightmap,
}

/// Safe spawn column delivered once, when the origin chunk loads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub x: f32,
    pub z: f32,
    pub ground_height: i32,
}

/// One-shot receiver for the spawn signal.
///
/// Resolved by the store exactly once; the player controller polls it
/// until the point arrives.
pub struct SpawnListener {
    rx: Receiver<SpawnPoint>,
}

impl SpawnListener {
    /// Take the spawn point if the origin chunk has loaded.
    pub fn try_take(&self) -> Option<SpawnPoint> {
        match self.rx.try_recv() {
            Ok(point) => Some(point),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Streaming chunk store around a single player.
pub struct ChunkStore {
    seed: u32,
    render_distance: i32,
    chunks: HashMap<ChunkPos, ChunkState>,
    worker: GenerationWorker,
    spawn_tx: Option<Sender<SpawnPoint>>,
    started: Instant,
}

impl ChunkStore {
    /// Create the store and its generation worker. The returned listener
    /// resolves once, when the origin chunk finishes loading.
    pub fn new(seed: u32, render_distance: i32) -> Result<(Self, SpawnListener)> {
        let worker = GenerationWorker::start(seed)?;
        let (spawn_tx, spawn_rx) = mpsc::channel();
        let store = Self {
            seed,
            render_distance,
            chunks: HashMap::new(),
            worker,
            spawn_tx: Some(spawn_tx),
            started: Instant::now(),
        };
        Ok((store, SpawnListener { rx: spawn_rx }))
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Per-tick streaming step: drain finished generations, request every
    /// absent chunk within render distance of the player, evict everything
    /// outside it.
    pub fn update(&mut self, player_position: Vec3, renderer: &mut impl ChunkRenderer) {
        while let Some(result) = self.worker.try_recv() {
            self.apply_result(result, renderer);
        }

        let center = ChunkPos::containing(
            player_position.x.floor() as i32,
            player_position.z.floor() as i32,
        );

        for dx in -self.render_distance..=self.render_distance {
            for dz in -self.render_distance..=self.render_distance {
                let pos = ChunkPos::new(center.x + dx, center.z + dz);
                // Re-requesting a pending or loaded chunk is forbidden; only
                // absent coordinates get a request.
                if !self.chunks.contains_key(&pos) {
                    self.chunks.insert(pos, ChunkState::Pending);
                    self.worker.request(WorkerRequest::Generate {
                        pos,
                        seed: self.seed,
                    });
                }
            }
        }

        let render_distance = self.render_distance;
        let stale: Vec<ChunkPos> = self
            .chunks
            .keys()
            .filter(|pos| {
                (pos.x - center.x).abs() > render_distance
                    || (pos.z - center.z).abs() > render_distance
            })
            .copied()
            .collect();
        for pos in stale {
            self.chunks.remove(&pos);
            renderer.drop_chunk(pos);
            debug!(chunk = %pos, "evicted chunk");
        }
    }

    /// Accept a generation result.
    ///
    /// Only a chunk that is still pending may load; a completion for an
    /// evicted or already-loaded coordinate is stale (the eviction/worker
    /// race) and is discarded without effect.
    pub fn apply_result(&mut self, result: GeneratedChunk, renderer: &mut impl ChunkRenderer) {
        match self.chunks.get(&result.pos) {
            Some(ChunkState::Pending) => {}
            _ => {
                debug!(chunk = %result.pos, "discarding stale generation result");
                return;
            }
        }

        let generated_at = self.started.elapsed().as_secs_f32();
        renderer.build_chunk(result.pos, &result.mesh, generated_at);
        debug!(chunk = %result.pos, "chunk loaded");

        let origin = result.pos == ChunkPos::new(0, 0);
        self.chunks.insert(
            result.pos,
            ChunkState::Loaded(LoadedChunk {
                chunk: result.chunk,
                heightmap: result.heightmap,
            }),
        );

        if origin {
            self.signal_spawn();
        }
    }

    /// Resolve the one-shot spawn signal with the origin chunk's center
    /// column. No-op after the first call.
    fn signal_spawn(&mut self) {
        let Some(tx) = self.spawn_tx.take() else {
            return;
        };
        let x = CHUNK_SIZE as i32 / 2;
        let z = CHUNK_SIZE as i32 / 2;
        let point = SpawnPoint {
            x: x as f32,
            z: z as f32,
            ground_height: self.ground_height(x, z),
        };
        info!(?point, "spawn point ready");
        let _ = tx.send(point);
    }

    /// Block at a world coordinate.
    ///
    /// Unloaded chunks and out-of-vertical-bounds coordinates read as air;
    /// collision code never distinguishes "no data" from empty space.
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        if y < 0 || y >= CHUNK_HEIGHT as i32 {
            return BlockType::Air;
        }
        match self.chunks.get(&ChunkPos::containing(x, z)) {
            Some(ChunkState::Loaded(loaded)) => loaded.chunk.block(
                x.rem_euclid(CHUNK_SIZE as i32),
                y,
                z.rem_euclid(CHUNK_SIZE as i32),
            ),
            _ => BlockType::Air,
        }
    }

    /// Ground height from the cached heightmap, or 0 while the chunk is
    /// not loaded. A corrupt or missing height must never reach spawn or
    /// collision math.
    pub fn ground_height(&self, x: i32, z: i32) -> i32 {
        match self.chunks.get(&ChunkPos::containing(x, z)) {
            Some(ChunkState::Loaded(loaded)) => loaded.heightmap.get(
                x.rem_euclid(CHUNK_SIZE as i32) as usize,
                z.rem_euclid(CHUNK_SIZE as i32) as usize,
            ),
            _ => 0,
        }
    }

    /// Biome label for a world column, derived purely from ground height.
    pub fn biome_at(&self, x: i32, z: i32) -> Biome {
        Biome::from_ground_height(self.ground_height(x, z))
    }

    pub fn loaded_count(&self) -> usize {
        self.chunks
            .values()
            .filter(|state| matches!(state, ChunkState::Loaded(_)))
            .count()
    }

    pub fn pending_count(&self) -> usize {
        self.chunks
            .values()
            .filter(|state| matches!(state, ChunkState::Pending))
            .count()
    }

    pub fn is_pending(&self, pos: ChunkPos) -> bool {
        matches!(self.chunks.get(&pos), Some(ChunkState::Pending))
    }

    pub fn is_loaded(&self, pos: ChunkPos) -> bool {
        matches!(self.chunks.get(&pos), Some(ChunkState::Loaded(_)))
    }

    /// Stop the generation worker and drop all tracked chunks.
    pub fn shutdown(self) {
        self.worker.shutdown();
    }
}

impl VoxelSampler for ChunkStore {
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        ChunkStore::block_at(self, x, y, z)
    }
}
