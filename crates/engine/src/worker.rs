//! Background chunk generation over a tagged message protocol.
//!
//! One dedicated worker thread owns the seeded generator and mesher. Each
//! request is independent; results return asynchronously and may arrive in
//! any order. Buffers move by ownership through the channel, never copied.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use voxelbrook_mesh::{mesh_chunk, ChunkMesh};
use voxelbrook_world::{Chunk, ChunkPos, Heightmap, TerrainGenerator};

/// Request to the generation worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRequest {
    /// Generate and mesh the chunk at `pos` for the given world seed.
    Generate { pos: ChunkPos, seed: u32 },
}

/// Completed generation for one chunk: the raw block buffer, its heightmap,
/// and per-material geometry, all owned by the message.
pub struct GeneratedChunk {
    pub pos: ChunkPos,
    pub chunk: Chunk,
    pub heightmap: Heightmap,
    pub mesh: ChunkMesh,
}

/// Handle to the generation worker thread.
///
/// Requests are fire-and-forget; completions are polled with `try_recv`.
/// The caller (the chunk store) is responsible for issuing at most one
/// outstanding request per chunk coordinate.
pub struct GenerationWorker {
    requests: Sender<WorkerRequest>,
    results: Receiver<GeneratedChunk>,
    join: JoinHandle<()>,
}

impl GenerationWorker {
    /// Start the worker thread with an initially seeded generator.
    pub fn start(seed: u32) -> Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<WorkerRequest>();
        let (result_tx, result_rx) = mpsc::channel::<GeneratedChunk>();

        let join = thread::Builder::new()
            .name("chunk-generation".into())
            .spawn(move || worker_loop(seed, request_rx, result_tx))
            .context("failed to spawn chunk generation worker")?;

        Ok(Self {
            requests: request_tx,
            results: result_rx,
            join,
        })
    }

    /// Send a request without waiting. A dead worker is logged, not fatal:
    /// the requesting chunk simply stays pending.
    pub fn request(&self, request: WorkerRequest) {
        if self.requests.send(request).is_err() {
            warn!(?request, "generation worker is gone; dropping request");
        }
    }

    /// Pull one completed chunk if any is ready.
    pub fn try_recv(&self) -> Option<GeneratedChunk> {
        match self.results.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Stop the worker and wait for it to exit.
    pub fn shutdown(self) {
        let Self {
            requests,
            results,
            join,
        } = self;
        drop(requests);
        drop(results);
        if join.join().is_err() {
            warn!("generation worker panicked during shutdown");
        }
    }
}

fn worker_loop(
    initial_seed: u32,
    requests: Receiver<WorkerRequest>,
    results: Sender<GeneratedChunk>,
) {
    let mut generator = TerrainGenerator::new(initial_seed);
    info!(seed = initial_seed, "generation worker started");

    while let Ok(request) = requests.recv() {
        match request {
            WorkerRequest::Generate { pos, seed } => {
                if seed != generator.seed() {
                    debug!(seed, "reseeding generation worker");
                    generator = TerrainGenerator::new(seed);
                }
                let (chunk, heightmap) = generator.generate_chunk(pos);
                let mesh = mesh_chunk(&chunk);
                let result = GeneratedChunk {
                    pos,
                    chunk,
                    heightmap,
                    mesh,
                };
                if results.send(result).is_err() {
                    // Receiver gone: the store shut down mid-generation.
                    break;
                }
            }
        }
    }
    debug!("generation worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn generates_requested_chunks_out_of_order_legally() {
        let worker = GenerationWorker::start(77).expect("worker start");
        let positions = [ChunkPos::new(0, 0), ChunkPos::new(1, 0), ChunkPos::new(0, 1)];
        for &pos in &positions {
            worker.request(WorkerRequest::Generate { pos, seed: 77 });
        }

        let mut received = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(30);
        while received.len() < positions.len() && Instant::now() < deadline {
            match worker.try_recv() {
                Some(result) => received.push(result),
                None => thread::sleep(Duration::from_millis(5)),
            }
        }
        worker.shutdown();

        assert_eq!(received.len(), positions.len());
        let mut seen: Vec<ChunkPos> = received.iter().map(|r| r.pos).collect();
        seen.sort();
        let mut expected = positions.to_vec();
        expected.sort();
        assert_eq!(seen, expected);

        for result in &received {
            assert_eq!(result.chunk.position(), result.pos);
            assert!(!result.mesh.geometries.is_empty());
        }
    }

    #[test]
    fn worker_results_match_local_generation() {
        let seed = 424242;
        let worker = GenerationWorker::start(seed).expect("worker start");
        let pos = ChunkPos::new(-2, 3);
        worker.request(WorkerRequest::Generate { pos, seed });

        let deadline = Instant::now() + Duration::from_secs(30);
        let result = loop {
            if let Some(result) = worker.try_recv() {
                break result;
            }
            assert!(Instant::now() < deadline, "worker never responded");
            thread::sleep(Duration::from_millis(5));
        };
        worker.shutdown();

        let (local_chunk, local_heightmap) = TerrainGenerator::new(seed).generate_chunk(pos);
        assert_eq!(result.chunk.blocks(), local_chunk.blocks());
        assert_eq!(result.heightmap, local_heightmap);
    }
}
