//! Headless simulation session: fixed-tick loop driving the chunk store
//! and the player until the configured tick count elapses.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use glam::{vec3, Vec3};
use tracing::{debug, info};

use voxelbrook_engine::{ChunkMesh, ChunkRenderer, ChunkStore};
use voxelbrook_world::ChunkPos;

use crate::config::WorldConfig;

/// Renderer that tracks scene statistics instead of drawing.
#[derive(Debug, Default)]
struct StatsRenderer {
    chunks_built: u64,
    chunks_dropped: u64,
    vertices: u64,
    triangles: u64,
}

impl ChunkRenderer for StatsRenderer {
    fn build_chunk(&mut self, pos: ChunkPos, mesh: &ChunkMesh, generated_at: f32) {
        self.chunks_built += 1;
        self.vertices += mesh.total_vertices() as u64;
        self.triangles += mesh.total_indices() as u64 / 3;
        debug!(chunk = %pos, generated_at, "built chunk geometry");
    }

    fn drop_chunk(&mut self, pos: ChunkPos) {
        self.chunks_dropped += 1;
        debug!(chunk = %pos, "dropped chunk geometry");
    }
}

/// Run the simulation for `config.run_ticks` fixed ticks (or forever when
/// zero), walking the player forward once spawned.
pub fn run(config: &WorldConfig) -> Result<()> {
    let seed = config.resolve_seed();
    info!(
        seed,
        render_distance = config.render_distance,
        tick_rate = config.tick_rate,
        "starting world session"
    );

    let (mut store, spawn) = ChunkStore::new(seed, config.render_distance)?;
    let mut renderer = StatsRenderer::default();
    let mut player = voxelbrook_physics::Player::new();

    let dt = 1.0 / config.tick_rate as f32;
    let tick_duration = Duration::from_secs_f32(dt);
    let started = Instant::now();
    let mut tick: u64 = 0;

    loop {
        let tick_start = Instant::now();

        store.update(player.position, &mut renderer);

        if !player.is_spawned() {
            if let Some(point) = spawn.try_take() {
                player.spawn(point.x, point.z, point.ground_height);
                info!(
                    x = point.x,
                    z = point.z,
                    ground_height = point.ground_height,
                    biome = %store.biome_at(point.x as i32, point.z as i32),
                    "player spawned"
                );
            }
        }

        // Walk forward once the world is under our feet.
        let input = if player.is_spawned() {
            vec3(0.0, 0.0, -1.0)
        } else {
            Vec3::ZERO
        };
        player.update(dt, input, 0.0, &store);

        tick += 1;
        if config.run_ticks != 0 && tick >= config.run_ticks {
            break;
        }

        if let Some(remaining) = tick_duration.checked_sub(tick_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    info!(
        ticks = tick,
        elapsed_seconds = started.elapsed().as_secs_f32(),
        chunks_built = renderer.chunks_built,
        chunks_dropped = renderer.chunks_dropped,
        vertices = renderer.vertices,
        triangles = renderer.triangles,
        chunks_loaded = store.loaded_count(),
        position = ?player.position,
        "session finished"
    );

    store.shutdown();
    Ok(())
}
