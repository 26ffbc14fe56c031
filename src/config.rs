use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/world.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed. Random when absent so each run gets a fresh world.
    pub seed: Option<u32>,
    /// Chunk radius used for loading/unloading the world around the player.
    pub render_distance: i32,
    /// Fixed simulation ticks per second.
    pub tick_rate: u32,
    /// Ticks to simulate before exiting; 0 runs until interrupted.
    pub run_ticks: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            render_distance: 5,
            tick_rate: 60,
            run_ticks: 600,
        }
    }
}

impl WorldConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<WorldConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    WorldConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "World config not found at {}. Using defaults",
                        path.display()
                    );
                }
                WorldConfig::default()
            }
        }
    }

    /// Configured seed, or a random one.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }
}
