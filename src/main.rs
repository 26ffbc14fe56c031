//! voxelbrook - a streaming voxel world engine
//!
//! Headless executable: generates and streams terrain around a simulated
//! player at a fixed tick rate.

mod config;
mod session;

use std::{env, path::PathBuf};

use anyhow::Result;
use config::WorldConfig;
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting voxelbrook v{}", env!("CARGO_PKG_VERSION"));

    let config = match env::args().nth(1) {
        Some(path) => WorldConfig::load_from_path(&PathBuf::from(path)),
        None => WorldConfig::load(),
    };

    session::run(&config)
}
