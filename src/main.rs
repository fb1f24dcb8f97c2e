//! Terramark world preview
//!
//! Generates a square of chunks around the origin through the landmark
//! pipeline and reports placement statistics.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use terramark::world::{ChunkLoader, LandmarkGenerator, TerrainGenerator};
use terramark::{CHUNK_SIZE, WORLD_HEIGHT, WorldConfig, load_config_from_path};

/// Landmark-decorated terrain generator preview
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Landmark spawn points per region (overrides the config file)
    #[arg(long)]
    density: Option<u32>,

    /// Radius in chunks around the origin to generate
    #[arg(long, default_value_t = 4)]
    radius: i32,

    /// Optional TOML world configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => match load_config_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(density) = args.density {
        config.density = density;
    }

    // The loader's request queue holds 256 chunks; radius 7 is a 15x15 batch
    let radius = args.radius.clamp(0, 7);
    if radius != args.radius {
        tracing::warn!(requested = args.radius, used = radius, "Clamped preview radius");
    }

    tracing::info!(
        seed = config.seed,
        density = config.density,
        radius,
        "Generating world preview..."
    );

    let terrain = TerrainGenerator::new(config.seed as u32);
    let generator =
        match LandmarkGenerator::new(config.seed, terrain, config.landmarks.clone(), config.density)
        {
            Ok(generator) => Arc::new(generator),
            Err(e) => {
                tracing::error!("Invalid generator configuration: {}", e);
                std::process::exit(1);
            }
        };

    // All workers share one generator, and with it one region spawn cache
    let mut loader = ChunkLoader::new({
        let generator = Arc::clone(&generator);
        move |_| Arc::clone(&generator)
    });

    let mut requests = Vec::new();
    for cx in -radius..=radius {
        for cz in -radius..=radius {
            requests.push((cx, cz, cx * cx + cz * cz));
        }
    }
    let expected = requests.len();
    loader.request_chunks(&requests);

    let mut received = 0usize;
    let mut solid_blocks = 0u64;
    let mut decorated_chunks = 0usize;
    while received < expected {
        for result in loader.poll_all_results() {
            received += 1;
            for x in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    for y in 0..WORLD_HEIGHT {
                        if result.chunk.get_block(x, y, z).is_solid() {
                            solid_blocks += 1;
                        }
                    }
                }
            }
            let touching: Vec<_> = generator
                .spawns_touching_chunk(result.cx, result.cz)
                .into_iter()
                .filter(|mark| mark.intersects_chunk(result.cx, result.cz))
                .collect();
            if !touching.is_empty() {
                decorated_chunks += 1;
                let kinds: Vec<_> = touching.iter().map(|mark| mark.kind.name()).collect();
                tracing::debug!(
                    cx = result.cx,
                    cz = result.cz,
                    landmarks = touching.len(),
                    kinds = ?kinds,
                    "chunk carries landmarks"
                );
            }
        }
        thread::sleep(Duration::from_millis(1));
    }

    tracing::info!(
        chunks = expected,
        decorated_chunks,
        solid_blocks,
        workers = loader.worker_count(),
        "World preview complete"
    );
}
