// Core module with fundamental types
pub mod core;

// World module with terrain and landmark production
pub mod world;

// Other modules
pub mod config;
pub mod constants;

// Re-exports
pub use config::{ConfigError, WorldConfig, load_config_from_path};
pub use constants::*;
pub use self::core::{BlockType, Chunk, SubChunk};
pub use world::{
    ChunkGenResult, ChunkLoader, ChunkProducer, Landmark, LandmarkChain, LandmarkGenerator,
    LandmarkKind, RegionSpawnCache, RegionSpawns, TerrainGenerator,
};
