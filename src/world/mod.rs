//! World generation and management modules
//! Contains chunk production, terrain, landmark placement, and loading.

pub mod generator;
pub mod landmarks;
pub mod loader;
pub mod producer;
pub mod terrain;

// Re-export commonly used types
pub use generator::{LandmarkChain, LandmarkGenerator};
pub use landmarks::{Landmark, LandmarkKind, RegionSpawnCache, RegionSpawns};
pub use loader::{ChunkGenResult, ChunkLoader};
pub use producer::ChunkProducer;
pub use terrain::TerrainGenerator;
