//! Landmark placement: kinds, placed instances, and per-region spawn tables.

pub mod landmark;
pub mod spawns;

// Re-export commonly used types
pub use landmark::{Landmark, LandmarkKind};
pub use spawns::{RegionSpawnCache, RegionSpawns};
