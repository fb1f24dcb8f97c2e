// World constants
pub const WORLD_HEIGHT: i32 = 256;
pub const CHUNK_SIZE: i32 = 16;
pub const SUBCHUNK_HEIGHT: i32 = 16;
pub const NUM_SUBCHUNKS: i32 = WORLD_HEIGHT / SUBCHUNK_HEIGHT;
pub const SEA_LEVEL: i32 = 64;

// Region constants. A region is the unit of batched landmark spawn
// generation; spawn tables are derived and cached per region.
pub const REGION_SIZE: i32 = 32;
pub const REGION_SIZE_IN_BLOCKS: i32 = REGION_SIZE * CHUNK_SIZE;

// Landmark constants
pub const DEFAULT_SPAWN_DENSITY: u32 = 200;

// Optimization constants
pub const ASYNC_WORKER_COUNT: usize = 4;
