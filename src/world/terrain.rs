//! Base terrain generation using FastNoiseLite
//!
//! This is the bottom producer of the chunk pipeline: a plain height-field
//! terrain with water up to sea level. Landmark layers are stacked on top
//! of it by the landmark generator.

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::constants::*;
use crate::core::block::BlockType;
use crate::core::chunk::Chunk;
use crate::world::producer::ChunkProducer;

/// Thread-safe base terrain producer with pre-configured FastNoiseLite
/// instances. Pure function of (seed, chunk coordinate).
pub struct TerrainGenerator {
    noise_height: FastNoiseLite,
    noise_detail: FastNoiseLite,
    pub seed: u32,
}

impl TerrainGenerator {
    /// Create a new TerrainGenerator with the specified seed
    pub fn new(seed: u32) -> Self {
        TerrainGenerator {
            noise_height: Self::create_fbm_noise(seed, 0.008),
            noise_detail: Self::create_noise(seed.wrapping_add(1), 0.03),
            seed,
        }
    }

    fn create_noise(seed: u32, frequency: f32) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(frequency));
        noise
    }

    fn create_fbm_noise(seed: u32, frequency: f32) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(4));
        noise.set_fractal_lacunarity(Some(2.0));
        noise.set_fractal_gain(Some(0.5));
        noise.set_frequency(Some(frequency));
        noise
    }

    /// Surface height of the column at world block (x, z)
    pub fn get_terrain_height(&self, x: i32, z: i32) -> i32 {
        let fx = x as f32;
        let fz = z as f32;
        let rolling = self.noise_height.get_noise_2d(fx, fz);
        let detail = self.noise_detail.get_noise_2d(fx, fz);
        let height = 68.0 + rolling * 28.0 + detail * 4.0;
        (height as i32).clamp(1, WORLD_HEIGHT - 20)
    }

    fn position_hash(&self, x: i32, z: i32) -> u32 {
        let mut hash = self.seed;
        hash = hash.wrapping_add(x as u32).wrapping_mul(73856093);
        hash = hash.wrapping_add(z as u32).wrapping_mul(19349663);
        hash ^ (hash >> 16)
    }
}

impl ChunkProducer for TerrainGenerator {
    fn get_chunk(&self, cx: i32, cz: i32) -> Chunk {
        let mut chunk = Chunk::new();
        let base_x = cx * CHUNK_SIZE;
        let base_z = cz * CHUNK_SIZE;

        for lx in 0..CHUNK_SIZE {
            for lz in 0..CHUNK_SIZE {
                let world_x = base_x + lx;
                let world_z = base_z + lz;
                let surface_height = self.get_terrain_height(world_x, world_z);
                let dirt_depth = 3 + (self.position_hash(world_x, world_z) % 3) as i32;

                chunk.set_block(lx, 0, lz, BlockType::Bedrock);
                chunk.fill_column(lx, lz, 1, surface_height - dirt_depth, BlockType::Stone);
                chunk.fill_column(
                    lx,
                    lz,
                    surface_height - dirt_depth,
                    surface_height - 1,
                    BlockType::Dirt,
                );
                chunk.set_block(
                    lx,
                    surface_height - 1,
                    lz,
                    BlockType::surface_for_height(surface_height),
                );
                if surface_height < SEA_LEVEL {
                    chunk.fill_column(lx, lz, surface_height, SEA_LEVEL, BlockType::Water);
                }
            }
        }

        for subchunk in &mut chunk.subchunks {
            subchunk.check_empty();
        }

        chunk
    }
}

// Allow cloning for worker threads
impl Clone for TerrainGenerator {
    fn clone(&self) -> Self {
        TerrainGenerator::new(self.seed)
    }
}
