//! Landmark placement over a base terrain producer
//!
//! The landmark generator is a chunk producer that scatters landmarks
//! across the world deterministically. For each requested chunk it
//! resolves every landmark close enough to matter, then assembles a fresh
//! decorator chain from the base producer through each landmark in query
//! order.

use crate::constants::*;
use crate::config::ConfigError;
use crate::core::chunk::Chunk;
use crate::world::landmarks::landmark::{Landmark, LandmarkKind};
use crate::world::landmarks::spawns::RegionSpawnCache;
use crate::world::producer::ChunkProducer;

/// Chunk producer that decorates a base producer with landmarks.
///
/// Pure function of (seed, configuration, chunk coordinate) plus the
/// memoized region spawn tables. Generators nest: the base producer can be
/// another `LandmarkGenerator`.
pub struct LandmarkGenerator<P> {
    base: P,
    max_view_range: i32,
    spawns: RegionSpawnCache,
}

impl<P: ChunkProducer> LandmarkGenerator<P> {
    /// Build a generator from a world seed, a base terrain producer, the
    /// list of landmark kinds to scatter, and the number of spawn points
    /// per region. Fails if the kind list is empty.
    pub fn new(
        seed: u64,
        base: P,
        kinds: Vec<LandmarkKind>,
        density: u32,
    ) -> Result<Self, ConfigError> {
        // Kinds are fixed for the life of the generator, so the widest
        // view range is computed once up front.
        let max_view_range = kinds
            .iter()
            .map(|kind| kind.view_range())
            .max()
            .ok_or(ConfigError::NoLandmarkKinds)?;
        Ok(LandmarkGenerator {
            base,
            max_view_range,
            spawns: RegionSpawnCache::new(seed, kinds, density)?,
        })
    }

    /// Widest view range over the configured landmark kinds, in blocks.
    pub fn max_view_range(&self) -> i32 {
        self.max_view_range
    }

    pub fn spawn_cache(&self) -> &RegionSpawnCache {
        &self.spawns
    }

    /// All landmarks whose influence could reach the given chunk, gathered
    /// from the square chunk window sized by the widest view range. The
    /// traversal is row-major ascending, which fixes the order landmarks
    /// are later applied in.
    pub fn spawns_touching_chunk(&self, cx: i32, cz: i32) -> Vec<Landmark> {
        let window = (self.max_view_range + CHUNK_SIZE - 1).div_euclid(CHUNK_SIZE);
        let mut marks = Vec::new();
        for chunk_x in (cx - window)..=(cx + window) {
            for chunk_z in (cz - window)..=(cz + window) {
                marks.extend(self.spawns.spawns_for_chunk(chunk_x, chunk_z));
            }
        }
        marks
    }
}

impl<P: ChunkProducer> ChunkProducer for LandmarkGenerator<P> {
    fn get_chunk(&self, cx: i32, cz: i32) -> Chunk {
        let marks = self.spawns_touching_chunk(cx, cz);
        if marks.is_empty() {
            return self.base.get_chunk(cx, cz);
        }
        LandmarkChain::new(&self.base, &marks).get_chunk(cx, cz)
    }
}

/// A resolved decorator chain: the base producer wrapped by a slice of
/// landmarks, assembled per request so cached landmark instances never
/// carry state between chunk requests.
///
/// The last landmark of the slice is the outermost link. Resolving a chunk
/// recurses to the base first and applies edits on the way back out, so
/// earlier landmarks write first and later ones overwrite them where
/// footprints overlap.
pub struct LandmarkChain<'a> {
    base: &'a dyn ChunkProducer,
    links: &'a [Landmark],
}

impl<'a> LandmarkChain<'a> {
    pub fn new(base: &'a dyn ChunkProducer, links: &'a [Landmark]) -> Self {
        LandmarkChain { base, links }
    }
}

impl ChunkProducer for LandmarkChain<'_> {
    fn get_chunk(&self, cx: i32, cz: i32) -> Chunk {
        match self.links.split_last() {
            None => self.base.get_chunk(cx, cz),
            Some((mark, upstream)) => {
                mark.produce_chunk(&LandmarkChain::new(self.base, upstream), cx, cz)
            }
        }
    }
}
