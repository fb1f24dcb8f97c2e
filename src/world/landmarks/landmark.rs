//! Landmark kinds and placed landmark instances
//!
//! A landmark is a single placed feature with a position and a kind-specific
//! influence radius (view range). Each instance acts as one link of the
//! chunk-producer chain: it either passes a requested chunk through
//! untouched or fetches it from upstream and writes its own blocks into it.

use serde::Deserialize;

use crate::constants::*;
use crate::core::block::BlockType;
use crate::core::chunk::Chunk;
use crate::world::producer::ChunkProducer;

/// The family of placeable landmark features.
///
/// Each kind carries a fixed view range: the maximum number of blocks from
/// the centerpoint at which the kind may still write blocks. The spawn
/// query window is sized from the largest view range, so a kind's edit must
/// never reach further than its `view_range()` on the x/z axes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkKind {
    Totem,
    Cairn,
    Monolith,
}

impl LandmarkKind {
    pub const ALL: [LandmarkKind; 3] =
        [LandmarkKind::Totem, LandmarkKind::Cairn, LandmarkKind::Monolith];

    /// Maximum horizontal influence distance of this kind, in blocks.
    pub const fn view_range(self) -> i32 {
        match self {
            LandmarkKind::Totem => 0,
            LandmarkKind::Cairn => 2,
            LandmarkKind::Monolith => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LandmarkKind::Totem => "totem",
            LandmarkKind::Cairn => "cairn",
            LandmarkKind::Monolith => "monolith",
        }
    }
}

/// A single placed landmark. Immutable once generated; the upstream
/// producer it edits on top of is passed in per request, never stored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub x: i32,
    pub z: i32,
    pub y: i32,
}

impl Landmark {
    pub fn new(kind: LandmarkKind, x: i32, z: i32, y: i32) -> Self {
        Landmark { kind, x, z, y }
    }

    /// Determine whether this landmark can write blocks into the given
    /// chunk. The chunk's block footprint is expanded by the kind's view
    /// range on every side; the test is conservative and may over-include.
    pub fn intersects_chunk(&self, cx: i32, cz: i32) -> bool {
        let range = self.kind.view_range();
        let bx_min = cx * CHUNK_SIZE - range;
        let bx_max = (cx + 1) * CHUNK_SIZE + range;
        let bz_min = cz * CHUNK_SIZE - range;
        let bz_max = (cz + 1) * CHUNK_SIZE + range;
        bx_min <= self.x && self.x < bx_max && bz_min <= self.z && self.z < bz_max
    }

    /// Produce the chunk at (cx, cz) on top of `upstream`. Acts as a pure
    /// passthrough when the landmark does not reach the chunk.
    pub fn produce_chunk(&self, upstream: &dyn ChunkProducer, cx: i32, cz: i32) -> Chunk {
        if !self.intersects_chunk(cx, cz) {
            return upstream.get_chunk(cx, cz);
        }
        let mut chunk = upstream.get_chunk(cx, cz);
        self.edit(cx * CHUNK_SIZE, cz * CHUNK_SIZE, &mut chunk);
        chunk
    }

    /// Write this landmark's blocks into a chunk whose corner block is at
    /// (corner_x, corner_z). Writes landing outside the chunk's footprint
    /// are dropped; running the edit twice leaves the same end state.
    pub fn edit(&self, corner_x: i32, corner_z: i32, chunk: &mut Chunk) {
        match self.kind {
            LandmarkKind::Totem => {
                // Carved wood post with a leaf cap
                for dy in -3..=0 {
                    place(chunk, corner_x, corner_z, self.x, self.z, self.y + dy, BlockType::Wood);
                }
                place(chunk, corner_x, corner_z, self.x, self.z, self.y + 1, BlockType::Leaves);
            }
            LandmarkKind::Cairn => {
                // Low stone mound, two tiers
                for dx in -2..=2 {
                    for dz in -2..=2 {
                        let d2 = dx * dx + dz * dz;
                        if d2 > 4 {
                            continue;
                        }
                        place(
                            chunk,
                            corner_x,
                            corner_z,
                            self.x + dx,
                            self.z + dz,
                            self.y,
                            BlockType::Stone,
                        );
                        if d2 <= 1 {
                            place(
                                chunk,
                                corner_x,
                                corner_z,
                                self.x + dx,
                                self.z + dz,
                                self.y + 1,
                                BlockType::Stone,
                            );
                        }
                    }
                }
            }
            LandmarkKind::Monolith => {
                // Gravel apron, stone plinth, bedrock shaft
                for dx in -4..=4 {
                    for dz in -4..=4 {
                        place(
                            chunk,
                            corner_x,
                            corner_z,
                            self.x + dx,
                            self.z + dz,
                            self.y,
                            BlockType::Gravel,
                        );
                    }
                }
                for dx in -1..=1 {
                    for dz in -1..=1 {
                        place(
                            chunk,
                            corner_x,
                            corner_z,
                            self.x + dx,
                            self.z + dz,
                            self.y + 1,
                            BlockType::Stone,
                        );
                    }
                }
                for dy in 2..=9 {
                    place(chunk, corner_x, corner_z, self.x, self.z, self.y + dy, BlockType::Bedrock);
                }
            }
        }
    }
}

/// Place one block given in world coordinates into a chunk with the given
/// corner, dropping the write if it falls outside the chunk's footprint.
fn place(
    chunk: &mut Chunk,
    corner_x: i32,
    corner_z: i32,
    world_x: i32,
    world_z: i32,
    y: i32,
    block: BlockType,
) {
    let rel_x = world_x - corner_x;
    let rel_z = world_z - corner_z;
    if (0..CHUNK_SIZE).contains(&rel_x) && (0..CHUNK_SIZE).contains(&rel_z) {
        chunk.set_block(rel_x, y, rel_z, block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat slab of the given material at y = 0, for isolating landmark
    /// edits from real terrain.
    struct Slab(BlockType);

    impl ChunkProducer for Slab {
        fn get_chunk(&self, _cx: i32, _cz: i32) -> Chunk {
            let mut chunk = Chunk::new();
            for x in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    chunk.set_block(x, 0, z, self.0);
                }
            }
            chunk
        }
    }

    #[test]
    fn zero_view_range_uses_exact_chunk_bounds() {
        let mark = Landmark::new(LandmarkKind::Totem, 16, 0, 64);
        assert!(mark.intersects_chunk(1, 0));
        // x = 16 is the first block of chunk 1, not the last of chunk 0
        assert!(!mark.intersects_chunk(0, 0));

        let edge = Landmark::new(LandmarkKind::Totem, 15, 15, 64);
        assert!(edge.intersects_chunk(0, 0));
        assert!(!edge.intersects_chunk(1, 0));
    }

    #[test]
    fn view_range_expands_the_intersection_window() {
        // Cairn reaches 2 blocks, so x = 17 still touches chunk 0
        let mark = Landmark::new(LandmarkKind::Cairn, 17, 8, 64);
        assert!(mark.intersects_chunk(1, 0));
        assert!(mark.intersects_chunk(0, 0));
        // x = 18 is out: the expanded range [-2, 18) is half-open
        let outside = Landmark::new(LandmarkKind::Cairn, 18, 8, 64);
        assert!(!outside.intersects_chunk(0, 0));
    }

    #[test]
    fn negative_coordinates_intersect_correctly() {
        let mark = Landmark::new(LandmarkKind::Totem, -1, -1, 64);
        assert!(mark.intersects_chunk(-1, -1));
        assert!(!mark.intersects_chunk(0, 0));
    }

    #[test]
    fn edit_outside_footprint_is_a_noop() {
        let mark = Landmark::new(LandmarkKind::Monolith, 0, 0, 64);
        let mut chunk = Chunk::new();
        // Chunk corner far away from the landmark
        mark.edit(160, 160, &mut chunk);
        assert_eq!(chunk, Chunk::new());
    }

    #[test]
    fn edit_is_idempotent() {
        let mark = Landmark::new(LandmarkKind::Cairn, 8, 8, 64);
        let mut once = Chunk::new();
        mark.edit(0, 0, &mut once);
        let mut twice = Chunk::new();
        mark.edit(0, 0, &mut twice);
        mark.edit(0, 0, &mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn edit_straddling_a_chunk_border_writes_only_the_local_part() {
        // Cairn centered one block into chunk (1, 0): its west rim falls in
        // chunk (0, 0), the rest must be dropped from that chunk's edit.
        let mark = Landmark::new(LandmarkKind::Cairn, 17, 8, 64);
        let mut west = Chunk::new();
        mark.edit(0, 0, &mut west);
        // dx = -2 lands at world x = 15, which is local x = 15
        assert_eq!(west.get_block(15, 64, 8), BlockType::Stone);
        // center never lands in this chunk
        assert_eq!(west.get_block(15, 65, 8), BlockType::Air);
        for x in 0..15 {
            for z in 0..CHUNK_SIZE {
                assert_eq!(west.get_block(x, 64, z), BlockType::Air);
            }
        }
    }

    #[test]
    fn produce_chunk_passes_through_when_not_intersecting() {
        let base = Slab(BlockType::Stone);
        let mark = Landmark::new(LandmarkKind::Totem, 500, 500, 64);
        let produced = mark.produce_chunk(&base, 0, 0);
        assert_eq!(produced, base.get_chunk(0, 0));
    }

    #[test]
    fn produce_chunk_edits_when_intersecting() {
        let base = Slab(BlockType::Stone);
        let mark = Landmark::new(LandmarkKind::Totem, 5, 9, 100);
        let produced = mark.produce_chunk(&base, 0, 0);
        assert_eq!(produced.get_block(5, 100, 9), BlockType::Wood);
        assert_eq!(produced.get_block(5, 101, 9), BlockType::Leaves);
        // The slab underneath is untouched
        assert_eq!(produced.get_block(0, 0, 0), BlockType::Stone);
    }
}
