use crate::constants::*;
use crate::core::block::BlockType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubChunk {
    pub blocks: [[[BlockType; CHUNK_SIZE as usize]; SUBCHUNK_HEIGHT as usize]; CHUNK_SIZE as usize],
    pub is_empty: bool,
}

impl SubChunk {
    pub fn new() -> Self {
        SubChunk {
            blocks: [[[BlockType::Air; CHUNK_SIZE as usize]; SUBCHUNK_HEIGHT as usize];
                CHUNK_SIZE as usize],
            is_empty: true,
        }
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if x >= 0 && x < CHUNK_SIZE && y >= 0 && y < SUBCHUNK_HEIGHT && z >= 0 && z < CHUNK_SIZE {
            self.blocks[x as usize][y as usize][z as usize]
        } else {
            BlockType::Air
        }
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) {
        if x >= 0 && x < CHUNK_SIZE && y >= 0 && y < SUBCHUNK_HEIGHT && z >= 0 && z < CHUNK_SIZE {
            self.blocks[x as usize][y as usize][z as usize] = block;
            self.is_empty = block == BlockType::Air && self.is_empty;
        }
    }

    pub fn check_empty(&mut self) {
        self.is_empty = true;
        for x in 0..CHUNK_SIZE as usize {
            for y in 0..SUBCHUNK_HEIGHT as usize {
                for z in 0..CHUNK_SIZE as usize {
                    if self.blocks[x][y][z] != BlockType::Air {
                        self.is_empty = false;
                        return;
                    }
                }
            }
        }
    }
}

impl Default for SubChunk {
    fn default() -> Self {
        Self::new()
    }
}

/// A column of blocks spanning `CHUNK_SIZE x CHUNK_SIZE x WORLD_HEIGHT`,
/// stored as vertically stacked subchunks. Out-of-range reads return air;
/// out-of-range writes are silently dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub subchunks: Vec<SubChunk>,
}

impl Chunk {
    pub fn new() -> Self {
        let mut subchunks = Vec::with_capacity(NUM_SUBCHUNKS as usize);
        for _ in 0..NUM_SUBCHUNKS {
            subchunks.push(SubChunk::new());
        }
        Chunk { subchunks }
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if y < 0 || y >= WORLD_HEIGHT {
            return BlockType::Air;
        }
        let subchunk_idx = (y / SUBCHUNK_HEIGHT) as usize;
        let local_y = y % SUBCHUNK_HEIGHT;
        self.subchunks[subchunk_idx].get_block(x, local_y, z)
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) {
        if y < 0 || y >= WORLD_HEIGHT {
            return;
        }
        let subchunk_idx = (y / SUBCHUNK_HEIGHT) as usize;
        let local_y = y % SUBCHUNK_HEIGHT;
        self.subchunks[subchunk_idx].set_block(x, local_y, z, block);
    }

    /// Fill the vertical range `[y_start, y_end)` of one column. Portions
    /// of the range outside the world height are dropped.
    pub fn fill_column(&mut self, x: i32, z: i32, y_start: i32, y_end: i32, block: BlockType) {
        for y in y_start.max(0)..y_end.min(WORLD_HEIGHT) {
            self.set_block(x, y, z, block);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subchunks.iter().all(|s| s.is_empty)
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}
