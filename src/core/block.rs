use crate::constants::*;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum BlockType {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    Sand,
    Water,
    Wood,
    Leaves,
    Bedrock,
    Snow,
    Gravel,
}

impl BlockType {
    pub fn is_solid(&self) -> bool {
        !matches!(self, BlockType::Air | BlockType::Water)
    }

    /// Surface material for a column topping out at `height`. Columns near
    /// the water line get sand, high columns get snow.
    pub fn surface_for_height(height: i32) -> BlockType {
        if height <= SEA_LEVEL + 1 {
            BlockType::Sand
        } else if height >= SEA_LEVEL + 32 {
            BlockType::Snow
        } else {
            BlockType::Grass
        }
    }
}
