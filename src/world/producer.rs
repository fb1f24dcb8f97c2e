use std::sync::Arc;

use crate::core::chunk::Chunk;

/// Anything that can produce a chunk of blocks for a chunk coordinate.
///
/// Both the base terrain generator and every landmark layered on top of it
/// implement this, so producers compose: a `LandmarkGenerator` wraps a base
/// producer and is itself a producer, which allows nesting one generator as
/// another's terrain.
pub trait ChunkProducer {
    fn get_chunk(&self, cx: i32, cz: i32) -> Chunk;
}

impl<T: ChunkProducer + ?Sized> ChunkProducer for &T {
    fn get_chunk(&self, cx: i32, cz: i32) -> Chunk {
        (**self).get_chunk(cx, cz)
    }
}

impl<T: ChunkProducer + ?Sized> ChunkProducer for Arc<T> {
    fn get_chunk(&self, cx: i32, cz: i32) -> Chunk {
        (**self).get_chunk(cx, cz)
    }
}
