//! Async chunk production with priority ordering
//!
//! This module runs chunk producers on background worker threads so large
//! batches of chunks can be generated without blocking the caller. Uses
//! crossbeam channels for inter-thread communication.

use std::collections::HashSet;
use std::thread;

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};

use crate::constants::ASYNC_WORKER_COUNT;
use crate::core::chunk::Chunk;
use crate::world::producer::ChunkProducer;

/// Request for chunk production with priority
#[derive(Clone)]
pub struct ChunkGenRequest {
    pub cx: i32,
    pub cz: i32,
    pub priority: i32, // Lower = higher priority (distance squared)
}

/// Result of background chunk production
pub struct ChunkGenResult {
    pub cx: i32,
    pub cz: i32,
    pub chunk: Chunk,
}

/// Manages background chunk production with worker threads
pub struct ChunkLoader {
    request_tx: Sender<ChunkGenRequest>,
    result_rx: Receiver<ChunkGenResult>,
    pending: HashSet<(i32, i32)>,
    worker_count: usize,
}

impl ChunkLoader {
    /// Create a new ChunkLoader, building one producer per worker thread
    /// through the factory. Share one producer across workers by handing
    /// out `Arc` clones from the factory instead.
    pub fn new<P, F>(factory: F) -> Self
    where
        P: ChunkProducer + Send + 'static,
        F: FnMut(usize) -> P,
    {
        Self::with_worker_count(ASYNC_WORKER_COUNT.min(num_cpus::get().max(1)), factory)
    }

    /// Create a ChunkLoader with a specific number of workers
    pub fn with_worker_count<P, F>(num_workers: usize, mut factory: F) -> Self
    where
        P: ChunkProducer + Send + 'static,
        F: FnMut(usize) -> P,
    {
        // Bounded channels prevent unbounded memory growth
        let (request_tx, request_rx) = bounded::<ChunkGenRequest>(256);
        let (result_tx, result_rx) = bounded::<ChunkGenResult>(64);

        // Spawn worker threads, each with its own producer handle
        for worker_id in 0..num_workers {
            let rx = request_rx.clone();
            let tx = result_tx.clone();
            let producer = factory(worker_id);

            thread::Builder::new()
                .name(format!("chunk-gen-{}", worker_id))
                .spawn(move || {
                    loop {
                        match rx.recv() {
                            Ok(req) => {
                                let chunk = producer.get_chunk(req.cx, req.cz);

                                // Send result back to the polling thread
                                if tx
                                    .send(ChunkGenResult {
                                        cx: req.cx,
                                        cz: req.cz,
                                        chunk,
                                    })
                                    .is_err()
                                {
                                    // Loader has been dropped, exit
                                    break;
                                }
                            }
                            Err(_) => {
                                // Channel closed, exit worker
                                break;
                            }
                        }
                    }
                })
                .expect("Failed to spawn chunk production worker");
        }

        ChunkLoader {
            request_tx,
            result_rx,
            pending: HashSet::new(),
            worker_count: num_workers,
        }
    }

    /// Request a chunk to be produced with a priority
    /// Lower priority values are processed first (use distance squared)
    pub fn request_chunk(&mut self, cx: i32, cz: i32, priority: i32) {
        if self.pending.contains(&(cx, cz)) {
            return; // Already requested
        }

        self.pending.insert((cx, cz));

        // Non-blocking send - if the queue is full, skip this request for now
        let _ = self
            .request_tx
            .try_send(ChunkGenRequest { cx, cz, priority });
    }

    /// Request multiple chunks sorted by priority
    pub fn request_chunks(&mut self, requests: &[(i32, i32, i32)]) {
        // Sort by priority (lowest first)
        let mut sorted: Vec<_> = requests
            .iter()
            .filter(|(cx, cz, _)| !self.pending.contains(&(*cx, *cz)))
            .collect();
        sorted.sort_by_key(|(_, _, priority)| *priority);

        for (cx, cz, priority) in sorted {
            if self.pending.len() >= 256 {
                break; // Don't overwhelm the queue
            }
            self.pending.insert((*cx, *cz));
            let _ = self.request_tx.try_send(ChunkGenRequest {
                cx: *cx,
                cz: *cz,
                priority: *priority,
            });
        }
    }

    /// Check if a chunk is pending production
    pub fn is_pending(&self, cx: i32, cz: i32) -> bool {
        self.pending.contains(&(cx, cz))
    }

    /// Get the number of pending chunks
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Poll for completed chunks (non-blocking)
    /// Returns up to max_results completed chunks
    pub fn poll_results(&mut self, max_results: usize) -> Vec<ChunkGenResult> {
        let mut results = Vec::with_capacity(max_results);

        for _ in 0..max_results {
            match self.result_rx.try_recv() {
                Ok(result) => {
                    self.pending.remove(&(result.cx, result.cz));
                    results.push(result);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        results
    }

    /// Poll all available results (non-blocking)
    pub fn poll_all_results(&mut self) -> Vec<ChunkGenResult> {
        self.poll_results(64)
    }

    /// Cancel a pending chunk request (removes from pending set)
    pub fn cancel(&mut self, cx: i32, cz: i32) {
        self.pending.remove(&(cx, cz));
    }

    /// Clear all pending requests
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Get worker count
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::core::block::BlockType;
    use crate::core::chunk::Chunk;

    /// Producer that stamps the request coordinates into the chunk so
    /// results can be checked against their keys.
    #[derive(Clone)]
    struct CoordStamp;

    impl ChunkProducer for CoordStamp {
        fn get_chunk(&self, cx: i32, cz: i32) -> Chunk {
            let mut chunk = Chunk::new();
            chunk.set_block(cx.rem_euclid(16), 0, cz.rem_euclid(16), BlockType::Wood);
            chunk
        }
    }

    fn drain(loader: &mut ChunkLoader, expected: usize) -> Vec<ChunkGenResult> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut results = Vec::new();
        while results.len() < expected && Instant::now() < deadline {
            results.extend(loader.poll_all_results());
            thread::sleep(Duration::from_millis(1));
        }
        results
    }

    #[test]
    fn produces_every_requested_chunk() {
        let mut loader = ChunkLoader::with_worker_count(2, |_| CoordStamp);
        let mut requests = Vec::new();
        for cx in 0..3 {
            for cz in 0..3 {
                requests.push((cx, cz, cx * cx + cz * cz));
            }
        }
        loader.request_chunks(&requests);
        assert_eq!(loader.pending_count(), 9);

        let results = drain(&mut loader, 9);
        assert_eq!(results.len(), 9);
        assert_eq!(loader.pending_count(), 0);
        for result in &results {
            assert_eq!(result.chunk, CoordStamp.get_chunk(result.cx, result.cz));
        }
    }

    #[test]
    fn duplicate_requests_are_ignored_while_pending() {
        let mut loader = ChunkLoader::with_worker_count(1, |_| CoordStamp);
        loader.request_chunk(4, 4, 0);
        loader.request_chunk(4, 4, 0);
        assert_eq!(loader.pending_count(), 1);
        let results = drain(&mut loader, 1);
        assert_eq!(results.len(), 1);
    }
}
