//! Chunk cache and streaming lifecycle
//!
//! Keyed registry of generated chunks. Each tick the camera position selects
//! a Chebyshev window of keys that must exist; missing chunks are generated
//! synchronously within the tick. A parameter change disposes everything and
//! lets the next tick repopulate the visible footprint from the new
//! parameters.

use std::collections::HashMap;

use crate::chunk::{generate_chunk, Chunk, ChunkKey};
use crate::params::CityParams;
use crate::tiles::ReleaseStats;

/// Registry of live chunks plus the rebuild bookkeeping around them.
///
/// By default the cache never evicts: chunks accumulate as the camera roams,
/// matching the reference behavior. Long-running hosts can opt into eviction
/// with [`ChunkCache::set_eviction_margin`].
#[derive(Debug, Default)]
pub struct ChunkCache {
    chunks: HashMap<ChunkKey, Chunk>,
    /// Set by `regenerate`, cleared by the next `update_visible`.
    pending_rebuild: bool,
    /// When set, chunks farther than `render_distance + margin` from the
    /// camera chunk are dropped at the end of each `update_visible`.
    eviction_margin: Option<i32>,
    /// Resources released over the cache's lifetime, for leak verification.
    released: ReleaseStats,
}

impl ChunkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the chunk for `key` if absent. Returns whether a chunk was
    /// actually generated; calling again for a live key is a no-op.
    pub fn ensure_chunk(&mut self, key: ChunkKey, params: &CityParams) -> bool {
        if self.chunks.contains_key(&key) {
            return false;
        }
        self.chunks.insert(key, generate_chunk(key, params));
        true
    }

    /// Bring the registry in line with a camera position: every key within
    /// `render_distance` of the camera chunk exists afterwards. Returns how
    /// many chunks were generated this tick.
    pub fn update_visible(&mut self, world_x: f64, world_z: f64, params: &CityParams) -> usize {
        self.pending_rebuild = false;
        let center = ChunkKey::from_world(world_x, world_z);
        let radius = params.render_distance;

        let mut generated = 0;
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let key = ChunkKey::new(center.x + dx, center.z + dz);
                if self.ensure_chunk(key, params) {
                    generated += 1;
                }
            }
        }

        if let Some(margin) = self.eviction_margin {
            self.evict_outside(center, radius + margin);
        }
        generated
    }

    /// Dispose every chunk beyond `radius` of `center`.
    fn evict_outside(&mut self, center: ChunkKey, radius: i32) {
        let doomed: Vec<ChunkKey> = self
            .chunks
            .keys()
            .filter(|k| k.chebyshev(center) > radius)
            .copied()
            .collect();
        for key in doomed {
            if let Some(mut chunk) = self.chunks.remove(&key) {
                self.released.merge(chunk.dispose());
            }
        }
    }

    /// Dispose every chunk and mark the registry for rebuild.
    ///
    /// Completes before returning, so any `ensure_chunk` later in the same
    /// tick observes an empty registry. Returns the resources released by
    /// this pass; disposing an already-empty registry releases nothing.
    pub fn regenerate(&mut self) -> ReleaseStats {
        let mut stats = ReleaseStats::default();
        for (_, mut chunk) in self.chunks.drain() {
            stats.merge(chunk.dispose());
        }
        self.released.merge(stats);
        self.pending_rebuild = true;
        stats
    }

    /// Opt into (or back out of) eviction of far-away chunks.
    pub fn set_eviction_margin(&mut self, margin: Option<i32>) {
        self.eviction_margin = margin;
    }

    pub fn pending_rebuild(&self) -> bool {
        self.pending_rebuild
    }

    pub fn contains(&self, key: ChunkKey) -> bool {
        self.chunks.contains_key(&key)
    }

    pub fn get(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn tile_count(&self) -> usize {
        self.chunks.values().map(Chunk::tile_count).sum()
    }

    /// Total resources released over the cache's lifetime.
    pub fn released_total(&self) -> ReleaseStats {
        self.released
    }
}
