//! City facade
//!
//! Single entry point for the host: owns the parameter store and the chunk
//! cache and keeps them consistent. An accepted parameter change always
//! disposes the generated city, so stale chunks never outlive the record
//! that produced them.

use rand::Rng;

use crate::cache::ChunkCache;
use crate::chunk::Chunk;
use crate::config::ParameterStore;
use crate::params::{CityParams, ParamError};
use crate::tiles::ReleaseStats;

/// The generated city and its lifecycle.
pub struct City {
    store: ParameterStore,
    cache: ChunkCache,
}

impl City {
    /// Build a city from a parameter record. Rejects malformed records
    /// before anything is generated.
    pub fn new(params: CityParams) -> Result<Self, ParamError> {
        Ok(Self {
            store: ParameterStore::new(params)?,
            cache: ChunkCache::new(),
        })
    }

    /// City with the stock parameters.
    pub fn with_defaults() -> Self {
        Self {
            store: ParameterStore::new(CityParams::default())
                .expect("default parameters are valid"),
            cache: ChunkCache::new(),
        }
    }

    pub fn params(&self) -> &CityParams {
        self.store.params()
    }

    /// Replace the parameters and rebuild.
    ///
    /// On success the whole generated city is disposed; the next `update`
    /// repopulates the visible footprint from the new record. On failure
    /// nothing changes.
    pub fn set_params(&mut self, params: CityParams) -> Result<(), ParamError> {
        self.store.set(params)?;
        self.cache.regenerate();
        Ok(())
    }

    /// One tick: make every chunk within render distance of the camera
    /// position exist. Returns how many chunks were generated.
    pub fn update(&mut self, camera_x: f64, camera_z: f64) -> usize {
        self.cache
            .update_visible(camera_x, camera_z, self.store.params())
    }

    /// Draw a fresh random seed and rebuild with it. Returns the new seed.
    pub fn randomize_seed<R: Rng>(&mut self, rng: &mut R) -> i64 {
        let seed = self.store.randomize_seed(rng);
        self.cache.regenerate();
        seed
    }

    /// Register a listener fired after every accepted parameter change.
    pub fn on_change(&mut self, listener: impl FnMut(&CityParams) + 'static) {
        self.store.on_change(listener);
    }

    /// Register the camera collaborator's reset handler.
    pub fn on_reset_camera(&mut self, listener: impl FnMut() + 'static) {
        self.store.on_reset_camera(listener);
    }

    /// Forward a camera-reset request to the registered handler.
    pub fn request_camera_reset(&mut self) {
        self.store.request_camera_reset();
    }

    /// Opt into dropping chunks far outside the render window.
    pub fn set_eviction_margin(&mut self, margin: Option<i32>) {
        self.cache.set_eviction_margin(margin);
    }

    /// Live chunks, for the render collaborator.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.cache.chunks()
    }

    pub fn chunk_count(&self) -> usize {
        self.cache.chunk_count()
    }

    pub fn tile_count(&self) -> usize {
        self.cache.tile_count()
    }

    /// Resources released over the city's lifetime.
    pub fn released_total(&self) -> ReleaseStats {
        self.cache.released_total()
    }
}

impl Default for City {
    fn default() -> Self {
        Self::with_defaults()
    }
}
