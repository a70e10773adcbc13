//! Deterministic per-cell randomness
//!
//! Every pseudo-random attribute in the city is a pure function of the global
//! seed plus an integer cell seed, so regenerating with the same parameters
//! reproduces the city bit for bit.

/// Pure seeded random value in `[0, 1)`.
///
/// The classic fractional-sine hash: cheap, stateless, and reproducible
/// across process restarts. Not suitable for cryptography or statistics,
/// entirely suitable for picking building heights.
pub fn seeded_random(global_seed: i64, seed: i64) -> f64 {
    let x = (seed.wrapping_add(global_seed) as f64).sin() * 10000.0;
    x - x.floor()
}

/// Combine a cell's coordinates into its integer seed.
///
/// Local coordinates occupy the two low decimal digits, chunk coordinates
/// the higher ones, so distinct cells within the supported coordinate range
/// never collide.
pub fn cell_seed(chunk_x: i64, chunk_z: i64, local_x: i64, local_z: i64) -> i64 {
    chunk_x * 10000 + chunk_z * 100 + local_x * 10 + local_z
}

// Attribute offsets from the base cell seed. Each derived attribute samples
// at its own fixed offset so attributes of one cell do not correlate.
const PRESENCE_OFFSET: i64 = 1000;
const HUE_OFFSET: i64 = 1;
const SATURATION_OFFSET: i64 = 2;
const LIGHTNESS_OFFSET: i64 = 3;

/// Per-cell random attribute sampler.
///
/// Bundles the global seed with one cell's seed and exposes the named
/// attribute draws used during generation.
#[derive(Clone, Copy, Debug)]
pub struct CellRng {
    global_seed: i64,
    cell_seed: i64,
}

impl CellRng {
    pub fn new(global_seed: i64, cell_seed: i64) -> Self {
        Self {
            global_seed,
            cell_seed,
        }
    }

    /// Base draw, used for building height.
    pub fn height(&self) -> f64 {
        seeded_random(self.global_seed, self.cell_seed)
    }

    /// Presence draw compared against the density threshold.
    pub fn presence(&self) -> f64 {
        seeded_random(self.global_seed, self.cell_seed + PRESENCE_OFFSET)
    }

    /// Hue in `[0, 1)`.
    pub fn hue(&self) -> f64 {
        seeded_random(self.global_seed, self.cell_seed + HUE_OFFSET)
    }

    /// Saturation jitter in `[0, 1)`, scaled by the caller.
    pub fn saturation(&self) -> f64 {
        seeded_random(self.global_seed, self.cell_seed + SATURATION_OFFSET)
    }

    /// Lightness jitter in `[0, 1)`, scaled by the caller.
    pub fn lightness(&self) -> f64 {
        seeded_random(self.global_seed, self.cell_seed + LIGHTNESS_OFFSET)
    }

    /// Per-vertex roof height jitter in `[-0.35, 0.35)`.
    ///
    /// The one place seeding happens per vertex instead of per cell, giving
    /// buildings irregular rooflines.
    pub fn vertex_jitter(&self, vertex: usize) -> f64 {
        (seeded_random(self.global_seed, self.cell_seed + vertex as i64) - 0.5) * 0.7
    }
}
