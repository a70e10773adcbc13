//! City generation parameters and their validation
//!
//! All tunables live in one record that is validated at the configuration
//! boundary. Generation itself assumes a valid record and never re-checks,
//! so a malformed interval can never reach a modulo inside the hot loop.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Error produced when a parameter record fails validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamError {
    /// `building_density` must lie in `[0, 1]`.
    DensityOutOfRange(f64),
    /// `height_range` must be strictly positive.
    NonPositiveHeightRange(f64),
    /// `road_width` must be strictly positive.
    NonPositiveRoadWidth(f64),
    /// `main_road_width` must be at least `road_width`.
    MainRoadNarrowerThanLocal { main: f64, local: f64 },
    /// `main_road_interval` must be at least 2.
    IntervalTooSmall(i32),
    /// `color_saturation` must lie in `[0, 1]`.
    SaturationOutOfRange(f64),
    /// `color_brightness` must lie in `[0, 1]`.
    BrightnessOutOfRange(f64),
    /// `render_distance` must be non-negative.
    NegativeRenderDistance(i32),
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::DensityOutOfRange(v) => {
                write!(f, "building density {} outside [0, 1]", v)
            }
            ParamError::NonPositiveHeightRange(v) => {
                write!(f, "height range {} must be positive", v)
            }
            ParamError::NonPositiveRoadWidth(v) => {
                write!(f, "road width {} must be positive", v)
            }
            ParamError::MainRoadNarrowerThanLocal { main, local } => {
                write!(f, "main road width {} narrower than local road width {}", main, local)
            }
            ParamError::IntervalTooSmall(v) => {
                write!(f, "main road interval {} must be at least 2", v)
            }
            ParamError::SaturationOutOfRange(v) => {
                write!(f, "color saturation {} outside [0, 1]", v)
            }
            ParamError::BrightnessOutOfRange(v) => {
                write!(f, "color brightness {} outside [0, 1]", v)
            }
            ParamError::NegativeRenderDistance(v) => {
                write!(f, "render distance {} must be non-negative", v)
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// All parameters driving city generation.
///
/// The record is immutable per generation: chunks read it on creation and a
/// changed record only takes effect through a full regeneration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityParams {
    /// Probability that a road-adjacent lot receives a building (0-1).
    pub building_density: f64,
    /// Spread of building heights above the 4-unit minimum.
    pub height_range: f64,
    /// Width of local roads (chunk boundary lines off the main grid).
    pub road_width: f64,
    /// Width of main roads. Never narrower than `road_width`.
    pub main_road_width: f64,
    /// Every `main_road_interval`-th row/column is a main road.
    pub main_road_interval: i32,
    /// Base saturation for building colors (0-1).
    pub color_saturation: f64,
    /// Base lightness for building colors (0-1).
    pub color_brightness: f64,
    /// Chebyshev radius, in chunks, kept generated around the camera.
    pub render_distance: i32,
    /// Global seed; all per-cell randomness derives from it.
    pub random_seed: i64,
}

impl Default for CityParams {
    fn default() -> Self {
        Self {
            building_density: 0.4,
            height_range: 16.0,
            road_width: 2.5,
            main_road_width: 6.0,
            main_road_interval: 5,
            color_saturation: 0.5,
            color_brightness: 0.5,
            render_distance: 1,
            random_seed: 12345,
        }
    }
}

impl CityParams {
    /// Dense high-rise preset.
    pub fn downtown() -> Self {
        Self {
            building_density: 0.85,
            height_range: 40.0,
            main_road_width: 8.0,
            ..Default::default()
        }
    }

    /// Sparse low-rise preset.
    pub fn suburbs() -> Self {
        Self {
            building_density: 0.25,
            height_range: 6.0,
            main_road_interval: 3,
            ..Default::default()
        }
    }

    /// Check every invariant of the record.
    ///
    /// Called at the configuration boundary; a record that fails here never
    /// reaches generation.
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(0.0..=1.0).contains(&self.building_density) {
            return Err(ParamError::DensityOutOfRange(self.building_density));
        }
        if self.height_range <= 0.0 {
            return Err(ParamError::NonPositiveHeightRange(self.height_range));
        }
        if self.road_width <= 0.0 {
            return Err(ParamError::NonPositiveRoadWidth(self.road_width));
        }
        if self.main_road_width < self.road_width {
            return Err(ParamError::MainRoadNarrowerThanLocal {
                main: self.main_road_width,
                local: self.road_width,
            });
        }
        if self.main_road_interval < 2 {
            return Err(ParamError::IntervalTooSmall(self.main_road_interval));
        }
        if !(0.0..=1.0).contains(&self.color_saturation) {
            return Err(ParamError::SaturationOutOfRange(self.color_saturation));
        }
        if !(0.0..=1.0).contains(&self.color_brightness) {
            return Err(ParamError::BrightnessOutOfRange(self.color_brightness));
        }
        if self.render_distance < 0 {
            return Err(ParamError::NegativeRenderDistance(self.render_distance));
        }
        Ok(())
    }

    /// Replace the seed with a fresh random one and return it.
    pub fn randomize_seed<R: Rng>(&mut self, rng: &mut R) -> i64 {
        self.random_seed = rng.gen_range(0..10_000);
        self.random_seed
    }
}
