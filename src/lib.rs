//! Procedural grid-city generator
//!
//! Synthesizes an unbounded city of roads, lots, buildings, ground cover and
//! curbs around a moving viewpoint. Only the chunks near the viewpoint exist
//! at any time; everything is a deterministic function of the parameter
//! record and its seed, so a city can be thrown away and rebuilt bit for bit.
//!
//! [`City`] is the host-facing entry point: feed it a camera position once
//! per tick and hand its chunks to a renderer.

pub mod ascii;
pub mod cache;
pub mod chunk;
pub mod city;
pub mod color;
pub mod config;
pub mod export;
pub mod params;
pub mod roads;
pub mod seeds;
pub mod tiles;

pub use city::City;
pub use params::{CityParams, ParamError};
