//! Tile records and the factory that builds them
//!
//! A tile is one drawable unit inside a chunk: a building, a piece of road, a
//! patch of ground cover or a curb strip. Each tile exclusively owns its
//! geometry and material; the owning chunk releases them exactly once on
//! disposal.

use crate::color::Color;

/// Flat road surface color.
pub const ROAD_COLOR: Color = Color::rgb(0x22 as f32 / 255.0, 0x22 as f32 / 255.0, 0x33 as f32 / 255.0);
/// Ground cover green.
pub const GROUND_COLOR: Color = Color::rgb(0x4a as f32 / 255.0, 0x7c as f32 / 255.0, 0x59 as f32 / 255.0);
/// Curb strip white.
pub const CURB_COLOR: Color = Color::rgb(1.0, 1.0, 1.0);

/// Vertical placement of the flat layers, bottom to top: roads, ground
/// cover, curbs. Curbs sit slightly above the ground so they stay visible.
pub const ROAD_HEIGHT: f32 = 0.1;
pub const GROUND_HEIGHT: f32 = 0.5;
pub const GROUND_Y: f32 = 0.5;
pub const CURB_THICKNESS: f32 = 0.05;
pub const CURB_Y: f32 = 0.76;

/// What a tile represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Building,
    RoadSegment,
    RoadJunction,
    GroundCover,
    Curb,
}

/// Axis-aligned box geometry description.
///
/// Buildings additionally carry a per-vertex roof jitter: one Y offset per
/// box corner, applied by the renderer to break up flat rooflines.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub vertex_jitter: Option<Vec<f32>>,
}

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            vertex_jitter: None,
        }
    }

    pub fn with_jitter(mut self, jitter: Vec<f32>) -> Self {
        self.vertex_jitter = Some(jitter);
        self
    }
}

/// Material description: a flat color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
}

/// One drawable unit, exclusively owned by its chunk.
///
/// Geometry and material are held as `Option` so disposal can release each
/// exactly once and skip sub-resources that are already gone.
#[derive(Clone, Debug)]
pub struct Tile {
    pub kind: TileKind,
    /// Center position in chunk-local space.
    pub position: [f32; 3],
    geometry: Option<BoxGeometry>,
    material: Option<Material>,
}

impl Tile {
    pub fn new(kind: TileKind, position: [f32; 3], geometry: BoxGeometry, color: Color) -> Self {
        Self {
            kind,
            position,
            geometry: Some(geometry),
            material: Some(Material { color }),
        }
    }

    pub fn geometry(&self) -> Option<&BoxGeometry> {
        self.geometry.as_ref()
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// Release the tile's resources, skipping anything already released.
    ///
    /// Returns how many geometries and materials were freed by this call, so
    /// callers can verify exactly-once disposal.
    pub fn release(&mut self) -> ReleaseStats {
        ReleaseStats {
            geometries: self.geometry.take().is_some() as usize,
            materials: self.material.take().is_some() as usize,
        }
    }
}

/// Counts of resources freed by a disposal pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReleaseStats {
    pub geometries: usize,
    pub materials: usize,
}

impl ReleaseStats {
    pub fn merge(&mut self, other: ReleaseStats) {
        self.geometries += other.geometries;
        self.materials += other.materials;
    }
}

/// Build a building tile.
///
/// `center_x`/`center_z` are the footprint center in chunk-local space; the
/// box is grounded, so its vertical center sits at half the height.
pub fn building(
    center_x: f32,
    center_z: f32,
    width: f32,
    height: f32,
    depth: f32,
    color: Color,
    roof_jitter: Vec<f32>,
) -> Tile {
    Tile::new(
        TileKind::Building,
        [center_x, height / 2.0, center_z],
        BoxGeometry::new(width, height, depth).with_jitter(roof_jitter),
        color,
    )
}

/// Build a ground cover tile covering one lot.
///
/// The footprint is passed in slightly larger than the cell to hide seams
/// between neighboring lots.
pub fn ground_cover(center_x: f32, center_z: f32, size: f32) -> Tile {
    Tile::new(
        TileKind::GroundCover,
        [center_x, GROUND_Y, center_z],
        BoxGeometry::new(size, GROUND_HEIGHT, size),
        GROUND_COLOR,
    )
}

/// Build a thin curb strip with the given footprint.
pub fn curb(center_x: f32, center_z: f32, width: f32, depth: f32) -> Tile {
    Tile::new(
        TileKind::Curb,
        [center_x, CURB_Y, center_z],
        BoxGeometry::new(width, CURB_THICKNESS, depth),
        CURB_COLOR,
    )
}

/// Build a flat road surface tile.
pub fn road_segment(center_x: f32, center_z: f32, width: f32, depth: f32) -> Tile {
    Tile::new(
        TileKind::RoadSegment,
        [center_x, ROAD_HEIGHT / 2.0, center_z],
        BoxGeometry::new(width, ROAD_HEIGHT, depth),
        ROAD_COLOR,
    )
}

/// Build a junction surface tile. Same layer as road segments, tagged
/// separately so consumers can tell intersections from plain road.
pub fn road_junction(center_x: f32, center_z: f32, width: f32, depth: f32) -> Tile {
    Tile::new(
        TileKind::RoadJunction,
        [center_x, ROAD_HEIGHT / 2.0, center_z],
        BoxGeometry::new(width, ROAD_HEIGHT, depth),
        ROAD_COLOR,
    )
}
