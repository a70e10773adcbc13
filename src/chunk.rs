//! Chunk generation
//!
//! A chunk is one `BLOCK_SIZE x BLOCK_SIZE` grid of cells generated and owned
//! as a unit. Generation is a pure function of the chunk key and the current
//! parameters; two calls with the same inputs produce the same tiles, so the
//! cache can throw chunks away and rebuild them at will.

use crate::color::Color;
use crate::params::CityParams;
use crate::roads;
use crate::seeds::{cell_seed, CellRng};
use crate::tiles::{self, ReleaseStats, Tile};

/// Cells per chunk edge.
pub const BLOCK_SIZE: i32 = 10;
/// World units per cell edge.
pub const CELL_SIZE: f64 = 10.0;
/// World units per chunk edge.
pub const CHUNK_WORLD_SIZE: f64 = BLOCK_SIZE as f64 * CELL_SIZE;

/// Distance from the road line to a road-hugging building's center.
const ROAD_CLEARANCE: f64 = 4.0;
/// Margin kept free on each side of a lot's footprint (curb width plus a
/// small gap).
const BUILDING_MARGIN: f64 = 0.5;
/// Shrink factor applied along the road-parallel axis so neighbors hugging
/// the same road do not touch.
const PARALLEL_SHRINK: f64 = 0.6;
/// Minimum building height; the seeded draw adds on top of this.
const MIN_BUILDING_HEIGHT: f64 = 4.0;
/// Box corners jittered per building roof.
const ROOF_VERTICES: usize = 8;

/// Identity of a chunk: its integer grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkKey {
    pub x: i32,
    pub z: i32,
}

impl ChunkKey {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Key of the chunk containing a world-space position.
    pub fn from_world(world_x: f64, world_z: f64) -> Self {
        Self {
            x: (world_x / CHUNK_WORLD_SIZE).floor() as i32,
            z: (world_z / CHUNK_WORLD_SIZE).floor() as i32,
        }
    }

    /// World-space position of the chunk's low corner.
    pub fn origin(&self) -> (f64, f64) {
        (
            self.x as f64 * CHUNK_WORLD_SIZE,
            self.z as f64 * CHUNK_WORLD_SIZE,
        )
    }

    /// Chessboard distance to another key, the metric of the render radius.
    pub fn chebyshev(&self, other: ChunkKey) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

/// One generated chunk: its key, world origin, and owned tile arena.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub key: ChunkKey,
    /// World-space offset applied to every tile's chunk-local position.
    pub origin: (f64, f64),
    tiles: Vec<Tile>,
}

impl Chunk {
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Release every tile's resources and empty the arena.
    ///
    /// Tiles already released are skipped; the returned stats count only what
    /// this call actually freed.
    pub fn dispose(&mut self) -> ReleaseStats {
        let mut stats = ReleaseStats::default();
        for tile in &mut self.tiles {
            stats.merge(tile.release());
        }
        self.tiles.clear();
        stats
    }
}

/// Which side of a lot faces its nearest main road.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RoadSide {
    North,
    South,
    East,
    West,
}

/// The main road a lot hugs, if any, checked in fixed priority order so
/// corner lots resolve deterministically.
fn adjacent_road_side(x: i32, z: i32, interval: i32) -> Option<RoadSide> {
    if (z + 1) % interval == 0 {
        Some(RoadSide::North)
    } else if (z - 1) % interval == 0 {
        Some(RoadSide::South)
    } else if (x + 1) % interval == 0 {
        Some(RoadSide::East)
    } else if (x - 1) % interval == 0 {
        Some(RoadSide::West)
    } else {
        None
    }
}

/// Whether cell `(x, z)` lies under a road row or column.
fn is_road_cell(x: i32, z: i32, interval: i32) -> bool {
    x % interval == 0 || z % interval == 0
}

/// Generate the full tile set for one chunk.
pub fn generate_chunk(key: ChunkKey, params: &CityParams) -> Chunk {
    let mut out = Vec::new();
    let interval = params.main_road_interval;

    for x in 0..BLOCK_SIZE {
        for z in 0..BLOCK_SIZE {
            if is_road_cell(x, z, interval) || x == 0 || z == 0 {
                continue;
            }
            generate_lot(&mut out, key, x, z, params);
        }
    }

    // Road surfaces, one classified tile set per grid node.
    for x in 0..=BLOCK_SIZE {
        for z in 0..=BLOCK_SIZE {
            out.extend(roads::node_tiles(x, z, params, BLOCK_SIZE, CELL_SIZE));
        }
    }

    Chunk {
        key,
        origin: key.origin(),
        tiles: out,
    }
}

/// Fill one buildable lot: ground cover, curbs along main roads, and possibly
/// a building.
fn generate_lot(out: &mut Vec<Tile>, key: ChunkKey, x: i32, z: i32, params: &CityParams) {
    let interval = params.main_road_interval;
    let lot_x = x as f64 * CELL_SIZE;
    let lot_z = z as f64 * CELL_SIZE;
    let center_x = lot_x + CELL_SIZE / 2.0;
    let center_z = lot_z + CELL_SIZE / 2.0;

    // Ground cover oversized by one unit per side to hide seams.
    out.push(tiles::ground_cover(
        center_x as f32,
        center_z as f32,
        (CELL_SIZE + 2.0) as f32,
    ));

    // Curb strips, only on sides that border a main road. Slightly shorter
    // than the cell so they never overhang the ground cover edge.
    let curb_width = 0.4;
    let curb_length = (CELL_SIZE - 0.4) as f32;
    let curb_width_f = curb_width as f32;
    if (z + 1) % interval == 0 {
        let cz = (z + 1) as f64 * CELL_SIZE - curb_width / 2.0;
        out.push(tiles::curb(center_x as f32, cz as f32, curb_length, curb_width_f));
    }
    if (z - 1) % interval == 0 {
        let cz = lot_z + curb_width / 2.0;
        out.push(tiles::curb(center_x as f32, cz as f32, curb_length, curb_width_f));
    }
    if (x + 1) % interval == 0 {
        let cx = (x + 1) as f64 * CELL_SIZE - curb_width / 2.0;
        out.push(tiles::curb(cx as f32, center_z as f32, curb_width_f, curb_length));
    }
    if (x - 1) % interval == 0 {
        let cx = lot_x + curb_width / 2.0;
        out.push(tiles::curb(cx as f32, center_z as f32, curb_width_f, curb_length));
    }

    let rng = CellRng::new(
        params.random_seed,
        cell_seed(key.x as i64, key.z as i64, x as i64, z as i64),
    );

    // Bernoulli accept against the density threshold.
    if rng.presence() > params.building_density {
        return;
    }

    // Buildings only appear on lots hugging a main road.
    let side = match adjacent_road_side(x, z, interval) {
        Some(side) => side,
        None => return,
    };

    let footprint = CELL_SIZE - 2.0 * BUILDING_MARGIN;
    let shrunk = footprint * PARALLEL_SHRINK;
    // Slide the building toward its road, keeping the clearance from the
    // road line, and shrink the road-parallel axis so neighbors along the
    // same road stay apart.
    let (bx, bz, width, depth) = match side {
        RoadSide::North => (
            center_x,
            (z + 1) as f64 * CELL_SIZE - ROAD_CLEARANCE,
            shrunk,
            footprint,
        ),
        RoadSide::South => (center_x, lot_z + ROAD_CLEARANCE, shrunk, footprint),
        RoadSide::East => (
            (x + 1) as f64 * CELL_SIZE - ROAD_CLEARANCE,
            center_z,
            footprint,
            shrunk,
        ),
        RoadSide::West => (lot_x + ROAD_CLEARANCE, center_z, footprint, shrunk),
    };

    let height = MIN_BUILDING_HEIGHT + (rng.height() * params.height_range).floor();
    let color = Color::from_hsl(
        rng.hue(),
        params.color_saturation + rng.saturation() * 0.3,
        params.color_brightness + rng.lightness() * 0.2,
    );
    let jitter: Vec<f32> = (0..ROOF_VERTICES)
        .map(|i| rng.vertex_jitter(i) as f32)
        .collect();

    out.push(tiles::building(
        bx as f32,
        bz as f32,
        width as f32,
        height as f32,
        depth as f32,
        color,
        jitter,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileKind;

    fn count_kind(chunk: &Chunk, kind: TileKind) -> usize {
        chunk.tiles().iter().filter(|t| t.kind == kind).count()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let params = CityParams::default();
        let a = generate_chunk(ChunkKey::new(2, -3), &params);
        let b = generate_chunk(ChunkKey::new(2, -3), &params);
        assert_eq!(a.tile_count(), b.tile_count());
        for (ta, tb) in a.tiles().iter().zip(b.tiles()) {
            assert_eq!(ta.kind, tb.kind);
            assert_eq!(ta.position, tb.position);
            assert_eq!(ta.geometry(), tb.geometry());
            assert_eq!(ta.material(), tb.material());
        }
    }

    #[test]
    fn test_road_layout_independent_of_seed() {
        let a = generate_chunk(ChunkKey::new(0, 0), &CityParams::default());
        let mut params = CityParams::default();
        params.random_seed = 99999;
        let b = generate_chunk(ChunkKey::new(0, 0), &params);

        let roads_of = |c: &Chunk| {
            c.tiles()
                .iter()
                .filter(|t| matches!(t.kind, TileKind::RoadSegment | TileKind::RoadJunction))
                .map(|t| t.position)
                .collect::<Vec<_>>()
        };
        assert_eq!(roads_of(&a), roads_of(&b));
    }

    #[test]
    fn test_full_density_populates_every_road_adjacent_lot() {
        // Interval 5, block 10: buildable lots are x,z in 1..10 off the road
        // lines (8x8 = 64). Of those, lots hugging a main road sit at
        // x or z in {1, 4, 6, 9}: 4 rows of 8 plus 4 columns of the
        // remaining 4, 48 in total.
        let mut params = CityParams::default();
        params.building_density = 1.0;
        let chunk = generate_chunk(ChunkKey::new(0, 0), &params);
        assert_eq!(count_kind(&chunk, TileKind::GroundCover), 64);
        assert_eq!(count_kind(&chunk, TileKind::Building), 48);
    }

    #[test]
    fn test_zero_density_produces_no_buildings() {
        let mut params = CityParams::default();
        params.building_density = 0.0;
        let chunk = generate_chunk(ChunkKey::new(0, 0), &params);
        assert_eq!(count_kind(&chunk, TileKind::Building), 0);
        assert!(count_kind(&chunk, TileKind::GroundCover) > 0);
    }

    #[test]
    fn test_buildings_are_grounded_with_minimum_height() {
        let mut params = CityParams::default();
        params.building_density = 1.0;
        let chunk = generate_chunk(ChunkKey::new(1, 1), &params);
        for tile in chunk.tiles().iter().filter(|t| t.kind == TileKind::Building) {
            let geo = tile.geometry().unwrap();
            assert!(geo.height >= MIN_BUILDING_HEIGHT as f32);
            assert_eq!(tile.position[1], geo.height / 2.0);
            assert_eq!(geo.vertex_jitter.as_ref().unwrap().len(), ROOF_VERTICES);
        }
    }

    #[test]
    fn test_curbs_only_line_main_roads() {
        // Each buildable lot adjacent to a main road line carries one curb
        // per such side: 16 per direction with interval 5.
        let chunk = generate_chunk(ChunkKey::new(0, 0), &CityParams::default());
        assert_eq!(count_kind(&chunk, TileKind::Curb), 64);
    }

    #[test]
    fn test_dispose_empties_arena_and_counts_resources() {
        let mut chunk = generate_chunk(ChunkKey::new(0, 0), &CityParams::default());
        let total = chunk.tile_count();
        let stats = chunk.dispose();
        assert_eq!(stats.geometries, total);
        assert_eq!(stats.materials, total);
        assert_eq!(chunk.tile_count(), 0);
        // Disposing again finds nothing.
        assert_eq!(chunk.dispose(), ReleaseStats::default());
    }

    #[test]
    fn test_key_from_world_floors_negative_coordinates() {
        assert_eq!(ChunkKey::from_world(50.0, 50.0), ChunkKey::new(0, 0));
        assert_eq!(ChunkKey::from_world(-0.5, 0.0), ChunkKey::new(-1, 0));
        assert_eq!(ChunkKey::from_world(-100.0, 199.9), ChunkKey::new(-1, 1));
        assert_eq!(ChunkKey::new(2, 3).origin(), (200.0, 300.0));
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = ChunkKey::new(0, 0);
        assert_eq!(a.chebyshev(ChunkKey::new(1, -1)), 1);
        assert_eq!(a.chebyshev(ChunkKey::new(-3, 2)), 3);
        assert_eq!(a.chebyshev(a), 0);
    }
}
