//! Road layout and junction topology
//!
//! The road network is pure function of the parameters: every
//! `main_road_interval`-th row and column carries a main road, and the chunk
//! boundary lines carry at least a local road. Junction shapes are re-derived
//! from that mask on every generation; nothing here is cached, because the
//! mask depends only on the parameters, never on history.

use crate::params::CityParams;
use crate::tiles::{self, Tile};

/// Horizontal axis of a road arm. `X` runs east-west, `Z` north-south.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

/// Which of a node's four axis-neighbors are road nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoadNeighbors {
    /// +z neighbor.
    pub north: bool,
    /// -z neighbor.
    pub south: bool,
    /// +x neighbor.
    pub east: bool,
    /// -x neighbor.
    pub west: bool,
}

impl RoadNeighbors {
    pub fn count(&self) -> u32 {
        self.north as u32 + self.south as u32 + self.east as u32 + self.west as u32
    }
}

/// The junction shape selected for a grid node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JunctionKind {
    /// No road touches this node.
    None,
    /// A single road arm ends here; a degenerate stub along the given axis.
    DeadEnd(Axis),
    /// Road passes straight through along the given axis.
    Straight(Axis),
    /// Two arms meet at a right angle.
    Corner,
    /// Three arms meet.
    TJunction,
    /// Full four-way intersection.
    Cross,
}

/// Whether grid line `index` carries a road.
///
/// Main roads run on every interval multiple; the chunk boundary lines carry
/// a road as well so neighboring chunks always join on a street.
pub fn is_road_line(index: i32, interval: i32, block_size: i32) -> bool {
    index % interval == 0 || index == 0 || index == block_size
}

/// Width of the road on grid line `index`.
pub fn line_width(index: i32, params: &CityParams) -> f64 {
    if index % params.main_road_interval == 0 {
        params.main_road_width
    } else {
        params.road_width
    }
}

/// Whether grid node `(x, z)` lies on a road. Out-of-range nodes are never
/// roads, so chunk-edge neighbors outside `[0, block_size]` count as absent.
pub fn is_road_node(x: i32, z: i32, interval: i32, block_size: i32) -> bool {
    if x < 0 || z < 0 || x > block_size || z > block_size {
        return false;
    }
    is_road_line(x, interval, block_size) || is_road_line(z, interval, block_size)
}

/// Probe the four axis-neighbors of node `(x, z)`.
pub fn road_neighbors(x: i32, z: i32, interval: i32, block_size: i32) -> RoadNeighbors {
    RoadNeighbors {
        north: is_road_node(x, z + 1, interval, block_size),
        south: is_road_node(x, z - 1, interval, block_size),
        east: is_road_node(x + 1, z, interval, block_size),
        west: is_road_node(x - 1, z, interval, block_size),
    }
}

/// Select the junction shape for a neighbor pattern.
pub fn classify(n: RoadNeighbors) -> JunctionKind {
    match n.count() {
        4 => JunctionKind::Cross,
        3 => JunctionKind::TJunction,
        2 if n.north && n.south => JunctionKind::Straight(Axis::Z),
        2 if n.east && n.west => JunctionKind::Straight(Axis::X),
        2 => JunctionKind::Corner,
        1 => {
            if n.north || n.south {
                JunctionKind::DeadEnd(Axis::Z)
            } else {
                JunctionKind::DeadEnd(Axis::X)
            }
        }
        _ => JunctionKind::None,
    }
}

/// Emit the road tiles for grid node `(x, z)`, in chunk-local space.
///
/// Arm widths come from the crossing lines: the north-south arm through node
/// `(x, z)` is as wide as column `x`'s road, the east-west arm as wide as row
/// `z`'s. Straight runs and dead ends become plain segments; everything where
/// arms meet becomes junction tiles.
pub fn node_tiles(x: i32, z: i32, params: &CityParams, block_size: i32, cell_size: f64) -> Vec<Tile> {
    let interval = params.main_road_interval;
    let n = road_neighbors(x, z, interval, block_size);
    let kind = classify(n);

    let node_x = x as f64 * cell_size;
    let node_z = z as f64 * cell_size;
    // Width of the north-south arm (runs along z, crossing column x) and of
    // the east-west arm (runs along x, crossing row z).
    let ns_width = line_width(x, params) as f32;
    let ew_width = line_width(z, params) as f32;
    let cell = cell_size as f32;
    let half = cell / 2.0;
    let quarter = cell / 4.0;

    let mut out = Vec::new();
    match kind {
        JunctionKind::None => {}
        JunctionKind::Straight(Axis::Z) => {
            out.push(tiles::road_segment(node_x as f32, node_z as f32, ns_width, cell));
        }
        JunctionKind::Straight(Axis::X) => {
            out.push(tiles::road_segment(node_x as f32, node_z as f32, cell, ew_width));
        }
        JunctionKind::DeadEnd(axis) => {
            // Half-length stub reaching toward the single road neighbor.
            match axis {
                Axis::Z => {
                    let offset = if n.north { quarter } else { -quarter };
                    out.push(tiles::road_segment(
                        node_x as f32,
                        node_z as f32 + offset,
                        ns_width,
                        half,
                    ));
                }
                Axis::X => {
                    let offset = if n.east { quarter } else { -quarter };
                    out.push(tiles::road_segment(
                        node_x as f32 + offset,
                        node_z as f32,
                        half,
                        ew_width,
                    ));
                }
            }
        }
        JunctionKind::Corner => {
            // Two abutting half arms, one per road neighbor.
            if n.north || n.south {
                let offset = if n.north { quarter } else { -quarter };
                out.push(tiles::road_junction(
                    node_x as f32,
                    node_z as f32 + offset,
                    ns_width,
                    half,
                ));
            }
            if n.east || n.west {
                let offset = if n.east { quarter } else { -quarter };
                out.push(tiles::road_junction(
                    node_x as f32 + offset,
                    node_z as f32,
                    half,
                    ew_width,
                ));
            }
        }
        JunctionKind::TJunction => {
            // Through arm along the collinear pair plus a stub for the third.
            if n.north && n.south {
                out.push(tiles::road_junction(node_x as f32, node_z as f32, ns_width, cell));
                let offset = if n.east { quarter } else { -quarter };
                out.push(tiles::road_junction(
                    node_x as f32 + offset,
                    node_z as f32,
                    half,
                    ew_width,
                ));
            } else {
                out.push(tiles::road_junction(node_x as f32, node_z as f32, cell, ew_width));
                let offset = if n.north { quarter } else { -quarter };
                out.push(tiles::road_junction(
                    node_x as f32,
                    node_z as f32 + offset,
                    ns_width,
                    half,
                ));
            }
        }
        JunctionKind::Cross => {
            // Full intersection: one pad sized to twice the widest arm.
            let side = 2.0 * ns_width.max(ew_width);
            out.push(tiles::road_junction(node_x as f32, node_z as f32, side, side));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileKind;

    const BLOCK: i32 = 10;

    #[test]
    fn test_main_intersection_is_cross() {
        let n = road_neighbors(5, 5, 5, BLOCK);
        assert_eq!(
            n,
            RoadNeighbors {
                north: true,
                south: true,
                east: true,
                west: true
            }
        );
        assert_eq!(classify(n), JunctionKind::Cross);
    }

    #[test]
    fn test_node_between_intersections_runs_straight_along_z() {
        // Node (5, 1) sits on the main column x=5; road continues through it
        // north-south, no east-west arm.
        let n = road_neighbors(5, 1, 5, BLOCK);
        assert!(!n.east && !n.west);
        let kind = classify(n);
        assert_eq!(kind, JunctionKind::Straight(Axis::Z));

        let tiles = node_tiles(5, 1, &CityParams::default(), BLOCK, 10.0);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].kind, TileKind::RoadSegment);
        let geo = tiles[0].geometry().unwrap();
        // Oriented along z: longer in depth than in width.
        assert!(geo.depth > geo.width);
    }

    #[test]
    fn test_single_neighbor_makes_dead_end_stub() {
        // Interval 7: node (6, 2) is off every road line, but its +x
        // neighbor (7, 2) sits on the main column x=7. Exactly one road
        // neighbor, so a half-length stub reaches east toward it.
        let n = road_neighbors(6, 2, 7, BLOCK);
        assert_eq!(n.count(), 1);
        assert!(n.east);
        assert_eq!(classify(n), JunctionKind::DeadEnd(Axis::X));

        let mut params = CityParams::default();
        params.main_road_interval = 7;
        let tiles = node_tiles(6, 2, &params, BLOCK, 10.0);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].kind, TileKind::RoadSegment);
        // Centered a quarter cell toward the neighbor, half a cell long.
        assert_eq!(tiles[0].position[0], 62.5);
        assert_eq!(tiles[0].geometry().unwrap().width, 5.0);
    }

    #[test]
    fn test_chunk_corner_is_corner() {
        let n = road_neighbors(0, 0, 5, BLOCK);
        assert_eq!(n.count(), 2);
        assert!(n.north && n.east);
        assert_eq!(classify(n), JunctionKind::Corner);

        let tiles = node_tiles(0, 0, &CityParams::default(), BLOCK, 10.0);
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|t| t.kind == TileKind::RoadJunction));
    }

    #[test]
    fn test_chunk_edge_main_crossing_is_t_junction() {
        // Node (10, 5): the +x neighbor is outside the chunk and counts as
        // absent, leaving three arms.
        let n = road_neighbors(10, 5, 5, BLOCK);
        assert_eq!(n.count(), 3);
        assert_eq!(classify(n), JunctionKind::TJunction);
    }

    #[test]
    fn test_interior_node_off_roads_emits_nothing() {
        let n = road_neighbors(3, 2, 5, BLOCK);
        assert_eq!(n.count(), 0);
        assert_eq!(classify(n), JunctionKind::None);
        assert!(node_tiles(3, 2, &CityParams::default(), BLOCK, 10.0).is_empty());
    }

    #[test]
    fn test_cross_pad_spans_twice_the_widest_arm() {
        let params = CityParams::default();
        let tiles = node_tiles(5, 5, &params, BLOCK, 10.0);
        assert_eq!(tiles.len(), 1);
        let geo = tiles[0].geometry().unwrap();
        assert_eq!(geo.width, 2.0 * params.main_road_width as f32);
        assert_eq!(geo.depth, geo.width);
    }

    #[test]
    fn test_line_widths_follow_interval() {
        let mut params = CityParams::default();
        params.main_road_interval = 3;
        assert_eq!(line_width(0, &params), params.main_road_width);
        assert_eq!(line_width(6, &params), params.main_road_width);
        // Boundary line 10 is a road but not on the main grid.
        assert!(is_road_line(10, 3, BLOCK));
        assert_eq!(line_width(10, &params), params.road_width);
    }

    #[test]
    fn test_out_of_range_neighbors_are_absent() {
        assert!(!is_road_node(-1, 0, 5, BLOCK));
        assert!(!is_road_node(0, BLOCK + 1, 5, BLOCK));
        assert!(is_road_node(0, BLOCK, 5, BLOCK));
    }
}
