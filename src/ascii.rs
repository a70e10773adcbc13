//! ASCII preview of one chunk
//!
//! Renders a chunk's cell grid as text for quick terminal inspection: road
//! cells, empty lots, and built lots each get their own character.

use crate::chunk::{Chunk, BLOCK_SIZE, CELL_SIZE};
use crate::params::CityParams;
use crate::tiles::TileKind;

/// Character for a cell under a road row or column.
const ROAD_CHAR: char = '#';
/// Character for a lot carrying a building.
const BUILDING_CHAR: char = 'B';
/// Character for an empty lot.
const LOT_CHAR: char = '.';

/// Render one chunk as a `BLOCK_SIZE` x `BLOCK_SIZE` character grid.
///
/// Rows are printed north (high z) first so the preview reads like a map.
pub fn chunk_preview(chunk: &Chunk, params: &CityParams) -> String {
    let interval = params.main_road_interval;

    // Mark cells whose lot holds a building.
    let mut built = [[false; BLOCK_SIZE as usize]; BLOCK_SIZE as usize];
    for tile in chunk.tiles() {
        if tile.kind != TileKind::Building {
            continue;
        }
        let x = (tile.position[0] as f64 / CELL_SIZE).floor() as i32;
        let z = (tile.position[2] as f64 / CELL_SIZE).floor() as i32;
        if (0..BLOCK_SIZE).contains(&x) && (0..BLOCK_SIZE).contains(&z) {
            built[z as usize][x as usize] = true;
        }
    }

    let mut out = String::with_capacity((BLOCK_SIZE as usize + 1) * BLOCK_SIZE as usize);
    for z in (0..BLOCK_SIZE).rev() {
        for x in 0..BLOCK_SIZE {
            let c = if x % interval == 0 || z % interval == 0 {
                ROAD_CHAR
            } else if built[z as usize][x as usize] {
                BUILDING_CHAR
            } else {
                LOT_CHAR
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{generate_chunk, ChunkKey};

    #[test]
    fn test_preview_shape_and_road_grid() {
        let params = CityParams::default();
        let chunk = generate_chunk(ChunkKey::new(0, 0), &params);
        let text = chunk_preview(&chunk, &params);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), BLOCK_SIZE as usize);
        assert!(lines.iter().all(|l| l.len() == BLOCK_SIZE as usize));

        // The last printed row is z = 0, a full road row.
        assert_eq!(lines[BLOCK_SIZE as usize - 1], "##########");
        // Every row carries the x = 0 and x = 5 road columns.
        for line in &lines {
            assert_eq!(line.as_bytes()[0], b'#');
            assert_eq!(line.as_bytes()[5], b'#');
        }
    }

    #[test]
    fn test_full_density_marks_road_adjacent_lots() {
        let mut params = CityParams::default();
        params.building_density = 1.0;
        let chunk = generate_chunk(ChunkKey::new(0, 0), &params);
        let text = chunk_preview(&chunk, &params);

        // Row z = 1 hugs the z = 0 main road: every lot on it is built.
        let lines: Vec<&str> = text.lines().collect();
        let row_z1 = lines[BLOCK_SIZE as usize - 2];
        assert_eq!(row_z1, "#BBBB#BBBB");

        // Row z = 2 is off the roads: only the x-adjacent columns build.
        let row_z2 = lines[BLOCK_SIZE as usize - 3];
        assert_eq!(row_z2, "#B..B#B..B");
    }
}
