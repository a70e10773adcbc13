//! Top-down PNG export of the generated city
//!
//! Renders every live chunk into one orthographic image, painted in layer
//! order: ground cover, road surfaces, curbs, buildings. Intended for quick
//! inspection of a generated city without a rendering collaborator.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::chunk::CHUNK_WORLD_SIZE;
use crate::city::City;
use crate::tiles::TileKind;

/// Pixels per world unit; one chunk renders at 200x200.
const SCALE: f64 = 2.0;
/// Empty space outside any chunk.
const BACKGROUND: Rgb<u8> = Rgb([12, 12, 16]);

/// Paint priority, low first.
fn layer(kind: TileKind) -> u8 {
    match kind {
        TileKind::GroundCover => 0,
        TileKind::RoadSegment | TileKind::RoadJunction => 1,
        TileKind::Curb => 2,
        TileKind::Building => 3,
    }
}

/// Render the city's live chunks into an image.
pub fn render_city(city: &City) -> RgbImage {
    let keys: Vec<_> = city.chunks().map(|c| c.key).collect();
    let (min_x, max_x, min_z, max_z) = keys.iter().fold(
        (0, 0, 0, 0),
        |(min_x, max_x, min_z, max_z), k| {
            (
                min_x.min(k.x),
                max_x.max(k.x),
                min_z.min(k.z),
                max_z.max(k.z),
            )
        },
    );

    let origin_x = min_x as f64 * CHUNK_WORLD_SIZE;
    let origin_z = min_z as f64 * CHUNK_WORLD_SIZE;
    let width = ((max_x - min_x + 1) as f64 * CHUNK_WORLD_SIZE * SCALE) as u32;
    let height = ((max_z - min_z + 1) as f64 * CHUNK_WORLD_SIZE * SCALE) as u32;
    let mut img = ImageBuffer::from_pixel(width, height, BACKGROUND);

    let mut tiles: Vec<_> = city
        .chunks()
        .flat_map(|chunk| chunk.tiles().iter().map(move |t| (chunk.origin, t)))
        .collect();
    tiles.sort_by_key(|(_, t)| layer(t.kind));

    for (chunk_origin, tile) in tiles {
        let geo = match tile.geometry() {
            Some(geo) => geo,
            None => continue,
        };
        let color = match tile.material() {
            Some(mat) => mat.color.to_rgb8(),
            None => continue,
        };

        let cx = chunk_origin.0 + tile.position[0] as f64;
        let cz = chunk_origin.1 + tile.position[2] as f64;
        let half_w = geo.width as f64 / 2.0;
        let half_d = geo.depth as f64 / 2.0;

        let x0 = (((cx - half_w) - origin_x) * SCALE).floor().max(0.0) as u32;
        let z0 = (((cz - half_d) - origin_z) * SCALE).floor().max(0.0) as u32;
        let x1 = ((((cx + half_w) - origin_x) * SCALE).ceil() as u32).min(width);
        let z1 = ((((cz + half_d) - origin_z) * SCALE).ceil() as u32).min(height);

        for pz in z0..z1 {
            for px in x0..x1 {
                img.put_pixel(px, pz, Rgb(color));
            }
        }
    }

    img
}

/// Render and save the city as a PNG. Returns the image dimensions.
pub fn export_city_map(city: &City, filename: &str) -> Result<(u32, u32), image::ImageError> {
    let img = render_city(city);
    let dims = img.dimensions();
    img.save(filename)?;
    Ok(dims)
}
