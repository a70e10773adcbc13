use std::error::Error;
use std::fs;

use clap::Parser;
use rand::SeedableRng;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use city_generator::chunk::ChunkKey;
use city_generator::{ascii, export, City, CityParams};

#[derive(Parser, Debug)]
#[command(name = "city_generator")]
#[command(about = "Generate a procedural grid city around a roaming viewpoint")]
struct Args {
    /// Global random seed (random if not specified)
    #[arg(short, long)]
    seed: Option<i64>,

    /// Building density in [0, 1]
    #[arg(short, long)]
    density: Option<f64>,

    /// Main road interval in cells
    #[arg(short, long)]
    interval: Option<i32>,

    /// Render radius in chunks around the camera
    #[arg(short, long)]
    radius: Option<i32>,

    /// Ticks of random camera roaming after the initial update
    #[arg(short, long, default_value = "0")]
    ticks: u32,

    /// Load parameters from a JSON file before applying other flags
    #[arg(long)]
    params: Option<String>,

    /// Save the effective parameters to a JSON file
    #[arg(long)]
    save_params: Option<String>,

    /// Export a top-down PNG of the generated city
    #[arg(short, long)]
    export: Option<String>,

    /// Print an ASCII preview of the camera's chunk
    #[arg(long)]
    ascii: bool,
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut params = match &args.params {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => CityParams::default(),
    };

    // A loaded file keeps its own seed unless --seed overrides it.
    let seed = match (args.seed, &args.params) {
        (Some(seed), _) => seed,
        (None, Some(_)) => params.random_seed,
        (None, None) => rand::random::<u32>() as i64 % 10_000,
    };
    params.random_seed = seed;
    if let Some(density) = args.density {
        params.building_density = density;
    }
    if let Some(interval) = args.interval {
        params.main_road_interval = interval;
    }
    if let Some(radius) = args.radius {
        params.render_distance = radius;
    }

    if let Some(path) = &args.save_params {
        fs::write(path, serde_json::to_string_pretty(&params)?)?;
        println!("Saved parameters to {}", path);
    }

    println!("Generating city with seed: {}", seed);
    println!(
        "Density {:.2}, interval {}, render radius {}",
        params.building_density, params.main_road_interval, params.render_distance
    );

    let mut city = City::new(params)?;

    let (mut cam_x, mut cam_z) = (0.0, 0.0);
    let generated = city.update(cam_x, cam_z);
    println!(
        "Initial update: {} chunks generated, {} tiles total",
        generated,
        city.tile_count()
    );

    if args.ticks > 0 {
        println!("Roaming camera for {} ticks...", args.ticks);
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        for _ in 0..args.ticks {
            cam_x += rng.gen_range(-60.0..60.0);
            cam_z += rng.gen_range(-60.0..60.0);
            city.update(cam_x, cam_z);
        }
        println!(
            "Camera ended at ({:.0}, {:.0}); {} chunks resident, {} tiles",
            cam_x,
            cam_z,
            city.chunk_count(),
            city.tile_count()
        );
    }

    if let Some(path) = &args.export {
        let (w, h) = export::export_city_map(&city, path)?;
        println!("Exported {}x{} city map to {}", w, h, path);
    }

    if args.ascii {
        let key = ChunkKey::from_world(cam_x, cam_z);
        if let Some(chunk) = city.chunks().find(|c| c.key == key) {
            println!("Chunk ({}, {}):", key.x, key.z);
            print!("{}", ascii::chunk_preview(chunk, city.params()));
        }
    }

    Ok(())
}
