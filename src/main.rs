use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use geoangle::{
    Coordinate, EARTH_RADIUS_KM, get_angle_degree, haversine_with_radius, logger,
    pairs::{self, GenerationMethod},
    profiler::{Timings, estimate_cpu_frequency},
    try_angle_degree,
};

#[derive(Parser)]
#[command(version, about = "Great-circle distance and slope angle between coordinates")]
struct Cli {
    /// Log filter, overridden by RUST_LOG.
    #[arg(long, global = true, env = "GEOANGLE_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distance in km between two "lat,lon" points.
    Distance {
        #[arg(allow_hyphen_values = true)]
        from: Coordinate,
        #[arg(allow_hyphen_values = true)]
        to: Coordinate,
        #[arg(long, env = "GEOANGLE_RADIUS", default_value_t = EARTH_RADIUS_KM)]
        radius: f64,
    },
    /// Slope angle in degrees between two "lat,lon" points.
    Angle {
        #[arg(allow_hyphen_values = true)]
        from: Coordinate,
        #[arg(allow_hyphen_values = true)]
        to: Coordinate,
        /// Fail instead of returning ±90 when the longitudes are equal.
        #[arg(long)]
        strict: bool,
    },
    /// Writes random coordinate pairs to a JSON file.
    Generate {
        #[arg(value_enum)]
        method: GenerationMethod,
        #[arg(long)]
        seed: u64,
        #[arg(long)]
        size: u64,
        #[arg(long, default_value = "pairs.json")]
        output: PathBuf,
        #[arg(long, env = "GEOANGLE_RADIUS", default_value_t = EARTH_RADIUS_KM)]
        radius: f64,
    },
    /// Average distance over the pairs of a JSON file.
    Average {
        file: PathBuf,
        #[arg(long, env = "GEOANGLE_RADIUS", default_value_t = EARTH_RADIUS_KM)]
        radius: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(&cli.log_level)?;

    match cli.command {
        Commands::Distance { from, to, radius } => {
            let km = distance(from, to, radius);
            debug!(%from, %to, radius, "distance");
            println!("{km}");
        }
        Commands::Angle { from, to, strict } => {
            let degrees = angle(from, to, strict)?;
            debug!(%from, %to, "angle");
            println!("{degrees}");
        }
        Commands::Generate {
            method,
            seed,
            size,
            output,
            radius,
        } => {
            let generated = pairs::generate(seed, size, method)?;
            pairs::write_pairs(&output, &generated)?;

            info!("Seed: {seed}");
            info!("Pair count: {size}");
            info!("Expected average: {}", pairs::expected_average(&generated, radius));
            info!("Written to {}", output.display());
        }
        Commands::Average { file, radius } => {
            let mut timings = Timings::new();
            let loaded = timings.measure("read", || pairs::read_pairs(&file))?;
            let average = timings.measure("haversine", || {
                pairs::expected_average(&loaded, radius)
            });

            info!("Pair count: {}", loaded.len());
            timings.report(estimate_cpu_frequency(100));
            println!("{average}");
        }
    }

    Ok(())
}

fn distance(from: Coordinate, to: Coordinate, radius: f64) -> f64 {
    haversine_with_radius(from.lat, from.lon, to.lat, to.lon, radius)
}

fn angle(from: Coordinate, to: Coordinate, strict: bool) -> Result<f64> {
    if strict {
        Ok(try_angle_degree(from.lat, from.lon, to.lat, to.lon)?)
    } else {
        Ok(get_angle_degree(from.lat, from.lon, to.lat, to.lon))
    }
}
