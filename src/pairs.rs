//! Random coordinate pairs and the JSON files that hold them.
//!
//! Files use the `{"pairs": [{"x0":..,"y0":..,"x1":..,"y1":..}]}` layout, where
//! `x` is longitude and `y` is latitude.

use std::{
    fs,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use rand::{
    Rng, SeedableRng,
    distr::{Distribution, Uniform},
    rngs::StdRng,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{coord::Coordinate, haversine::haversine_with_radius};

const CLUSTER_BATCH: u64 = 5000;
const CLUSTER_MAX_DIFF: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Pair {
    pub fn from_coordinates(from: Coordinate, to: Coordinate) -> Self {
        Self {
            x0: from.lon,
            y0: from.lat,
            x1: to.lon,
            y1: to.lat,
        }
    }

    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.y0, self.x0)
    }

    pub fn end(&self) -> Coordinate {
        Coordinate::new(self.y1, self.x1)
    }

    pub fn distance(&self, radius: f64) -> f64 {
        haversine_with_radius(self.y0, self.x0, self.y1, self.x1, radius)
    }
}

#[derive(Deserialize)]
struct PairsFile {
    pairs: Vec<Pair>,
}

#[derive(Serialize)]
struct PairsFileRef<'a> {
    pairs: &'a [Pair],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerationMethod {
    /// Spread over the whole globe.
    Uniform,
    /// Grouped in small random boxes.
    Cluster,
}

/// Generates `size` pairs. The same seed always gives the same pairs.
pub fn generate(seed: u64, size: u64, method: GenerationMethod) -> Result<Vec<Pair>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pairs: Vec<Pair> = Vec::new();
    pairs
        .try_reserve(usize::try_from(size)?)
        .with_context(|| format!("cannot hold {size} pairs in memory"))?;

    match method {
        GenerationMethod::Uniform => {
            let x_rng = Uniform::new(-180.0, 180.0)?;
            let y_rng = Uniform::new(-90.0, 90.0)?;
            for _ in 0..size {
                pairs.push(generate_single_pair(&x_rng, &y_rng, &mut rng));
            }
        }
        GenerationMethod::Cluster => {
            let (mut x_rng, mut y_rng) = generate_random_quadrants(&mut rng)?;
            for i in 0..size {
                if i > 0 && i % CLUSTER_BATCH == 0 {
                    (x_rng, y_rng) = generate_random_quadrants(&mut rng)?;
                }
                pairs.push(generate_single_pair(&x_rng, &y_rng, &mut rng));
            }
        }
    }

    Ok(pairs)
}

fn generate_random_quadrants(rng: &mut StdRng) -> Result<(Uniform<f64>, Uniform<f64>)> {
    let x_low = rng.random_range(-180..180 - CLUSTER_MAX_DIFF);
    let x_high = rng.random_range(x_low + 1..=x_low + CLUSTER_MAX_DIFF);

    let y_low = rng.random_range(-90..90 - CLUSTER_MAX_DIFF);
    let y_high = rng.random_range(y_low + 1..=y_low + CLUSTER_MAX_DIFF);

    debug!(x_low, x_high, y_low, y_high, "new cluster");

    Ok((
        Uniform::new(x_low as f64, x_high as f64)?,
        Uniform::new(y_low as f64, y_high as f64)?,
    ))
}

fn generate_single_pair(x_rng: &Uniform<f64>, y_rng: &Uniform<f64>, rng: &mut StdRng) -> Pair {
    let x0 = x_rng.sample(rng);
    let x1 = x_rng.sample(rng);
    let y0 = y_rng.sample(rng);
    let y1 = y_rng.sample(rng);

    Pair { x0, y0, x1, y1 }
}

pub fn expected_average(pairs: &[Pair], radius: f64) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    let coef = 1.0 / pairs.len() as f64;
    pairs.iter().map(|pair| coef * pair.distance(radius)).sum()
}

/// Writes `pairs` to a new file. Fails if `path` already exists.
pub fn write_pairs(path: &Path, pairs: &[Pair]) -> Result<()> {
    let file = fs::File::create_new(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &PairsFileRef { pairs })?;
    writer.flush()?;
    Ok(())
}

pub fn read_pairs(path: &Path) -> Result<Vec<Pair>> {
    let file =
        fs::File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let data: PairsFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid pairs file {}", path.display()))?;
    Ok(data.pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine::{EARTH_RADIUS_KM, haversine};

    #[test]
    fn test_generate_is_deterministic() {
        for method in [GenerationMethod::Uniform, GenerationMethod::Cluster] {
            let a = generate(42, 100, method).unwrap();
            let b = generate(42, 100, method).unwrap();
            assert_eq!(a.len(), 100);
            assert_eq!(a, b);
            assert_ne!(a, generate(43, 100, method).unwrap());
        }
    }

    #[test]
    fn test_generate_in_range() {
        for method in [GenerationMethod::Uniform, GenerationMethod::Cluster] {
            for pair in generate(7, 2000, method).unwrap() {
                for x in [pair.x0, pair.x1] {
                    assert!((-180.0..180.0).contains(&x), "{pair:?}");
                }
                for y in [pair.y0, pair.y1] {
                    assert!((-90.0..90.0).contains(&y), "{pair:?}");
                }
            }
        }
    }

    #[test]
    fn test_generate_too_many_pairs() {
        for method in [GenerationMethod::Uniform, GenerationMethod::Cluster] {
            assert!(generate(1, u64::MAX, method).is_err());
        }
    }

    #[test]
    fn test_cluster_stays_in_box() {
        let pairs = generate(3, CLUSTER_BATCH, GenerationMethod::Cluster).unwrap();
        let width = CLUSTER_MAX_DIFF as f64;
        let min_x = pairs.iter().flat_map(|p| [p.x0, p.x1]).fold(f64::MAX, f64::min);
        let max_x = pairs.iter().flat_map(|p| [p.x0, p.x1]).fold(f64::MIN, f64::max);
        let min_y = pairs.iter().flat_map(|p| [p.y0, p.y1]).fold(f64::MAX, f64::min);
        let max_y = pairs.iter().flat_map(|p| [p.y0, p.y1]).fold(f64::MIN, f64::max);
        assert!(max_x - min_x <= width);
        assert!(max_y - min_y <= width);
    }

    #[test]
    fn test_pair_axes() {
        let pair =
            Pair::from_coordinates(Coordinate::new(10.0, 20.0), Coordinate::new(-5.0, 60.0));
        assert_eq!(
            pair,
            Pair {
                x0: 20.0,
                y0: 10.0,
                x1: 60.0,
                y1: -5.0
            }
        );
        assert_eq!(pair.start(), Coordinate::new(10.0, 20.0));
        assert_eq!(pair.end(), Coordinate::new(-5.0, 60.0));
        assert_eq!(pair.distance(EARTH_RADIUS_KM), haversine(10.0, 20.0, -5.0, 60.0));
    }

    #[test]
    fn test_expected_average() {
        assert_eq!(expected_average(&[], EARTH_RADIUS_KM), 0.0);

        let quarter = Pair { x0: 0.0, y0: 0.0, x1: 90.0, y1: 0.0 };
        let zero = Pair { x0: 5.0, y0: 5.0, x1: 5.0, y1: 5.0 };
        let avg = expected_average(&[quarter, zero], EARTH_RADIUS_KM);
        assert!((avg - quarter.distance(EARTH_RADIUS_KM) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.json");
        let pairs = generate(1, 50, GenerationMethod::Uniform).unwrap();

        write_pairs(&path, &pairs).unwrap();
        assert_eq!(read_pairs(&path).unwrap(), pairs);
        assert!(write_pairs(&path, &pairs).is_err());
    }

    #[test]
    fn test_read_handwritten_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.json");
        fs::write(
            &path,
            b"{\"pairs\": [\n{\"x0\":1.5, \"y0\":-2, \"x1\":3e1, \"y1\":4}\n]}",
        )
        .unwrap();
        assert_eq!(
            read_pairs(&path).unwrap(),
            vec![Pair { x0: 1.5, y0: -2.0, x1: 30.0, y1: 4.0 }]
        );
    }

    #[test]
    fn test_read_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.json");
        fs::write(&path, b"{\"pairs\": [{\"x0\": true}]}").unwrap();
        assert!(read_pairs(&path).is_err());
        assert!(read_pairs(&dir.path().join("missing.json")).is_err());
    }
}
