//! Great-circle distance and planar slope angle between latitude/longitude
//! points given in degrees.

pub mod angle;
pub mod coord;
pub mod error;
pub mod haversine;
pub mod logger;
pub mod pairs;
pub mod profiler;

pub use angle::{get_angle_degree, try_angle_degree};
pub use coord::Coordinate;
pub use error::{GeoError, Result};
pub use haversine::{EARTH_RADIUS_KM, get_distance, haversine, haversine_with_radius};
