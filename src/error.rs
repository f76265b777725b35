//! Error types for coordinate parsing and angle computation

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("Invalid coordinate {0:?}, expected \"lat,lon\" in degrees")]
    InvalidCoordinate(String),
    #[error("Longitudes are equal, the slope angle is undefined")]
    ZeroLongitudeDelta,
}

pub type Result<T> = std::result::Result<T, GeoError>;
