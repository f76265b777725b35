use crate::error::{GeoError, Result};

/// Slope angle in degrees of the segment between two points, treating
/// latitude and longitude degrees as planar axes.
///
/// This is not a compass bearing and is only meaningful over short
/// distances. Equal longitudes give ±90° following the sign of the latitude
/// delta, and identical points give NaN.
pub fn get_angle_degree(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    f64::atan((lat2 - lat1) / (lon2 - lon1)).to_degrees()
}

/// Like [`get_angle_degree`], but refuses equal longitudes.
pub fn try_angle_degree(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    if lon2 == lon1 {
        return Err(GeoError::ZeroLongitudeDelta);
    }
    Ok(get_angle_degree(lat1, lon1, lat2, lon2))
}
