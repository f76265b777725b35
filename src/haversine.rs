/// Sphere radius used by [`haversine`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// Great-circle distance in km between two points given in degrees.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_with_radius(lat1, lon1, lat2, lon2, EARTH_RADIUS_KM)
}

/// Same as [`haversine`] on a sphere of the given radius. The result is in
/// the radius' unit.
pub fn haversine_with_radius(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let lon1 = lon1.to_radians();
    let lon2 = lon2.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = f64::powi(f64::sin(d_lat / 2.0), 2);
    let b = f64::cos(lat1) * f64::cos(lat2) * f64::powi(f64::sin(d_lon / 2.0), 2);
    // rounding can push a + b just past 1 near antipodes; clamp keeps NaN
    let c = 2.0 * f64::asin(f64::sqrt(f64::clamp(a + b, 0.0, 1.0)));

    radius * c
}

pub fn get_distance(lat_lon: (f64, f64), lat_lon_reference: (f64, f64)) -> f64 {
    haversine(lat_lon.0, lat_lon.1, lat_lon_reference.0, lat_lon_reference.1)
}
