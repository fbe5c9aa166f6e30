//! Spatial math for route distances and grid sizing.

use crate::models::GeoPoint;

/// Flat-earth meters per degree of latitude used when sizing the voxel grid.
pub const GRID_METERS_PER_DEG_LAT: f64 = 111_000.0;

/// Flat-earth meters per degree of longitude used when sizing the voxel grid.
///
/// This is deliberately not scaled by latitude, so east/west voxels are only
/// approximately `resolution` meters wide away from ~26° latitude.
pub const GRID_METERS_PER_DEG_LON: f64 = 100_000.0;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate the haversine distance between two points in meters.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
///
/// # Returns
/// Distance in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Straight-line distance between two points, combining the great-circle
/// ground distance with the altitude difference.
pub fn distance_3d(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let horizontal = haversine_distance(a.lat, a.lon, b.lat, b.lon);
    let vertical = (b.altitude_m - a.altitude_m).abs();
    (horizontal * horizontal + vertical * vertical).sqrt()
}
