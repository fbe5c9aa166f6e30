//! Flight statistics over a finished waypoint sequence.

use crate::models::{GeoPoint, PathStatistics};
use crate::spatial::distance_3d;

/// Aggregate distance, time and altitude figures for `waypoints`.
///
/// Segment length is the haversine ground distance combined with the climb.
/// Altitude extremes are sampled from the first point of every segment, so
/// the final waypoint only counts when the path has a single point.
pub fn calculate_statistics(waypoints: &[GeoPoint], cruise_speed_mps: f64) -> PathStatistics {
    let mut total_distance = 0.0;
    let mut total_time = 0.0;
    let mut max_altitude = f64::NEG_INFINITY;
    let mut min_altitude = f64::INFINITY;

    for segment in waypoints.windows(2) {
        let (from, to) = (&segment[0], &segment[1]);
        let distance = distance_3d(from, to);
        total_distance += distance;
        if cruise_speed_mps > 0.0 {
            total_time += distance / cruise_speed_mps;
        }
        max_altitude = max_altitude.max(from.altitude_m);
        min_altitude = min_altitude.min(from.altitude_m);
    }

    if waypoints.len() < 2 {
        let altitude = waypoints.first().map(|p| p.altitude_m).unwrap_or(0.0);
        max_altitude = altitude;
        min_altitude = altitude;
    }

    let average_speed = if total_time > 0.0 {
        total_distance / total_time
    } else {
        0.0
    };

    PathStatistics {
        total_waypoints: waypoints.len(),
        total_distance_m: total_distance.round(),
        total_time_s: total_time.round(),
        total_time_min: round_tenth(total_time / 60.0),
        max_altitude_m: max_altitude.round(),
        min_altitude_m: min_altitude.round(),
        average_speed_mps: round_tenth(average_speed),
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
