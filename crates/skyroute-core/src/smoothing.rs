//! Moving-average smoothing of planned waypoints.

use crate::models::GeoPoint;

pub const DEFAULT_SMOOTHING_WINDOW: usize = 3;

/// Smooth a waypoint sequence with a single moving-average pass.
///
/// Endpoints are kept exactly. Each interior point becomes the mean of the
/// original points in `[i - window/2, i + ceil(window/2))`, clipped to the
/// sequence. Sequences shorter than three points are returned unchanged.
pub fn smooth_path(waypoints: &[GeoPoint], window: usize) -> Vec<GeoPoint> {
    let len = waypoints.len();
    if len < 3 {
        return waypoints.to_vec();
    }
    let window = window.max(1);
    let before = window / 2;
    let after = window.div_ceil(2);

    let mut smoothed = Vec::with_capacity(len);
    smoothed.push(waypoints[0]);
    for i in 1..len - 1 {
        let lo = i.saturating_sub(before);
        let hi = (i + after).min(len);
        let span = &waypoints[lo..hi];
        let n = span.len() as f64;
        let (lat, lon, alt) = span.iter().fold((0.0, 0.0, 0.0), |acc, p| {
            (acc.0 + p.lat, acc.1 + p.lon, acc.2 + p.altitude_m)
        });
        smoothed.push(GeoPoint::new(lat / n, lon / n, alt / n));
    }
    smoothed.push(waypoints[len - 1]);
    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(41.700, 123.300, 100.0),
            GeoPoint::new(41.703, 123.301, 160.0),
            GeoPoint::new(41.701, 123.302, 100.0),
            GeoPoint::new(41.704, 123.303, 190.0),
            GeoPoint::new(41.702, 123.304, 120.0),
        ]
    }

    #[test]
    fn short_paths_pass_through() {
        let two = vec![GeoPoint::new(1.0, 2.0, 3.0), GeoPoint::new(4.0, 5.0, 6.0)];
        assert_eq!(smooth_path(&two, 3), two);
        assert!(smooth_path(&[], 3).is_empty());
    }

    #[test]
    fn endpoints_are_preserved_exactly() {
        let points = zigzag();
        let smoothed = smooth_path(&points, DEFAULT_SMOOTHING_WINDOW);
        assert_eq!(smoothed.len(), points.len());
        assert_eq!(smoothed.first(), points.first());
        assert_eq!(smoothed.last(), points.last());
    }

    #[test]
    fn window_of_three_averages_immediate_neighbors() {
        let points = zigzag();
        let smoothed = smooth_path(&points, 3);
        // Uses the original neighbors, not already-smoothed ones.
        let expected_alt = (160.0 + 100.0 + 190.0) / 3.0;
        let expected_lat = (41.703 + 41.701 + 41.704) / 3.0;
        assert!((smoothed[2].altitude_m - expected_alt).abs() < 1e-9);
        assert!((smoothed[2].lat - expected_lat).abs() < 1e-12);
        assert!((smoothed[3].altitude_m - (100.0 + 190.0 + 120.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn window_is_clipped_at_sequence_edges() {
        let points = zigzag();
        let smoothed = smooth_path(&points, 5);
        // i = 1 covers [0, 4), i = 3 covers [1, 5).
        let first = (100.0 + 160.0 + 100.0 + 190.0) / 4.0;
        let third = (160.0 + 100.0 + 190.0 + 120.0) / 4.0;
        assert!((smoothed[1].altitude_m - first).abs() < 1e-9);
        assert!((smoothed[3].altitude_m - third).abs() < 1e-9);
    }

    #[test]
    fn window_of_one_is_identity() {
        let points = zigzag();
        assert_eq!(smooth_path(&points, 1), points);
        assert_eq!(smooth_path(&points, 0), points);
    }
}
