//! Core data models for the route planner.

use crate::grid::GridDims;
use serde::{Deserialize, Serialize};

/// A geographic position with altitude in meters above the reference datum.
///
/// Deserialization also accepts `lng` and `altitude` for the longitude and
/// altitude fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    #[serde(alias = "lng")]
    pub lon: f64,
    #[serde(alias = "altitude")]
    pub altitude_m: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64, altitude_m: f64) -> Self {
        Self {
            lat,
            lon,
            altitude_m,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite() && self.altitude_m.is_finite()
    }
}

/// An axis-aligned block of restricted airspace.
///
/// Zones arrive in one of two field-naming conventions and both land in this
/// struct when deserialized:
///
/// ```json
/// { "name": "Airport", "south_lat": 41.740, "north_lat": 41.745,
///   "west_lng": 123.370, "east_lng": 123.380,
///   "min_altitude": 0, "max_altitude": 300 }
///
/// { "name": "Airport", "minLat": 41.740, "maxLat": 41.745,
///   "minLng": 123.370, "maxLng": 123.380, "minAlt": 0, "maxAlt": 300 }
/// ```
///
/// When an object carries both spellings of a bound, the camelCase value
/// wins. Serialization always uses the field names below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNoFlyZone")]
pub struct NoFlyZone {
    pub name: String,
    pub south_lat: f64,
    pub north_lat: f64,
    pub west_lon: f64,
    pub east_lon: f64,
    pub min_altitude_m: f64,
    pub max_altitude_m: f64,
}

/// Zone as it appears on the wire, with every accepted spelling optional.
#[derive(Deserialize)]
struct RawNoFlyZone {
    #[serde(default)]
    name: String,
    #[serde(rename = "minLat")]
    min_lat: Option<f64>,
    #[serde(rename = "maxLat")]
    max_lat: Option<f64>,
    #[serde(rename = "minLng")]
    min_lng: Option<f64>,
    #[serde(rename = "maxLng")]
    max_lng: Option<f64>,
    #[serde(rename = "minAlt")]
    min_alt: Option<f64>,
    #[serde(rename = "maxAlt")]
    max_alt: Option<f64>,
    south_lat: Option<f64>,
    north_lat: Option<f64>,
    west_lng: Option<f64>,
    east_lng: Option<f64>,
    min_altitude: Option<f64>,
    max_altitude: Option<f64>,
    west_lon: Option<f64>,
    east_lon: Option<f64>,
    min_altitude_m: Option<f64>,
    max_altitude_m: Option<f64>,
}

impl TryFrom<RawNoFlyZone> for NoFlyZone {
    type Error = String;

    fn try_from(raw: RawNoFlyZone) -> Result<Self, Self::Error> {
        fn required(value: Option<f64>, field: &str) -> Result<f64, String> {
            value.ok_or_else(|| format!("missing field `{field}`"))
        }

        Ok(Self {
            south_lat: required(raw.min_lat.or(raw.south_lat), "south_lat")?,
            north_lat: required(raw.max_lat.or(raw.north_lat), "north_lat")?,
            west_lon: required(raw.min_lng.or(raw.west_lng).or(raw.west_lon), "west_lng")?,
            east_lon: required(raw.max_lng.or(raw.east_lng).or(raw.east_lon), "east_lng")?,
            min_altitude_m: required(
                raw.min_alt.or(raw.min_altitude).or(raw.min_altitude_m),
                "min_altitude",
            )?,
            max_altitude_m: required(
                raw.max_alt.or(raw.max_altitude).or(raw.max_altitude_m),
                "max_altitude",
            )?,
            name: raw.name,
        })
    }
}

impl NoFlyZone {
    pub fn new(
        name: impl Into<String>,
        south_lat: f64,
        north_lat: f64,
        west_lon: f64,
        east_lon: f64,
        min_altitude_m: f64,
        max_altitude_m: f64,
    ) -> Self {
        Self {
            name: name.into(),
            south_lat,
            north_lat,
            west_lon,
            east_lon,
            min_altitude_m,
            max_altitude_m,
        }
    }

    /// Check if a point lies inside this zone. All bounds are inclusive.
    pub fn contains_point(&self, lat: f64, lon: f64, altitude_m: f64) -> bool {
        lat >= self.south_lat
            && lat <= self.north_lat
            && lon >= self.west_lon
            && lon <= self.east_lon
            && altitude_m >= self.min_altitude_m
            && altitude_m <= self.max_altitude_m
    }
}

/// Per-call planning options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Overrides the planner's default grid resolution for this call.
    #[serde(default)]
    pub grid_resolution_m: Option<f64>,
    /// Run the moving-average smoother over the voxel path.
    #[serde(default)]
    pub smooth_path: bool,
    /// Smoother window size, defaults to 3.
    #[serde(default)]
    pub smoothing_window: Option<usize>,
}

impl PlanOptions {
    pub fn with_resolution(mut self, grid_resolution_m: f64) -> Self {
        self.grid_resolution_m = Some(grid_resolution_m);
        self
    }

    pub fn smoothed(mut self) -> Self {
        self.smooth_path = true;
        self
    }
}

/// Aggregate flight figures for a planned path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStatistics {
    pub total_waypoints: usize,
    pub total_distance_m: f64,
    pub total_time_s: f64,
    pub total_time_min: f64,
    pub max_altitude_m: f64,
    pub min_altitude_m: f64,
    pub average_speed_mps: f64,
}

/// Whether a planned route reaches the requested destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// The path ends in the destination voxel.
    Complete,
    /// The destination was unreachable within the iteration budget; the
    /// path ends at the closest voxel reached instead.
    Partial {
        /// Remaining grid-index distance between the path end and the destination.
        remaining_grid_distance: f64,
    },
}

impl RouteOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, RouteOutcome::Complete)
    }
}

/// Successful output of one planning call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedRoute {
    pub path: Vec<GeoPoint>,
    pub statistics: PathStatistics,
    pub outcome: RouteOutcome,
    /// Search expansions spent.
    pub iterations: usize,
    pub grid_dims: GridDims,
    /// Voxels removed from the search by no-fly zones.
    pub blocked_voxels: usize,
}
