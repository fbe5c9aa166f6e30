//! Skyroute core: 3D route planning for aerial vehicles on a voxel grid.
//!
//! A request is discretized into a padded voxel grid, no-fly zones are
//! rasterized onto it, and an A* search over 26-connected voxels finds a
//! route, falling back to the closest reachable voxel when the destination
//! cannot be reached. The resulting waypoints can be smoothed and are
//! summarized into flight statistics.

pub mod config;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod models;
pub mod no_fly;
pub mod planner;
pub mod search;
pub mod smoothing;
pub mod spatial;
pub mod stats;

pub use config::PlannerConfig;
pub use error::{Endpoint, PlanError, PlanResult};
pub use frontier::Frontier;
pub use grid::{build_grid, GeoBounds, GridBuild, GridDims, Voxel, VoxelGrid, VoxelId, VoxelIndex};
pub use models::{
    GeoPoint, NoFlyZone, PathStatistics, PlanOptions, PlannedRoute, RouteOutcome,
};
pub use no_fly::apply_no_fly_zones;
pub use planner::{PathPlanner, PlanResponse};
pub use search::{find_path, grid_distance, SearchOutcome};
pub use smoothing::{smooth_path, DEFAULT_SMOOTHING_WINDOW};
pub use spatial::{distance_3d, haversine_distance};
pub use stats::calculate_statistics;
