//! Route planning entry point.
//!
//! `PathPlanner` owns the configuration and the no-fly zone list and runs one
//! complete pipeline per call: build the grid, rasterize zones, check the
//! endpoints, search, copy the voxel path out, smooth, and summarize.

use crate::config::PlannerConfig;
use crate::error::{PlanError, PlanResult};
use crate::grid::build_grid;
use crate::models::{GeoPoint, NoFlyZone, PathStatistics, PlanOptions, PlannedRoute, RouteOutcome};
use crate::no_fly::apply_no_fly_zones;
use crate::search::{find_path, SearchOutcome};
use crate::smoothing::{smooth_path, DEFAULT_SMOOTHING_WINDOW};
use crate::stats::calculate_statistics;
use serde::{Deserialize, Serialize};

/// Plans collision-free routes around a configurable set of no-fly zones.
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    config: PlannerConfig,
    no_fly_zones: Vec<NoFlyZone>,
}

impl PathPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            no_fly_zones: Vec::new(),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Replace the restricted airspace used by subsequent calls.
    pub fn set_no_fly_zones(&mut self, zones: Vec<NoFlyZone>) {
        tracing::debug!("Set {} no-fly zones", zones.len());
        self.no_fly_zones = zones;
    }

    pub fn no_fly_zones(&self) -> &[NoFlyZone] {
        &self.no_fly_zones
    }

    /// Plan a route from `start` to `end`.
    ///
    /// A successful result may stop short of `end` when the destination is
    /// unreachable; check [`PlannedRoute::outcome`] before relying on the
    /// final waypoint.
    pub fn plan_path(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        options: &PlanOptions,
    ) -> PlanResult<PlannedRoute> {
        let resolution_m = options
            .grid_resolution_m
            .unwrap_or(self.config.grid_resolution_m);
        tracing::debug!(
            "Planning route from ({:.6}, {:.6}, {:.1}m) to ({:.6}, {:.6}, {:.1}m) at {}m resolution",
            start.lat,
            start.lon,
            start.altitude_m,
            end.lat,
            end.lon,
            end.altitude_m,
            resolution_m
        );

        let mut build = build_grid(&start, &end, resolution_m, self.config.max_voxels)?;
        let blocked_voxels = apply_no_fly_zones(&mut build.grid, &self.no_fly_zones);
        build.validate_endpoints()?;

        let outcome = find_path(
            &mut build.grid,
            build.start,
            build.end,
            self.config.max_iterations,
        );
        let iterations = outcome.iterations();
        let (voxel_path, route_outcome) = match outcome {
            SearchOutcome::Found { path, .. } => (path, RouteOutcome::Complete),
            SearchOutcome::Partial {
                path, remaining, ..
            } => (
                path,
                RouteOutcome::Partial {
                    remaining_grid_distance: remaining,
                },
            ),
            SearchOutcome::Exhausted { iterations } => {
                return Err(PlanError::NoPathFound { iterations });
            }
        };

        let waypoints: Vec<GeoPoint> = voxel_path
            .iter()
            .map(|&id| build.grid.voxel(id).position)
            .collect();
        let path = if options.smooth_path {
            smooth_path(
                &waypoints,
                options.smoothing_window.unwrap_or(DEFAULT_SMOOTHING_WINDOW),
            )
        } else {
            waypoints
        };

        let statistics = calculate_statistics(&path, self.config.cruise_speed_mps);
        tracing::info!(
            "Route planned: {} waypoints, {:.0} m, {} iterations",
            statistics.total_waypoints,
            statistics.total_distance_m,
            iterations
        );

        Ok(PlannedRoute {
            path,
            statistics,
            outcome: route_outcome,
            iterations,
            grid_dims: build.grid.dims(),
            blocked_voxels,
        })
    }
}

/// Flat, serializable view of a planning result for JSON consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub success: bool,
    pub path: Vec<GeoPoint>,
    pub statistics: Option<PathStatistics>,
    pub outcome: Option<RouteOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<PlanResult<PlannedRoute>> for PlanResponse {
    fn from(result: PlanResult<PlannedRoute>) -> Self {
        match result {
            Ok(route) => Self {
                success: true,
                path: route.path,
                statistics: Some(route.statistics),
                outcome: Some(route.outcome),
                error: None,
            },
            Err(err) => Self {
                success: false,
                path: Vec::new(),
                statistics: None,
                outcome: None,
                error: Some(err.to_string()),
            },
        }
    }
}
