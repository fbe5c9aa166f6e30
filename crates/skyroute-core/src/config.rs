//! Planner configuration.

use serde::{Deserialize, Serialize};
use std::env;

/// Construction-time settings for a [`crate::PathPlanner`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Voxel edge length in meters, used when a call does not override it.
    pub grid_resolution_m: f64,
    /// Cap on search expansions per call.
    pub max_iterations: usize,
    /// Upper bound on voxels allocated per call. Voxel count grows with the
    /// cube of 1/resolution, so this guards memory for fine resolutions.
    pub max_voxels: usize,
    /// Speed used to turn path distance into flight time.
    pub cruise_speed_mps: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid_resolution_m: 100.0,
            max_iterations: 50_000,
            max_voxels: 2_000_000,
            cruise_speed_mps: 15.0,
        }
    }
}

impl PlannerConfig {
    /// Defaults overridden by `SKYROUTE_*` environment variables.
    /// Missing or unparsable values keep the default, as does a cruise speed
    /// that is not a positive finite number.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            grid_resolution_m: env_or("SKYROUTE_GRID_RESOLUTION_M", defaults.grid_resolution_m),
            max_iterations: env_or("SKYROUTE_MAX_ITERATIONS", defaults.max_iterations),
            max_voxels: env_or("SKYROUTE_MAX_VOXELS", defaults.max_voxels),
            cruise_speed_mps: positive_or(
                env_or("SKYROUTE_CRUISE_SPEED_MPS", defaults.cruise_speed_mps),
                defaults.cruise_speed_mps,
            ),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        tracing::warn!("Ignoring non-positive cruise speed {}, using {}", value, default);
        default
    }
}
