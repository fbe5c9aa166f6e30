//! Error types for route planning.

use thiserror::Error;

/// Which end of the requested route an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Errors that can occur while planning a route.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Grid resolution is zero, negative or not a number.
    #[error("Failed to create 3D grid: invalid grid resolution {0} (must be > 0)")]
    InvalidResolution(f64),

    /// Start or end point has a non-finite coordinate.
    #[error("Failed to create 3D grid: {which} point has a non-finite coordinate")]
    InvalidCoordinate { which: Endpoint },

    /// The grid would exceed the configured voxel limit.
    #[error("Failed to create 3D grid: {voxels} voxels exceeds the limit of {limit}")]
    GridTooLarge { voxels: u64, limit: usize },

    /// Start or end voxel lies inside a no-fly zone.
    #[error("Failed to create 3D grid: {which} voxel is inside a no-fly zone")]
    EndpointBlocked { which: Endpoint },

    /// The search made no progress toward the destination.
    #[error("No path found after {iterations} iterations")]
    NoPathFound { iterations: usize },
}

impl PlanError {
    /// True for failures raised while building the grid, before any search ran.
    pub fn is_build_failure(&self) -> bool {
        !matches!(self, PlanError::NoPathFound { .. })
    }
}

/// Result type for planning operations.
pub type PlanResult<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanError::EndpointBlocked {
            which: Endpoint::Start,
        };
        assert_eq!(
            format!("{err}"),
            "Failed to create 3D grid: start voxel is inside a no-fly zone"
        );

        let err = PlanError::NoPathFound { iterations: 12 };
        assert!(format!("{err}").starts_with("No path found"));
        assert!(!err.is_build_failure());

        let err = PlanError::InvalidResolution(-5.0);
        assert!(format!("{err}").contains("-5"));
        assert!(err.is_build_failure());
    }
}
