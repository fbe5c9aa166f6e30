//! Turning planning responses into process outcomes.

use anyhow::Result;
use skyroute_core::PlanResponse;

/// Error out when `response` records a failed plan, so the process exits
/// non-zero whichever output format was printed.
pub fn ensure_planned(response: &PlanResponse) -> Result<()> {
    if response.success {
        return Ok(());
    }
    let reason = response.error.as_deref().unwrap_or("unknown error");
    anyhow::bail!("Planning failed: {}", reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyroute_core::{GeoPoint, PathPlanner, PlanOptions};

    fn endpoints() -> (GeoPoint, GeoPoint) {
        (
            GeoPoint::new(41.748, 123.362, 100.0),
            GeoPoint::new(41.733, 123.413, 120.0),
        )
    }

    #[test]
    fn failed_plan_is_an_error() {
        let (start, end) = endpoints();
        let result = PathPlanner::default().plan_path(
            start,
            end,
            &PlanOptions::default().with_resolution(0.0),
        );
        let err = ensure_planned(&PlanResponse::from(result)).unwrap_err();
        assert!(err.to_string().starts_with("Planning failed: Failed to create 3D grid"));
    }

    #[test]
    fn successful_plan_passes() {
        let (start, end) = endpoints();
        let result = PathPlanner::default().plan_path(start, end, &PlanOptions::default());
        assert!(ensure_planned(&PlanResponse::from(result)).is_ok());
    }
}
