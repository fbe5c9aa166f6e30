//! Skyroute CLI - command line tools around the skyroute planner.
//!
//! Binaries:
//! - plan_route: plan a single route and print a summary or JSON
//! - compare_resolutions: plan one scenario at several grid resolutions

pub mod logging;
pub mod report;
pub mod scenario;

pub use logging::init_tracing;
pub use report::ensure_planned;
pub use scenario::{load_zones, parse_point, Scenario, ScenarioKind};
