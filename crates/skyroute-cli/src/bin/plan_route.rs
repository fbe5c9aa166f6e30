//! Plan a single drone route around no-fly zones.
//!
//! Start, end and zones default to the chosen built-in scenario; any of them
//! can be overridden from the command line.
//!
//! Usage:
//!   cargo run -p skyroute-cli --bin plan_route -- --scenario complex --smooth
//!   cargo run -p skyroute-cli --bin plan_route -- \
//!       --start 41.748,123.362,100 --end 41.733,123.413,120 --zones zones.json --json

use anyhow::Result;
use clap::Parser;
use skyroute_cli::{ensure_planned, init_tracing, load_zones, parse_point, Scenario, ScenarioKind};
use skyroute_core::{PathPlanner, PlanOptions, PlanResponse, PlannerConfig, RouteOutcome};
use std::path::PathBuf;

/// Waypoints shown at each end of the human-readable summary.
const PREVIEW_WAYPOINTS: usize = 5;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan a 3D drone route around no-fly zones")]
struct Args {
    /// Built-in scenario supplying default endpoints and zones
    #[arg(long, value_enum, default_value_t = ScenarioKind::Basic)]
    scenario: ScenarioKind,

    /// Start point as LAT,LON,ALT
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    start: Option<skyroute_core::GeoPoint>,

    /// End point as LAT,LON,ALT
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    end: Option<skyroute_core::GeoPoint>,

    /// Grid resolution in meters
    #[arg(long)]
    resolution: Option<f64>,

    /// Search iteration budget
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Largest grid the planner will allocate
    #[arg(long)]
    max_voxels: Option<usize>,

    /// Apply moving-average smoothing to the path
    #[arg(long)]
    smooth: bool,

    /// JSON file with no-fly zones, replacing the scenario's zones
    #[arg(long)]
    zones: Option<PathBuf>,

    /// Print the full response as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing("skyroute=info")?;
    let args = Args::parse();

    let scenario = Scenario::build(args.scenario);
    let start = args.start.unwrap_or(scenario.start);
    let end = args.end.unwrap_or(scenario.end);
    let zones = match &args.zones {
        Some(path) => load_zones(path)?,
        None => scenario.zones,
    };

    let mut config = PlannerConfig::from_env();
    if let Some(resolution) = args.resolution {
        config.grid_resolution_m = resolution;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(max_voxels) = args.max_voxels {
        config.max_voxels = max_voxels;
    }

    let mut planner = PathPlanner::new(config);
    planner.set_no_fly_zones(zones);

    let options = PlanOptions {
        smooth_path: args.smooth,
        ..PlanOptions::default()
    };
    let result = planner.plan_path(start, end, &options);

    if args.json {
        let response = PlanResponse::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return ensure_planned(&response);
    }

    println!("Start:  ({:.6}, {:.6}, {:.0}m)", start.lat, start.lon, start.altitude_m);
    println!("End:    ({:.6}, {:.6}, {:.0}m)", end.lat, end.lon, end.altitude_m);
    println!("Zones:  {}", planner.no_fly_zones().len());
    for zone in planner.no_fly_zones() {
        println!(
            "  - {}: lat {:.4}..{:.4}, lon {:.4}..{:.4}, alt {:.0}..{:.0}m",
            zone.name,
            zone.south_lat,
            zone.north_lat,
            zone.west_lon,
            zone.east_lon,
            zone.min_altitude_m,
            zone.max_altitude_m
        );
    }
    println!();

    let route = result.map_err(|err| anyhow::anyhow!("Planning failed: {}", err))?;

    match route.outcome {
        RouteOutcome::Complete => println!("Route found"),
        RouteOutcome::Partial {
            remaining_grid_distance,
        } => println!(
            "Partial route: destination unreachable, stopped {:.1} cells short",
            remaining_grid_distance
        ),
    }

    let stats = &route.statistics;
    println!(
        "  Grid:        {} x {} x {} ({} blocked)",
        route.grid_dims.nx, route.grid_dims.ny, route.grid_dims.nz, route.blocked_voxels
    );
    println!("  Iterations:  {}", route.iterations);
    println!("  Waypoints:   {}", stats.total_waypoints);
    println!("  Distance:    {:.0} m", stats.total_distance_m);
    println!(
        "  Time:        {:.0} s ({:.1} min)",
        stats.total_time_s, stats.total_time_min
    );
    println!(
        "  Altitude:    {:.0} - {:.0} m",
        stats.min_altitude_m, stats.max_altitude_m
    );
    println!("  Avg speed:   {:.1} m/s", stats.average_speed_mps);
    println!();

    let total = route.path.len();
    for (i, point) in route.path.iter().enumerate() {
        if i == PREVIEW_WAYPOINTS && total > 2 * PREVIEW_WAYPOINTS {
            println!("  ... {} more ...", total - 2 * PREVIEW_WAYPOINTS);
        }
        if i >= PREVIEW_WAYPOINTS && i < total.saturating_sub(PREVIEW_WAYPOINTS) {
            continue;
        }
        println!(
            "  {:>4}: ({:.6}, {:.6}, {:.1}m)",
            i, point.lat, point.lon, point.altitude_m
        );
    }

    Ok(())
}
