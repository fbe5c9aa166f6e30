//! Plan the same scenario at several grid resolutions and compare the results.
//!
//! Usage:
//!   cargo run -p skyroute-cli --bin compare_resolutions
//!   cargo run -p skyroute-cli --bin compare_resolutions -- --resolutions 25,50,100 --smooth

use anyhow::Result;
use clap::Parser;
use skyroute_cli::{init_tracing, Scenario, ScenarioKind};
use skyroute_core::{PathPlanner, PlanOptions, PlannerConfig};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare route quality across grid resolutions")]
struct Args {
    /// Grid resolutions in meters
    #[arg(long, value_delimiter = ',', default_values_t = vec![50.0, 100.0, 150.0])]
    resolutions: Vec<f64>,

    /// Built-in scenario to plan
    #[arg(long, value_enum, default_value_t = ScenarioKind::Complex)]
    scenario: ScenarioKind,

    /// Apply moving-average smoothing to each path
    #[arg(long)]
    smooth: bool,
}

fn main() -> Result<()> {
    init_tracing("skyroute=warn")?;
    let args = Args::parse();

    let scenario = Scenario::build(args.scenario);
    let mut planner = PathPlanner::new(PlannerConfig::from_env());
    planner.set_no_fly_zones(scenario.zones.clone());

    println!(
        "Scenario '{}' with {} no-fly zones",
        scenario.name,
        scenario.zones.len()
    );
    println!();
    println!(
        "{:>10} | {:>9} | {:>9} | {:>10} | {:>8} | {}",
        "resolution", "time (ms)", "waypoints", "distance", "max alt", "outcome"
    );
    println!("{}", "-".repeat(70));

    for resolution in &args.resolutions {
        let mut options = PlanOptions::default().with_resolution(*resolution);
        options.smooth_path = args.smooth;

        let started = Instant::now();
        let result = planner.plan_path(scenario.start, scenario.end, &options);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(route) => {
                let stats = &route.statistics;
                println!(
                    "{:>9.0}m | {:>9.1} | {:>9} | {:>8.0} m | {:>6.0} m | {}",
                    resolution,
                    elapsed_ms,
                    stats.total_waypoints,
                    stats.total_distance_m,
                    stats.max_altitude_m,
                    if route.outcome.is_complete() {
                        "complete"
                    } else {
                        "partial"
                    }
                );
            }
            Err(err) => {
                println!(
                    "{:>9.0}m | {:>9.1} | {:>9} | {:>10} | {:>8} | {}",
                    resolution, elapsed_ms, "-", "-", "-", err
                );
            }
        }
    }

    Ok(())
}
