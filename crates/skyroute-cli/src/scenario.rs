//! Pre-defined planning scenarios and input parsing for the CLI tools.

use anyhow::{Context, Result};
use clap::ValueEnum;
use skyroute_core::{GeoPoint, NoFlyZone};
use std::path::Path;

/// Built-in scenarios, all over the same Shenyang test corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    /// No restricted airspace
    Open,
    /// Airport and military zones
    Basic,
    /// Basic zones plus a high-rise block
    Complex,
}

/// A named start/end pair with the restricted airspace around it.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub zones: Vec<NoFlyZone>,
}

impl Scenario {
    pub fn build(kind: ScenarioKind) -> Self {
        let mut zones = Vec::new();
        if matches!(kind, ScenarioKind::Basic | ScenarioKind::Complex) {
            zones.push(NoFlyZone::new(
                "Airport Restricted Zone",
                41.740,
                41.745,
                123.370,
                123.380,
                0.0,
                300.0,
            ));
            zones.push(NoFlyZone::new(
                "Military Zone",
                41.735,
                41.738,
                123.390,
                123.400,
                0.0,
                500.0,
            ));
        }
        if kind == ScenarioKind::Complex {
            zones.push(NoFlyZone::new(
                "Residential High-Rise",
                41.742,
                41.744,
                123.385,
                123.388,
                0.0,
                150.0,
            ));
        }

        Self {
            name: format!("{kind:?}").to_lowercase(),
            start: GeoPoint::new(41.748, 123.362, 100.0),
            end: GeoPoint::new(41.733, 123.413, 120.0),
            zones,
        }
    }
}

/// Parse `LAT,LON,ALT` (altitude in meters) into a point.
pub fn parse_point(value: &str) -> Result<GeoPoint> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [lat, lon, alt] = parts.as_slice() else {
        anyhow::bail!("expected LAT,LON,ALT but got {:?}", value);
    };
    let lat: f64 = lat.parse().with_context(|| format!("invalid latitude {:?}", lat))?;
    let lon: f64 = lon.parse().with_context(|| format!("invalid longitude {:?}", lon))?;
    let alt: f64 = alt.parse().with_context(|| format!("invalid altitude {:?}", alt))?;
    if !(-90.0..=90.0).contains(&lat) {
        anyhow::bail!("latitude {} out of range", lat);
    }
    if !(-180.0..=180.0).contains(&lon) {
        anyhow::bail!("longitude {} out of range", lon);
    }
    Ok(GeoPoint::new(lat, lon, alt))
}

/// Read a JSON array of no-fly zones in either field-naming convention.
pub fn load_zones(path: &Path) -> Result<Vec<NoFlyZone>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read zone file {}", path.display()))?;
    let zones: Vec<NoFlyZone> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse zone file {}", path.display()))?;
    tracing::info!("Loaded {} no-fly zones from {}", zones.len(), path.display());
    Ok(zones)
}
