//! Tracing setup shared by the binaries.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` (e.g. `skyroute=info`) when `RUST_LOG` is unset.
pub fn init_tracing(default_directive: &str) -> Result<()> {
    let filter = env_filter(
        std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        default_directive,
    )?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}

/// Filter from `rust_log` when it is set and parses, else from the default.
fn env_filter(rust_log: Option<&str>, default_directive: &str) -> Result<EnvFilter> {
    let from_env = rust_log
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok());
    match from_env {
        Some(filter) => Ok(filter),
        None => Ok(EnvFilter::try_new(default_directive)?),
    }
}
