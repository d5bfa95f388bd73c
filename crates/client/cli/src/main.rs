//! Boots a dungeon level from game data and reports its indexed state.
mod config;
mod level;

use anyhow::{Context, Result};
use cave_content::{ConfigLoader, FeatureLoader};
use cave_core::{CaveConfig, CaveError, resolve_well_known_ids};
use config::CliConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    tracing::info!(seed = config.seed, height = config.height, width = config.width, "starting");

    let features = match &config.terrain_path {
        Some(path) => FeatureLoader::load(path)?,
        None => FeatureLoader::builtin()?,
    };
    let tunables = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => CaveConfig::default(),
    };

    // Missing core terrain means the data files are broken; there is no
    // degraded mode to fall back to.
    let well_known = resolve_well_known_ids(&features)
        .inspect_err(report)
        .context("terrain table is missing core terrain")?;

    let world = level::boot(&config, &features, &tunables, *well_known)?;
    let report = level::survey(&world, &features);
    println!("{}", level::render(&world, &features));
    println!("{report}");

    let store = world.leave_level();
    tracing::info!(carried = store.len(), "left level");
    Ok(())
}

/// Logs a core error with its classification before it ends the run.
pub(crate) fn report<E: CaveError>(err: &E) {
    tracing::error!(
        severity = err.severity().as_str(),
        code = err.error_code(),
        "{err}"
    );
}
