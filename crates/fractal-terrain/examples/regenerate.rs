//! Example: Regenerate terrain the way a rendering front end would.
//!
//! Reads settings from `TERRAIN_*` environment variables, generates the
//! heightmap twice (same seed, then the next seed) and reports the elevation
//! range a consumer derives its height bands from.
//!
//! Run with:
//! ```
//! TERRAIN_DETAIL=8 TERRAIN_ROUGHNESS=0.6 cargo run --example regenerate
//! ```

use fractal_terrain::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = TerrainSettings::from_env()?;
    tracing::info!(
        "Settings: detail {} ({}x{}), roughness {}, vertical scale {}, seed {}",
        settings.detail,
        settings.dimension(),
        settings.dimension(),
        settings.roughness,
        settings.vertical_scale,
        settings.seed
    );

    let builder = TerrainBuilder::from_settings(settings.clone()).with_metrics(true);
    let first = builder.build()?;
    report(&first);

    // A second press of "regenerate" with the next seed replaces the grid wholesale.
    let second = builder.with_seed(settings.seed.wrapping_add(1)).build()?;
    report(&second);

    let changed = first
        .samples
        .iter()
        .zip(&second.samples)
        .filter(|(a, b)| a.z != b.z)
        .count();
    tracing::info!(
        "Regeneration changed {} of {} samples",
        changed,
        first.samples.len()
    );

    Ok(())
}

fn report(terrain: &GeneratedTerrain) {
    if let Some(metrics) = &terrain.metrics {
        tracing::info!(
            "  {} samples over {} levels in {}ms",
            metrics.sample_count,
            metrics.levels,
            metrics.generation_time_ms
        );
    }

    tracing::info!(
        "  Elevation {:.2}..{:.2} (span {:.2})",
        terrain.range.min,
        terrain.range.max,
        terrain.range.span()
    );
    for percent in [25.0, 50.0, 75.0] {
        tracing::info!("    {percent:>3}% level {:.2}", terrain.range.level_at(percent));
    }
}
