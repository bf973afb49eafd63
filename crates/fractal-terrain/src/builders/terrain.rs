//! Fluent builder for one "regenerate" action.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::TerrainSettings;
use crate::errors::TerrainError;
use crate::export::{self, ElevationRange, Sample};
use crate::terrain::{DiamondSquare, HeightGrid};

/// Result of a single terrain generation.
#[derive(Debug, Clone)]
pub struct GeneratedTerrain {
    /// Raw generated grid, before vertical scaling.
    pub grid: HeightGrid,
    /// Exported samples with the vertical scale applied.
    pub samples: Vec<Sample>,
    /// Observed range of `samples`.
    pub range: ElevationRange,
    /// Metrics from generation (populated if metrics tracking enabled).
    pub metrics: Option<TerrainMetrics>,
}

/// Performance metrics from terrain generation.
#[derive(Debug, Clone)]
pub struct TerrainMetrics {
    /// Time spent generating and exporting (milliseconds).
    pub generation_time_ms: u64,
    /// Grid dimension.
    pub dimension: usize,
    /// Number of exported samples.
    pub sample_count: usize,
    /// Number of subdivision levels run.
    pub levels: u32,
}

/// Builder that turns [`TerrainSettings`] into a generated heightmap.
///
/// # Example
///
/// ```rust,ignore
/// let terrain = TerrainBuilder::new()
///     .with_detail(7)
///     .with_roughness(0.6)
///     .with_vertical_scale(12.0)
///     .with_seed(2024)
///     .build()?;
///
/// let water_level = terrain.range.level_at(20.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TerrainBuilder {
    settings: TerrainSettings,
    track_metrics: bool,
}

impl TerrainBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from existing settings.
    pub fn from_settings(settings: TerrainSettings) -> Self {
        Self {
            settings,
            track_metrics: false,
        }
    }

    /// Sets the detail level (grid dimension `2^detail + 1`).
    pub fn with_detail(mut self, detail: u32) -> Self {
        self.settings.detail = detail;
        self
    }

    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.settings.roughness = roughness;
        self
    }

    pub fn with_vertical_scale(mut self, vertical_scale: f64) -> Self {
        self.settings.vertical_scale = vertical_scale;
        self
    }

    /// Sets the random seed used by [`build`](Self::build).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.settings.parallel = parallel;
        self
    }

    /// Enables metrics tracking for performance analysis.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    /// Generates terrain with an RNG seeded from the configured seed.
    pub fn build(&self) -> Result<GeneratedTerrain, TerrainError> {
        let mut rng = StdRng::seed_from_u64(self.settings.seed);
        self.build_with(&mut rng)
    }

    /// Generates terrain drawing offsets from `rng`.
    pub fn build_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GeneratedTerrain, TerrainError> {
        self.settings.validate()?;

        let start_time = if self.track_metrics {
            Some(Instant::now())
        } else {
            None
        };

        let grid = HeightGrid::with_detail(self.settings.detail)?;
        let grid = DiamondSquare::new(self.settings.roughness)
            .with_parallel(self.settings.parallel)
            .generate(grid, rng)?;

        let samples = export::to_scaled_samples(&grid, self.settings.vertical_scale);
        let range = ElevationRange::of_grid(&grid).scaled(self.settings.vertical_scale);

        info!(
            "Generated {0}x{0} terrain (roughness {1}, seed {2}): elevation {3:.2}..{4:.2}",
            grid.dimension(),
            self.settings.roughness,
            self.settings.seed,
            range.min,
            range.max
        );

        let metrics = start_time.map(|start| TerrainMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            dimension: grid.dimension(),
            sample_count: samples.len(),
            levels: self.settings.detail,
        });

        Ok(GeneratedTerrain {
            grid,
            samples,
            range,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_produces_scaled_samples() {
        let terrain = TerrainBuilder::new()
            .with_detail(3)
            .with_roughness(0.5)
            .with_vertical_scale(4.0)
            .build()
            .unwrap();

        assert_eq!(terrain.grid.dimension(), 9);
        assert_eq!(terrain.samples.len(), 81);
        for sample in &terrain.samples {
            let raw = terrain
                .grid
                .get(sample.x as isize, sample.y as isize)
                .unwrap();
            assert_eq!(sample.z, raw * 4.0);
        }
    }

    #[test]
    fn test_same_seed_same_terrain() {
        let builder = TerrainBuilder::new().with_detail(5).with_seed(12345);
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first.grid, second.grid);
        assert_eq!(first.samples, second.samples);
    }

    #[test]
    fn test_different_seed_different_terrain() {
        let first = TerrainBuilder::new().with_detail(5).with_seed(1).build().unwrap();
        let second = TerrainBuilder::new().with_detail(5).with_seed(2).build().unwrap();
        assert_ne!(first.grid, second.grid);
    }

    #[test]
    fn test_range_brackets_samples() {
        let terrain = TerrainBuilder::new().with_detail(4).build().unwrap();
        assert!(terrain.range.min <= terrain.range.max);
        for sample in &terrain.samples {
            assert!(sample.z >= terrain.range.min && sample.z <= terrain.range.max);
        }
    }

    #[test]
    fn test_range_matches_exported_samples() {
        for seed in [1, 7, 99] {
            let terrain = TerrainBuilder::new()
                .with_detail(4)
                .with_vertical_scale(3.5)
                .with_seed(seed)
                .build()
                .unwrap();
            assert_eq!(
                Some(terrain.range),
                ElevationRange::of_samples(&terrain.samples),
                "range mismatch for seed {seed}"
            );
        }
    }

    #[test]
    fn test_flat_terrain_range() {
        let terrain = TerrainBuilder::new()
            .with_detail(2)
            .with_roughness(0.0)
            .with_vertical_scale(10.0)
            .build()
            .unwrap();
        // max index 4, corners 2.0, scaled by 10.
        assert_eq!(terrain.range, ElevationRange { min: 20.0, max: 20.0 });
    }

    #[test]
    fn test_metrics_only_when_enabled() {
        let builder = TerrainBuilder::new().with_detail(3);
        assert!(builder.build().unwrap().metrics.is_none());

        let metrics = builder.with_metrics(true).build().unwrap().metrics.unwrap();
        assert_eq!(metrics.dimension, 9);
        assert_eq!(metrics.sample_count, 81);
        assert_eq!(metrics.levels, 3);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let err = TerrainBuilder::new().with_roughness(2.0).build().unwrap_err();
        assert!(matches!(err, TerrainError::InvalidSetting { name: "roughness", .. }));

        assert!(TerrainBuilder::new().with_detail(0).build().is_err());
    }

    #[test]
    fn test_from_settings() {
        let settings = TerrainSettings {
            detail: 2,
            parallel: true,
            ..Default::default()
        };
        let builder = TerrainBuilder::from_settings(settings.clone());
        assert_eq!(builder.settings(), &settings);
        assert_eq!(builder.build().unwrap().samples.len(), 25);
    }
}
