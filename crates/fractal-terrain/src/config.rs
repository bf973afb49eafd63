//! Configuration types for terrain generation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TerrainError;

/// Smallest accepted detail level (a 3x3 grid).
pub const MIN_DETAIL: u32 = 1;
/// Largest accepted detail level (a 4097x4097 grid).
pub const MAX_DETAIL: u32 = 12;

/// Knobs a consumer exposes for each "regenerate" action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Grid dimension is `2^detail + 1`.
    pub detail: u32,

    /// Relative displacement per subdivision level, in `[0, 1]`.
    pub roughness: f64,

    /// Multiplier applied to exported elevations (the "hill factor").
    pub vertical_scale: f64,

    /// Seed for the generation RNG.
    pub seed: u64,

    /// Whether to compute each pass on the rayon pool.
    pub parallel: bool,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            detail: 6,
            roughness: 0.8,
            vertical_scale: 10.0,
            seed: 42,
            parallel: false,
        }
    }
}

impl TerrainSettings {
    /// Grid dimension for the configured detail level.
    ///
    /// Saturates for detail levels that [`validate`](Self::validate) rejects.
    pub fn dimension(&self) -> usize {
        1usize
            .checked_shl(self.detail)
            .map_or(usize::MAX, |side| side.saturating_add(1))
    }

    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(MIN_DETAIL..=MAX_DETAIL).contains(&self.detail) {
            return Err(TerrainError::invalid_setting(
                "detail",
                self.detail,
                "must be between 1 and 12",
            ));
        }
        if !(0.0..=1.0).contains(&self.roughness) {
            return Err(TerrainError::invalid_setting(
                "roughness",
                self.roughness,
                "must be between 0 and 1",
            ));
        }
        if !self.vertical_scale.is_finite() || self.vertical_scale <= 0.0 {
            return Err(TerrainError::invalid_setting(
                "vertical_scale",
                self.vertical_scale,
                "must be a positive number",
            ));
        }
        Ok(())
    }

    /// Builds settings from `TERRAIN_*` environment variables over the defaults.
    ///
    /// Recognized: `TERRAIN_DETAIL`, `TERRAIN_ROUGHNESS`, `TERRAIN_VERTICAL_SCALE`,
    /// `TERRAIN_SEED`, `TERRAIN_PARALLEL`.
    pub fn from_env() -> Result<Self, TerrainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TerrainError> {
        let mut settings = Self::default();

        if let Some(raw) = lookup("TERRAIN_DETAIL") {
            settings.detail = parse_var("detail", &raw)?;
        }
        if let Some(raw) = lookup("TERRAIN_ROUGHNESS") {
            settings.roughness = parse_var("roughness", &raw)?;
        }
        if let Some(raw) = lookup("TERRAIN_VERTICAL_SCALE") {
            settings.vertical_scale = parse_var("vertical_scale", &raw)?;
        }
        if let Some(raw) = lookup("TERRAIN_SEED") {
            settings.seed = parse_var("seed", &raw)?;
        }
        if let Some(raw) = lookup("TERRAIN_PARALLEL") {
            settings.parallel = parse_var("parallel", &raw)?;
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn parse_var<T: FromStr>(name: &'static str, raw: &str) -> Result<T, TerrainError> {
    raw.trim()
        .parse()
        .map_err(|_| TerrainError::invalid_setting(name, raw, "could not be parsed"))
}
