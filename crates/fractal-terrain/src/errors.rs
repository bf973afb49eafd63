use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("Invalid dimension {dimension}: must be 2^n + 1")]
    InvalidDimension { dimension: usize },

    #[error("Write outside grid at ({x}, {y}) for dimension {dimension}")]
    OutOfRangeWrite { x: usize, y: usize, dimension: usize },

    /// Every neighbor of a visited cell fell outside the grid.
    #[error("No in-bounds neighbors to average at ({x}, {y})")]
    DegenerateAverage { x: usize, y: usize },

    #[error("Invalid roughness: {roughness}")]
    InvalidRoughness { roughness: f64 },

    #[error("Invalid setting {name}={value}: {reason}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl TerrainError {
    pub(crate) fn invalid_setting(
        name: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        TerrainError::InvalidSetting {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
