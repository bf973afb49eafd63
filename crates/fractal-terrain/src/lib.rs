//! Diamond-square heightmap generation.
//!
//! This crate fills a `2^n + 1` square grid with fractal terrain: the four
//! corners are seeded with a fixed base elevation, then alternating square and
//! diamond passes displace every remaining cell by a seeded random offset
//! whose amplitude halves at each subdivision level. The finished grid is
//! flattened into `(x, y, z)` samples for a rendering consumer.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fractal_terrain::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let grid = DiamondSquare::new(0.8).generate(HeightGrid::new(65)?, &mut rng)?;
//! let samples = to_samples(&grid);
//!
//! // Or in one call from settings:
//! let terrain = TerrainBuilder::new().with_detail(6).with_seed(42).build()?;
//! ```

pub mod builders;
pub mod config;
pub mod errors;
pub mod export;
pub mod terrain;

pub use errors::TerrainError;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{GeneratedTerrain, TerrainBuilder, TerrainMetrics};
    pub use crate::config::TerrainSettings;
    pub use crate::errors::TerrainError;
    pub use crate::export::{ElevationRange, Sample, to_samples, to_scaled_samples};
    pub use crate::terrain::{DiamondSquare, HeightGrid};
}
