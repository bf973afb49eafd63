//! Fluent builder APIs for terrain generation.
//!
//! The [`TerrainBuilder`] wires settings, grid, generator and exporter
//! together for a single regenerate action.

mod terrain;

pub use terrain::{GeneratedTerrain, TerrainBuilder, TerrainMetrics};
