//! Heightmap storage and generation.
//!
//! This module provides the [`HeightGrid`] elevation matrix and the
//! [`DiamondSquare`] generator that fills it with fractal terrain.

mod diamond_square;
mod grid;

pub use diamond_square::DiamondSquare;
pub use grid::HeightGrid;
