//! Dense square elevation grid with bounds-checked access.

use crate::errors::TerrainError;

/// Square matrix of elevation samples, `2^n + 1` cells on a side.
///
/// Values are stored row-major (`y * dimension + x`) and start at zero.
/// Reads outside the grid return `None` instead of failing, since the
/// subdivision passes routinely probe past the edges.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    dimension: usize,
    values: Vec<f64>,
}

impl HeightGrid {
    /// Creates a zeroed grid.
    ///
    /// Fails with [`TerrainError::InvalidDimension`] unless `dimension - 1`
    /// is a power of two.
    pub fn new(dimension: usize) -> Result<Self, TerrainError> {
        if dimension < 2 || !(dimension - 1).is_power_of_two() {
            return Err(TerrainError::InvalidDimension { dimension });
        }
        let cells = dimension
            .checked_mul(dimension)
            .ok_or(TerrainError::InvalidDimension { dimension })?;

        Ok(Self {
            dimension,
            values: vec![0.0; cells],
        })
    }

    /// Creates a zeroed grid of dimension `2^detail + 1`.
    pub fn with_detail(detail: u32) -> Result<Self, TerrainError> {
        let dimension = 1usize
            .checked_shl(detail)
            .and_then(|side| side.checked_add(1))
            .ok_or(TerrainError::InvalidDimension { dimension: usize::MAX })?;
        Self::new(dimension)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Largest valid coordinate on either axis.
    pub fn max_index(&self) -> usize {
        self.dimension - 1
    }

    pub fn cell_count(&self) -> usize {
        self.values.len()
    }

    /// Elevation at `(x, y)`, or `None` when either coordinate is off the grid.
    pub fn get(&self, x: isize, y: isize) -> Option<f64> {
        let max = self.max_index() as isize;
        if x < 0 || y < 0 || x > max || y > max {
            return None;
        }
        Some(self.values[self.index(x as usize, y as usize)])
    }

    /// Writes the elevation at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> Result<(), TerrainError> {
        if x > self.max_index() || y > self.max_index() {
            return Err(TerrainError::OutOfRangeWrite {
                x,
                y,
                dimension: self.dimension,
            });
        }
        let index = self.index(x, y);
        self.values[index] = value;
        Ok(())
    }

    /// Iterates `(x, y, elevation)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let dimension = self.dimension;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &z)| (i % dimension, i / dimension, z))
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.dimension + x
    }
}
