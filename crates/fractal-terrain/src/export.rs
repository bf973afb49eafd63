//! Flattening a finished grid into samples for rendering consumers.

use serde::{Deserialize, Serialize};

use crate::terrain::HeightGrid;

/// One elevation sample at grid coordinate `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: usize,
    pub y: usize,
    /// Elevation at this coordinate.
    pub z: f64,
}

/// Exports every cell of `grid` as a [`Sample`].
///
/// Samples are row-major: `y` outer, `x` inner, so the sample for `(x, y)`
/// sits at index `y * dimension + x`.
pub fn to_samples(grid: &HeightGrid) -> Vec<Sample> {
    to_scaled_samples(grid, 1.0)
}

/// Exports every cell with its elevation multiplied by `vertical_scale`.
pub fn to_scaled_samples(grid: &HeightGrid, vertical_scale: f64) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(grid.cell_count());
    samples.extend(grid.iter().map(|(x, y, z)| Sample {
        x,
        y,
        z: z * vertical_scale,
    }));
    samples
}

/// Observed elevation bounds of an exported sample set.
///
/// Consumers derive band thresholds and the water level from this range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationRange {
    pub min: f64,
    pub max: f64,
}

impl ElevationRange {
    /// Returns the min/max elevation of `samples`, or `None` if empty.
    pub fn of_samples(samples: &[Sample]) -> Option<Self> {
        let first = samples.first()?.z;
        Some(samples.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |range, sample| Self {
                min: range.min.min(sample.z),
                max: range.max.max(sample.z),
            },
        ))
    }

    /// Returns the min/max elevation stored in `grid`.
    ///
    /// Never empty: a valid grid has at least four cells.
    pub fn of_grid(grid: &HeightGrid) -> Self {
        grid.iter().fold(
            Self {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |range, (_, _, z)| Self {
                min: range.min.min(z),
                max: range.max.max(z),
            },
        )
    }

    /// Range of the same elevations multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        let (a, b) = (self.min * factor, self.max * factor);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Elevation lying `percent` of the way from `min` to `max`.
    pub fn level_at(&self, percent: f64) -> f64 {
        self.min + self.span() * percent / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_grid() -> HeightGrid {
        let mut grid = HeightGrid::new(3).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, (y * 3 + x) as f64).unwrap();
            }
        }
        grid
    }

    #[test]
    fn test_one_sample_per_cell() {
        let grid = ramp_grid();
        let samples = to_samples(&grid);
        assert_eq!(samples.len(), 9);

        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.x, i % 3);
            assert_eq!(sample.y, i / 3);
            assert_eq!(Some(sample.z), grid.get(sample.x as isize, sample.y as isize));
        }
    }

    #[test]
    fn test_export_does_not_mutate() {
        let grid = ramp_grid();
        let before = grid.clone();
        let _ = to_scaled_samples(&grid, 10.0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_scaled_samples() {
        let samples = to_scaled_samples(&ramp_grid(), 2.5);
        assert_eq!(samples[4], Sample { x: 1, y: 1, z: 10.0 });
        assert_eq!(samples[8].z, 20.0);
    }

    #[test]
    fn test_elevation_range() {
        let samples = to_samples(&ramp_grid());
        let range = ElevationRange::of_samples(&samples).unwrap();
        assert_eq!(range, ElevationRange { min: 0.0, max: 8.0 });
        assert_eq!(range.span(), 8.0);
        assert_eq!(range.level_at(25.0), 2.0);
        assert_eq!(range.level_at(100.0), 8.0);
    }

    #[test]
    fn test_grid_range_matches_scaled_samples() {
        let grid = ramp_grid();
        for factor in [1.0, 2.5, 0.3, -2.0] {
            let from_samples =
                ElevationRange::of_samples(&to_scaled_samples(&grid, factor)).unwrap();
            assert_eq!(ElevationRange::of_grid(&grid).scaled(factor), from_samples);
        }
    }

    #[test]
    fn test_grid_range_of_fresh_grid() {
        let grid = HeightGrid::new(2).unwrap();
        assert_eq!(ElevationRange::of_grid(&grid), ElevationRange { min: 0.0, max: 0.0 });
    }

    #[test]
    fn test_elevation_range_empty() {
        assert_eq!(ElevationRange::of_samples(&[]), None);
    }

    #[test]
    fn test_sample_serializes_as_xyz() {
        let json = serde_json::to_string(&Sample { x: 1, y: 2, z: 0.5 }).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"z":0.5}"#);
    }
}
