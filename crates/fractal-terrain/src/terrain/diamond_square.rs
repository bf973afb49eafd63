//! Diamond-square midpoint displacement.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use rayon::prelude::*;
use tracing::debug;

use super::grid::HeightGrid;
use crate::errors::TerrainError;

/// One of the two displacement passes run at every subdivision level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    /// Fills square centers from their four diagonal corners.
    Square,
    /// Fills edge midpoints from their four orthogonal neighbors.
    Diamond,
}

impl Pass {
    /// Cells visited by this pass at the given level, in offset draw order.
    pub(crate) fn cells(self, max: usize, size: usize, half: usize) -> Vec<(usize, usize)> {
        match self {
            Pass::Square => (half..max)
                .step_by(size)
                .flat_map(|y| (half..max).step_by(size).map(move |x| (x, y)))
                .collect(),
            Pass::Diamond => (0..=max)
                .step_by(half)
                .flat_map(|y| ((y + half) % size..=max).step_by(size).map(move |x| (x, y)))
                .collect(),
        }
    }

    /// Neighbor coordinates read for the cell at `(x, y)`, possibly off the grid.
    fn neighbors(self, x: usize, y: usize, half: usize) -> [(isize, isize); 4] {
        let (x, y, h) = (x as isize, y as isize, half as isize);
        match self {
            // top left, top right, bottom right, bottom left
            Pass::Square => [(x - h, y - h), (x + h, y - h), (x + h, y + h), (x - h, y + h)],
            // top, right, bottom, left
            Pass::Diamond => [(x, y - h), (x + h, y), (x, y + h), (x - h, y)],
        }
    }
}

/// Mean of the in-bounds candidates; `None` when every candidate is off the grid.
pub(crate) fn average<const N: usize>(candidates: [Option<f64>; N]) -> Option<f64> {
    let (sum, count) = candidates
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Diamond-square heightmap generator.
///
/// Corners are seeded with `max_index / 2`, then each level of size `s`
/// (starting at `max_index` and halving down to 2) runs a square pass
/// followed by a diamond pass. Every visited cell gets the mean of its
/// in-bounds neighbors plus a uniform offset in `[-roughness * s, roughness * s]`,
/// so displacement halves with each level.
///
/// Offsets are drawn from the caller's RNG in lattice order, square pass first.
/// The draw order does not depend on [`with_parallel`](Self::with_parallel),
/// so a seeded RNG reproduces the same grid in either mode.
#[derive(Debug, Clone)]
pub struct DiamondSquare {
    roughness: f64,
    parallel: bool,
}

impl DiamondSquare {
    /// Creates a sequential generator with the given roughness.
    pub fn new(roughness: f64) -> Self {
        Self {
            roughness,
            parallel: false,
        }
    }

    /// Computes the cells of each pass on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn roughness(&self) -> f64 {
        self.roughness
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Runs the full generation over `grid` and hands it back.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        mut grid: HeightGrid,
        rng: &mut R,
    ) -> Result<HeightGrid, TerrainError> {
        self.fill(&mut grid, rng)?;
        Ok(grid)
    }

    /// Runs the full generation in place.
    ///
    /// Fails with [`TerrainError::InvalidRoughness`] before touching the grid
    /// if the roughness could push any cell or neighbor sum past `f64::MAX`.
    pub fn fill<R: Rng + ?Sized>(
        &self,
        grid: &mut HeightGrid,
        rng: &mut R,
    ) -> Result<(), TerrainError> {
        let max = grid.max_index();
        if !elevation_bound(self.roughness, max).is_finite() {
            return Err(TerrainError::InvalidRoughness {
                roughness: self.roughness,
            });
        }

        seed_corners(grid)?;

        let mut size = max;
        let mut level = 0u32;
        while size / 2 >= 1 {
            let half = size / 2;
            let scale = self.roughness * size as f64;

            // The diamond pass reads square centers written just above.
            let squares = self.run_pass(grid, Pass::Square, size, half, scale, rng)?;
            let diamonds = self.run_pass(grid, Pass::Diamond, size, half, scale, rng)?;

            debug!(level, size, scale, squares, diamonds, "Subdivided level");
            size = half;
            level += 1;
        }

        Ok(())
    }

    /// Displaces every cell of one pass.
    ///
    /// All reads happen against the grid as it stood before the pass, then
    /// the results are written back together. Cells within a pass never read
    /// each other, so this matches an in-place sweep.
    fn run_pass<R: Rng + ?Sized>(
        &self,
        grid: &mut HeightGrid,
        pass: Pass,
        size: usize,
        half: usize,
        scale: f64,
        rng: &mut R,
    ) -> Result<usize, TerrainError> {
        let amplitude = scale.abs();
        let offsets = Uniform::new_inclusive(-amplitude, amplitude);
        let jobs: Vec<((usize, usize), f64)> = pass
            .cells(grid.max_index(), size, half)
            .into_iter()
            .map(|cell| (cell, offsets.sample(rng)))
            .collect();

        let snapshot = &*grid;
        let displace = |&((x, y), offset): &((usize, usize), f64)| {
            let neighbors = pass
                .neighbors(x, y, half)
                .map(|(nx, ny)| snapshot.get(nx, ny));
            average(neighbors)
                .map(|mean| (x, y, mean + offset))
                .ok_or(TerrainError::DegenerateAverage { x, y })
        };

        let updates: Vec<(usize, usize, f64)> = if self.parallel {
            jobs.par_iter().map(displace).collect::<Result<_, _>>()?
        } else {
            jobs.iter().map(displace).collect::<Result<_, _>>()?
        };

        for &(x, y, z) in &updates {
            grid.set(x, y, z)?;
        }
        Ok(updates.len())
    }
}

/// Upper bound on the four-neighbor sum for any cell of a grid with this
/// `max_index`.
///
/// Every cell stays within `max / 2` plus the summed level amplitudes, and
/// those amplitudes total less than `2 * |roughness| * max`.
fn elevation_bound(roughness: f64, max: usize) -> f64 {
    let max = max as f64;
    4.0 * (max / 2.0 + 2.0 * roughness.abs() * max)
}

fn seed_corners(grid: &mut HeightGrid) -> Result<(), TerrainError> {
    let max = grid.max_index();
    let base = max as f64 / 2.0;
    for (x, y) in [(0, 0), (max, 0), (max, max), (0, max)] {
        grid.set(x, y, base)?;
    }
    Ok(())
}
