//! Curve approximation.
//!
//! The genome holds one value per point of a fixed sample grid; fitness is
//! the L1 distance between those values and the target function on the
//! grid.

use super::require_budget;
use crate::error::{EvolveError, Result};
use crate::ga::operators::DEFAULT_INDPB;
use crate::ga::{
    apply_target, Evaluator, EvolutionConfig, EvolutionResult, EvolutionRunner, FixedBudget,
    Interval, Toolbox, TwoPointCrossover, UniformResetMutation,
};

/// Sum over grid points of `|f(x_i) - genes[i]|`.
///
/// Target values are computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveApproximation {
    grid: Vec<f64>,
    targets: Vec<f64>,
}

impl CurveApproximation {
    /// Samples `func` on `grid`.
    ///
    /// Fails if the grid is empty or `func` is undefined at a grid point.
    pub fn new<F: Fn(f64) -> f64>(func: F, grid: Vec<f64>) -> Result<Self> {
        if grid.is_empty() {
            return Err(EvolveError::InvalidGenomeLength);
        }
        let targets = grid
            .iter()
            .map(|&x| apply_target(&func, x))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Self { grid, targets })
    }

    /// The sample grid.
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// `f(x_i)` for every grid point.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }
}

impl Evaluator<f64> for CurveApproximation {
    fn evaluate(&self, genes: &[f64]) -> Result<f64> {
        if genes.len() != self.targets.len() {
            return Err(EvolveError::GenomeLengthMismatch {
                expected: self.targets.len(),
                got: genes.len(),
            });
        }
        Ok(self
            .targets
            .iter()
            .zip(genes)
            .map(|(t, g)| (t - g).abs())
            .sum())
    }
}

/// Evolves a vector of values in `bounds` that tracks `func` on `grid`.
///
/// Uses two-point crossover and per-gene uniform resampling within
/// `bounds` (indpb 0.05), for exactly `generations` generations.
pub fn approximate<F: Fn(f64) -> f64>(
    func: F,
    grid: Vec<f64>,
    bounds: Interval,
    generations: usize,
    config: EvolutionConfig,
) -> Result<EvolutionResult<f64>> {
    require_budget(generations)?;
    let evaluator = CurveApproximation::new(func, grid)?;
    let length = evaluator.grid().len();

    let toolbox = Toolbox::new(
        evaluator,
        TwoPointCrossover,
        UniformResetMutation::new(bounds, DEFAULT_INDPB)?,
    );
    EvolutionRunner::run_sampled(
        &bounds,
        length,
        toolbox,
        &FixedBudget::new(generations),
        config,
    )
}
