//! Sample optimization problems built on the [`ga`](crate::ga) engine.
//!
//! Each problem supplies a search domain, an evaluator, and an operator
//! pair, then hands them to [`EvolutionRunner`](crate::ga::EvolutionRunner):
//!
//! | Problem | Genome | Crossover | Mutation | Stops |
//! |---------|--------|-----------|----------|-------|
//! | [`approximate`] | one real per grid point | two-point | uniform reset | fixed budget |
//! | [`minimize`], [`maximize`] | one real | none | bounded step | fixed budget |
//! | [`inflection_point`] | one real | none | bounded step | fixed budget |
//! | [`find_root`] | one real | none | bounded step | fixed budget |
//! | [`generate_word`] | one symbol per letter | two-point | alphabet step | exact match |
//!
//! Rendering of results is left to the caller.

mod curve;
mod scalar;
mod word;

pub use curve::{approximate, CurveApproximation};
pub use scalar::{
    find_root, inflection_point, maximize, minimize, InflectionPoint, RootSearch,
    ScalarObjective, DEFAULT_INFLECTION_STEP,
};
pub use word::{generate_sequence, generate_word, AlphabetDistance};

use crate::error::{check_step, EvolveError, Result};

/// Evenly spaced values in the half-open range `[start, end)`.
///
/// Returns an empty grid when `start >= end`.
///
/// ```
/// use u_evolve::problems::float_range;
///
/// let grid = float_range(-2.0, 2.0, 0.5).unwrap();
/// assert_eq!(grid, vec![-2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5]);
/// ```
pub fn float_range(start: f64, end: f64, step: f64) -> Result<Vec<f64>> {
    check_step("grid step", step)?;
    if !start.is_finite() || !end.is_finite() {
        return Err(EvolveError::InvalidInterval {
            lower: start,
            upper: end,
        });
    }
    if start >= end {
        return Ok(Vec::new());
    }
    let count = ((end - start) / step).ceil() as usize;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

/// Adapters run at least one generation.
fn require_budget(generations: usize) -> Result<()> {
    if generations == 0 {
        Err(EvolveError::InvalidGenerationBudget)
    } else {
        Ok(())
    }
}
