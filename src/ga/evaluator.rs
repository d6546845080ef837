//! Fitness evaluation contract.
//!
//! An [`Evaluator`] maps a gene sequence to a scalar score. The engine
//! always minimizes; wrap an evaluator in [`Maximize`] to search for the
//! largest score instead.
//!
//! Evaluators must be pure: the same genes always give the same score.
//! The engine relies on this when it keeps the cached fitness of genomes
//! that variation left untouched.

use crate::error::{EvolveError, Result};

/// Scores a gene sequence. Lower is better.
///
/// Closures of the form `Fn(&[G]) -> Result<f64>` implement this trait.
///
/// ```
/// use u_evolve::ga::Evaluator;
///
/// let sphere = |genes: &[f64]| -> u_evolve::Result<f64> {
///     Ok(genes.iter().map(|x| x * x).sum())
/// };
/// assert_eq!(sphere.evaluate(&[1.0, 2.0]).unwrap(), 5.0);
/// ```
pub trait Evaluator<G>: Send + Sync {
    /// Returns the fitness of `genes`, or the reason it is undefined.
    fn evaluate(&self, genes: &[G]) -> Result<f64>;
}

impl<G, F> Evaluator<G> for F
where
    F: Fn(&[G]) -> Result<f64> + Send + Sync,
{
    fn evaluate(&self, genes: &[G]) -> Result<f64> {
        self(genes)
    }
}

/// Negates the wrapped evaluator so that minimizing finds the maximum.
#[derive(Debug, Clone)]
pub struct Maximize<E>(pub E);

impl<G, E: Evaluator<G>> Evaluator<G> for Maximize<E> {
    fn evaluate(&self, genes: &[G]) -> Result<f64> {
        self.0.evaluate(genes).map(|score| -score)
    }
}

/// Applies a real target function, failing where it is undefined.
///
/// A non-finite result (division by zero, log of a negative, ...) is
/// reported as [`EvolveError::UndefinedTarget`] instead of entering
/// selection as a spurious extreme.
pub fn apply_target<F: Fn(f64) -> f64>(func: &F, x: f64) -> Result<f64> {
    let value = func(x);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvolveError::UndefinedTarget { x, value })
    }
}
