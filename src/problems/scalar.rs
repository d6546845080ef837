//! Single-variable searches over a real interval.
//!
//! All four searches share one genome shape (a single real gene), no-op
//! crossover, and bounded-step mutation. They differ only in the evaluator.

use super::require_budget;
use crate::error::{check_step, EvolveError, Result};
use crate::ga::operators::{DEFAULT_INDPB, DEFAULT_REAL_MAX_STEP};
use crate::ga::{
    apply_target, BoundedStepMutation, Evaluator, EvolutionConfig, EvolutionResult,
    EvolutionRunner, FixedBudget, Interval, Maximize, NoCrossover, Toolbox,
};

/// Default secant offset for [`InflectionPoint`].
pub const DEFAULT_INFLECTION_STEP: f64 = 0.001;

/// The only gene of a scalar genome.
fn single_gene(genes: &[f64]) -> Result<f64> {
    match genes {
        [x] => Ok(*x),
        _ => Err(EvolveError::GenomeLengthMismatch {
            expected: 1,
            got: genes.len(),
        }),
    }
}

/// Fitness `f(x)`. Wrap in [`Maximize`] for `-f(x)`.
#[derive(Debug, Clone)]
pub struct ScalarObjective<F> {
    func: F,
}

impl<F: Fn(f64) -> f64> ScalarObjective<F> {
    /// Creates the objective.
    pub fn new(func: F) -> Self {
        Self { func }
    }

    /// The raw objective value at `x`.
    pub fn value_at(&self, x: f64) -> Result<f64> {
        apply_target(&self.func, x)
    }
}

impl<F> Evaluator<f64> for ScalarObjective<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn evaluate(&self, genes: &[f64]) -> Result<f64> {
        self.value_at(single_gene(genes)?)
    }
}

/// Fitness `min(|f(x) - f(x - h)|, |f(x) - f(x + h)|)`.
///
/// Small where the function is locally flat on at least one side, which
/// drives the search toward points where the secant slopes on both sides
/// are close. This is a heuristic, not a second-derivative estimate.
#[derive(Debug, Clone)]
pub struct InflectionPoint<F> {
    func: F,
    step: f64,
}

impl<F: Fn(f64) -> f64> InflectionPoint<F> {
    /// Creates the evaluator with offset `step` (must be positive).
    pub fn new(func: F, step: f64) -> Result<Self> {
        check_step("inflection step", step)?;
        Ok(Self { func, step })
    }

    /// Uses [`DEFAULT_INFLECTION_STEP`].
    pub fn with_default_step(func: F) -> Self {
        Self {
            func,
            step: DEFAULT_INFLECTION_STEP,
        }
    }
}

impl<F> Evaluator<f64> for InflectionPoint<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn evaluate(&self, genes: &[f64]) -> Result<f64> {
        let x = single_gene(genes)?;
        let y = apply_target(&self.func, x)?;
        let left = (y - apply_target(&self.func, x - self.step)?).abs();
        let right = (y - apply_target(&self.func, x + self.step)?).abs();
        Ok(left.min(right))
    }
}

/// Fitness `|f(x)|`.
#[derive(Debug, Clone)]
pub struct RootSearch<F> {
    func: F,
}

impl<F: Fn(f64) -> f64> RootSearch<F> {
    /// Creates the evaluator.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Evaluator<f64> for RootSearch<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn evaluate(&self, genes: &[f64]) -> Result<f64> {
        Ok(apply_target(&self.func, single_gene(genes)?)?.abs())
    }
}

fn run_scalar<E: Evaluator<f64>>(
    evaluator: E,
    region: Interval,
    generations: usize,
    config: EvolutionConfig,
) -> Result<EvolutionResult<f64>> {
    require_budget(generations)?;
    let toolbox = Toolbox::new(
        evaluator,
        NoCrossover,
        BoundedStepMutation::new(region, DEFAULT_REAL_MAX_STEP, DEFAULT_INDPB)?,
    );
    EvolutionRunner::run_sampled(
        &region,
        1,
        toolbox,
        &FixedBudget::new(generations),
        config,
    )
}

/// Searches `region` for the minimum of `func`.
pub fn minimize<F>(
    func: F,
    region: Interval,
    generations: usize,
    config: EvolutionConfig,
) -> Result<EvolutionResult<f64>>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    run_scalar(ScalarObjective::new(func), region, generations, config)
}

/// Searches `region` for the maximum of `func`.
///
/// The returned `best_fitness` is `-f(best)`.
pub fn maximize<F>(
    func: F,
    region: Interval,
    generations: usize,
    config: EvolutionConfig,
) -> Result<EvolutionResult<f64>>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    run_scalar(Maximize(ScalarObjective::new(func)), region, generations, config)
}

/// Searches `region` for an inflection point of `func`.
pub fn inflection_point<F>(
    func: F,
    region: Interval,
    generations: usize,
    config: EvolutionConfig,
) -> Result<EvolutionResult<f64>>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    run_scalar(
        InflectionPoint::with_default_step(func),
        region,
        generations,
        config,
    )
}

/// Searches `region` for a root of `func`.
pub fn find_root<F>(
    func: F,
    region: Interval,
    generations: usize,
    config: EvolutionConfig,
) -> Result<EvolutionResult<f64>>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    run_scalar(RootSearch::new(func), region, generations, config)
}
