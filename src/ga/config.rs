//! Run configuration.
//!
//! [`EvolutionConfig`] holds the numeric parameters of the generation loop.
//! [`Toolbox`] bundles the problem-specific pieces: evaluator, crossover,
//! mutation, and selection.

use super::selection::Selection;
use crate::error::{check_rate, EvolveError, Result};

/// Configuration for an evolution run.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 300);
/// assert!((config.crossover_rate - 0.5).abs() < 1e-12);
/// assert!((config.mutation_rate - 0.1).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(100)
///     .with_seed(42)
///     .with_generation_ceiling(10_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of genomes sampled by [`Evolution::initialize`](super::Evolution::initialize).
    ///
    /// A run started from an explicit population uses that population's size.
    pub population_size: usize,

    /// Probability of mating each adjacent pair (cxpb).
    pub crossover_rate: f64,

    /// Probability of mutating each offspring (mutpb).
    pub mutation_rate: f64,

    /// Random seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,

    /// Evaluate offspring on the rayon thread pool.
    ///
    /// Only honored when the `parallel` feature is enabled.
    pub parallel: bool,

    /// Log a progress line every this many generations. 0 disables it.
    pub progress_interval: usize,

    /// Hard cap on generations regardless of the termination predicate.
    ///
    /// `None` (the default) lets convergence-based runs loop until they
    /// converge, which may be forever.
    pub generation_ceiling: Option<usize>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            crossover_rate: 0.5,
            mutation_rate: 0.1,
            seed: None,
            parallel: false,
            progress_interval: 100,
            generation_ceiling: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the progress logging interval (0 disables it).
    pub fn with_progress_interval(mut self, every: usize) -> Self {
        self.progress_interval = every;
        self
    }

    /// Caps the number of generations.
    pub fn with_generation_ceiling(mut self, generations: usize) -> Self {
        self.generation_ceiling = Some(generations);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EvolveError::InvalidPopulationSize {
                size: self.population_size,
            });
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if self.generation_ceiling == Some(0) {
            return Err(EvolveError::InvalidGenerationCeiling);
        }
        Ok(())
    }
}

/// The problem-specific operators of a run.
///
/// Holds each operator by value; no registry or string lookup is involved.
#[derive(Debug, Clone)]
pub struct Toolbox<E, C, M> {
    /// Fitness function.
    pub evaluator: E,
    /// Crossover operator.
    pub crossover: C,
    /// Mutation operator.
    pub mutation: M,
    /// Survivor selection. Defaults to a tournament of 3.
    pub selection: Selection,
}

impl<E, C, M> Toolbox<E, C, M> {
    /// Creates a toolbox with the default selection.
    pub fn new(evaluator: E, crossover: C, mutation: M) -> Self {
        Self {
            evaluator,
            crossover,
            mutation,
            selection: Selection::default(),
        }
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }
}
