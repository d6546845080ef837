//! Error types for the evolutionary engine.
//!
//! Configuration problems are reported before any generation runs.
//! Evaluation problems abort the run that produced them; no partial
//! population is returned.

use thiserror::Error;

/// Errors that can occur while configuring or running an evolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvolveError {
    /// Interval bounds are not finite or `lower >= upper`.
    #[error("invalid interval [{lower}, {upper}]: lower bound must be strictly below upper bound")]
    InvalidInterval {
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// An alphabet was constructed with no symbols.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// The same symbol appears twice in an alphabet.
    #[error("alphabet symbol at index {index} duplicates an earlier symbol")]
    DuplicateSymbol {
        /// Index of the repeated symbol
        index: usize,
    },

    /// A symbol is not part of the configured alphabet.
    #[error("symbol at position {position} is not in the alphabet")]
    UnknownSymbol {
        /// Position of the symbol in the offending sequence
        position: usize,
    },

    /// Population size is zero.
    #[error("population size ({size}) must be at least 1")]
    InvalidPopulationSize {
        /// The invalid size
        size: usize,
    },

    /// Genome length is zero.
    #[error("genome length must be at least 1")]
    InvalidGenomeLength,

    /// A problem adapter was asked to run for zero generations.
    #[error("generation budget must be at least 1")]
    InvalidGenerationBudget,

    /// The safety ceiling on generations was set to zero.
    #[error("generation ceiling must be positive or None")]
    InvalidGenerationCeiling,

    /// A probability lies outside `[0, 1]`.
    #[error("invalid {name}: {value} (must be in [0, 1])")]
    InvalidRate {
        /// Parameter name
        name: &'static str,
        /// The invalid value
        value: f64,
    },

    /// A step size is not finite and positive.
    #[error("invalid {name}: {value} (must be finite and positive)")]
    InvalidStep {
        /// Parameter name
        name: &'static str,
        /// The invalid value
        value: f64,
    },

    /// Tournament size is zero.
    #[error("tournament size must be at least 1")]
    InvalidTournamentSize,

    /// A genome does not have the length its evaluator expects.
    #[error("genome length mismatch: expected {expected}, got {got}")]
    GenomeLengthMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// The target function is undefined at a sampled point.
    #[error("target function is undefined at x = {x} (returned {value})")]
    UndefinedTarget {
        /// The input value
        x: f64,
        /// The non-finite output
        value: f64,
    },

    /// An evaluator returned NaN.
    #[error("evaluator returned NaN for genome {index} in generation {generation}")]
    UndefinedFitness {
        /// Generation in which the evaluation happened
        generation: usize,
        /// Slot of the genome in the offspring pool
        index: usize,
    },

    /// `step` was called on a run that already terminated.
    #[error("evolution has already terminated")]
    AlreadyTerminated,
}

/// A specialized `Result` type for evolution operations.
pub type Result<T> = std::result::Result<T, EvolveError>;

impl EvolveError {
    /// Returns `true` if the error was raised before any generation ran.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            EvolveError::InvalidInterval { .. }
                | EvolveError::EmptyAlphabet
                | EvolveError::DuplicateSymbol { .. }
                | EvolveError::UnknownSymbol { .. }
                | EvolveError::InvalidPopulationSize { .. }
                | EvolveError::InvalidGenomeLength
                | EvolveError::InvalidGenerationBudget
                | EvolveError::InvalidGenerationCeiling
                | EvolveError::InvalidRate { .. }
                | EvolveError::InvalidStep { .. }
                | EvolveError::InvalidTournamentSize
                | EvolveError::GenomeLengthMismatch { .. }
        )
    }

    /// Returns `true` if the fitness function failed for some genome.
    pub fn is_evaluation_error(&self) -> bool {
        matches!(
            self,
            EvolveError::UndefinedTarget { .. } | EvolveError::UndefinedFitness { .. }
        )
    }
}

/// Checks that `rate` is a probability.
pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EvolveError::InvalidRate { name, value })
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn check_step(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EvolveError::InvalidStep { name, value })
    }
}
