//! Genetic algorithm engine.
//!
//! A generic GA built on a concrete [`Genome`] type parameterized by gene
//! type. A run is configured explicitly, with no global registration step:
//!
//! - a search domain ([`Interval`] or [`Alphabet`]) to sample genes from
//! - a [`Toolbox`]: [`Evaluator`], [`Crossover`], [`Mutation`], [`Selection`]
//! - a [`Termination`] predicate
//! - an [`EvolutionConfig`] with rates, seed, and an optional generation ceiling
//!
//! Each generation clones the population, applies crossover to adjacent
//! pairs and mutation to each offspring independently, evaluates the
//! offspring whose fitness is stale, and selects a new population of the
//! same size. Fitness is always minimized; see [`Maximize`].
//!
//! # Key Types
//!
//! - [`Evolution`]: one run as a state machine
//! - [`EvolutionRunner`]: single-call entry point
//! - [`EvolutionResult`]: best genome and run statistics
//!
//! # Submodules
//!
//! - [`operators`]: two-point / no-op crossover, uniform reset, bounded step,
//!   and alphabet step mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod domain;
mod evaluator;
pub mod operators;
mod runner;
mod selection;
mod termination;
mod types;

pub use config::{EvolutionConfig, Toolbox};
pub use domain::{Alphabet, GeneSampler, Interval};
pub use evaluator::{apply_target, Evaluator, Maximize};
pub use operators::{
    AlphabetStepMutation, BoundedStepMutation, Crossover, Mutation, NoCrossover,
    TwoPointCrossover, UniformResetMutation,
};
pub use runner::{Evolution, EvolutionResult, EvolutionRunner, EvolutionState, StopReason};
pub use selection::{tournament, Selection};
pub use termination::{AnyOf, FixedBudget, TargetMatch, Termination, TerminationExt};
pub use types::{Genome, Population};
