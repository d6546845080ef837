//! Generic evolutionary search engine.
//!
//! Provides a genetic algorithm whose representation, fitness function,
//! variation operators, and stopping rule are all supplied by the caller:
//!
//! - **Engine** ([`ga`]): genome/population model, tournament selection,
//!   pluggable crossover and mutation, fixed-budget and convergence-based
//!   termination.
//! - **Problems** ([`problems`]): ready-made evaluators and drivers for
//!   curve approximation, scalar minimum/maximum search, inflection-point
//!   search, root search, and word matching over an alphabet.
//!
//! # Architecture
//!
//! The engine knows nothing about the problems built on it. A problem
//! supplies a search domain, an evaluator, and an operator pair; the engine
//! returns the best genome of the final population. Fitness is always
//! minimized; maximization wraps the evaluator in a negation.
//!
//! Diagnostics go through the [`log`] facade. The crate installs no logger.

pub mod error;
pub mod ga;
pub mod problems;
pub mod random;

pub use error::{EvolveError, Result};
