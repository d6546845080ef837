//! Discrete sequence matching over an ordered alphabet.
//!
//! The genome is one symbol per target position; fitness is the sum of
//! alphabet-index distances to the target. The run stops only when the
//! best genome equals the target exactly, so set
//! [`EvolutionConfig::generation_ceiling`] if that may never happen.

use crate::error::{EvolveError, Result};
use crate::ga::{
    Alphabet, AlphabetStepMutation, Evaluator, EvolutionConfig, EvolutionResult,
    EvolutionRunner, TargetMatch, Toolbox, TwoPointCrossover,
};

/// Sum over positions of `|index(target[i]) - index(genes[i])|`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphabetDistance<T> {
    alphabet: Alphabet<T>,
    target: Vec<usize>,
}

impl<T: PartialEq> AlphabetDistance<T> {
    /// Creates the evaluator.
    ///
    /// Fails if `target` is empty or contains a symbol outside `alphabet`.
    pub fn new(target: &[T], alphabet: Alphabet<T>) -> Result<Self> {
        if target.is_empty() {
            return Err(EvolveError::InvalidGenomeLength);
        }
        let target = alphabet.indices_of(target)?;
        Ok(Self { alphabet, target })
    }
}

impl<T> Evaluator<T> for AlphabetDistance<T>
where
    T: PartialEq + Send + Sync,
{
    fn evaluate(&self, genes: &[T]) -> Result<f64> {
        if genes.len() != self.target.len() {
            return Err(EvolveError::GenomeLengthMismatch {
                expected: self.target.len(),
                got: genes.len(),
            });
        }
        let mut distance = 0usize;
        for (position, (gene, &want)) in genes.iter().zip(&self.target).enumerate() {
            let have = self
                .alphabet
                .index_of(gene)
                .ok_or(EvolveError::UnknownSymbol { position })?;
            distance += have.abs_diff(want);
        }
        Ok(distance as f64)
    }
}

/// Evolves random sequences over `alphabet` until one equals `target`.
///
/// Uses two-point crossover and alphabet-step mutation (step 3, indpb 0.05).
/// Progress is logged every `config.progress_interval` generations.
pub fn generate_sequence<T>(
    target: &[T],
    alphabet: Alphabet<T>,
    config: EvolutionConfig,
) -> Result<EvolutionResult<T>>
where
    T: Clone + PartialEq + Send + Sync,
{
    let evaluator = AlphabetDistance::new(target, alphabet.clone())?;
    let toolbox = Toolbox::new(
        evaluator,
        TwoPointCrossover,
        AlphabetStepMutation::with_defaults(alphabet.clone()),
    );
    EvolutionRunner::run_sampled(
        &alphabet,
        target.len(),
        toolbox,
        &TargetMatch::new(target.to_vec()),
        config,
    )
}

/// [`generate_sequence`] for a word spelled in `alphabet`.
pub fn generate_word(
    word: &str,
    alphabet: &Alphabet<char>,
    config: EvolutionConfig,
) -> Result<EvolutionResult<char>> {
    let target: Vec<char> = word.chars().collect();
    generate_sequence(&target, alphabet.clone(), config)
}
