//! Variation operators.
//!
//! Crossover and mutation are pluggable through the [`Crossover`] and
//! [`Mutation`] traits. Each implementation targets one genome
//! representation:
//!
//! # Crossover Operators
//!
//! - [`TwoPointCrossover`]: swap the segment between two cut points
//!   (vector and word genomes)
//! - [`NoCrossover`]: leave both parents unchanged (single-gene genomes)
//!
//! # Mutation Operators
//!
//! - [`UniformResetMutation`]: resample each gene from its domain with
//!   probability `indpb`
//! - [`BoundedStepMutation`]: nudge real genes by a random step, discarding
//!   moves that would leave the interval
//! - [`AlphabetStepMutation`]: move one symbol a few places along the
//!   alphabet, discarding moves that would run off either end
//!
//! Operators that touch genes go through [`Genome::genes_mut`], which clears
//! the cached fitness.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

use super::domain::{Alphabet, GeneSampler, Interval};
use super::types::Genome;
use crate::error::{check_rate, check_step, Result};
use rand::Rng;

/// Default per-gene mutation probability.
pub const DEFAULT_INDPB: f64 = 0.05;

/// Default maximum step for [`BoundedStepMutation`].
pub const DEFAULT_REAL_MAX_STEP: f64 = 0.1;

/// Default maximum step for [`AlphabetStepMutation`].
pub const DEFAULT_SYMBOL_MAX_STEP: usize = 3;

/// Recombines two genomes in place.
pub trait Crossover<G>: Send + Sync {
    /// Mates `first` and `second`, overwriting them with the two children.
    fn mate<R: Rng>(&self, first: &mut Genome<G>, second: &mut Genome<G>, rng: &mut R);
}

/// Perturbs a genome in place.
pub trait Mutation<G>: Send + Sync {
    /// Mutates `genome`. May leave it unchanged.
    fn mutate<R: Rng>(&self, genome: &mut Genome<G>, rng: &mut R);
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Two-point crossover.
///
/// Draws two distinct cut indices `i < j` in `[0, len)` and exchanges the
/// genes in `[i, j)` between the parents. Genomes shorter than two genes are
/// left untouched. Lengths are preserved.
///
/// # Complexity
/// O(n)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoPointCrossover;

impl<G: Send + Sync> Crossover<G> for TwoPointCrossover {
    fn mate<R: Rng>(&self, first: &mut Genome<G>, second: &mut Genome<G>, rng: &mut R) {
        let n = first.len().min(second.len());
        if n < 2 {
            return;
        }
        let (start, end) = cut_points(n, rng);
        first.genes_mut()[start..end].swap_with_slice(&mut second.genes_mut()[start..end]);
    }
}

/// Crossover that returns both parents unchanged.
///
/// Used for single-gene genomes, where exchanging segments is meaningless.
/// Cached fitness values are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoCrossover;

impl<G: Send + Sync> Crossover<G> for NoCrossover {
    fn mate<R: Rng>(&self, _first: &mut Genome<G>, _second: &mut Genome<G>, _rng: &mut R) {}
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Resamples each gene independently from a domain with probability `indpb`.
#[derive(Debug, Clone)]
pub struct UniformResetMutation<S> {
    sampler: S,
    indpb: f64,
}

impl<S> UniformResetMutation<S> {
    /// Creates the operator. `indpb` must lie in `[0, 1]`.
    pub fn new(sampler: S, indpb: f64) -> Result<Self> {
        check_rate("indpb", indpb)?;
        Ok(Self { sampler, indpb })
    }
}

impl<G, S> Mutation<G> for UniformResetMutation<S>
where
    G: Send + Sync,
    S: GeneSampler<G>,
{
    fn mutate<R: Rng>(&self, genome: &mut Genome<G>, rng: &mut R) {
        for i in 0..genome.len() {
            if rng.random::<f64>() < self.indpb {
                genome.genes_mut()[i] = self.sampler.sample(rng);
            }
        }
    }
}

/// Bounded random step for real genes in `[a, b]`.
///
/// For each gene: draw `step = u * max_step`; with probability `indpb`
/// apply it, moving up or down with equal odds. A move up is kept only if
/// the result stays `< b`, a move down only if it stays `> a`. Rejected
/// moves leave the gene unchanged; nothing is clamped.
#[derive(Debug, Clone)]
pub struct BoundedStepMutation {
    interval: Interval,
    max_step: f64,
    indpb: f64,
}

impl BoundedStepMutation {
    /// Creates the operator. `max_step` must be positive, `indpb` in `[0, 1]`.
    pub fn new(interval: Interval, max_step: f64, indpb: f64) -> Result<Self> {
        check_step("max_step", max_step)?;
        check_rate("indpb", indpb)?;
        Ok(Self {
            interval,
            max_step,
            indpb,
        })
    }

    /// Step 0.1, indpb 0.05.
    pub fn with_defaults(interval: Interval) -> Self {
        Self {
            interval,
            max_step: DEFAULT_REAL_MAX_STEP,
            indpb: DEFAULT_INDPB,
        }
    }
}

impl Mutation<f64> for BoundedStepMutation {
    fn mutate<R: Rng>(&self, genome: &mut Genome<f64>, rng: &mut R) {
        for i in 0..genome.len() {
            let step = rng.random::<f64>() * self.max_step;
            if rng.random::<f64>() >= self.indpb {
                continue;
            }
            let gene = genome.genes()[i];
            if rng.random_bool(0.5) {
                if gene + step < self.interval.upper() {
                    genome.genes_mut()[i] = gene + step;
                }
            } else if gene - step > self.interval.lower() {
                genome.genes_mut()[i] = gene - step;
            }
        }
    }
}

/// Alphabet step for symbol genes.
///
/// Picks one position, draws an integer step in `[0, max_step]`, and with
/// probability `indpb` moves that symbol forward or backward by `step`
/// places (equal odds). Moves past either end of the alphabet are dropped.
#[derive(Debug, Clone)]
pub struct AlphabetStepMutation<T> {
    alphabet: Alphabet<T>,
    max_step: usize,
    indpb: f64,
}

impl<T> AlphabetStepMutation<T> {
    /// Creates the operator. `indpb` must lie in `[0, 1]`.
    pub fn new(alphabet: Alphabet<T>, max_step: usize, indpb: f64) -> Result<Self> {
        check_rate("indpb", indpb)?;
        Ok(Self {
            alphabet,
            max_step,
            indpb,
        })
    }

    /// Step 3, indpb 0.05.
    pub fn with_defaults(alphabet: Alphabet<T>) -> Self {
        Self {
            alphabet,
            max_step: DEFAULT_SYMBOL_MAX_STEP,
            indpb: DEFAULT_INDPB,
        }
    }
}

impl<T> Mutation<T> for AlphabetStepMutation<T>
where
    T: Clone + PartialEq + Send + Sync,
{
    fn mutate<R: Rng>(&self, genome: &mut Genome<T>, rng: &mut R) {
        if genome.is_empty() {
            return;
        }
        let position = rng.random_range(0..genome.len());
        let step = rng.random_range(0..=self.max_step);
        if rng.random::<f64>() >= self.indpb {
            return;
        }
        let Some(index) = self.alphabet.index_of(&genome.genes()[position]) else {
            return;
        };

        let target = if rng.random_bool(0.5) {
            Some(index + step).filter(|&t| t < self.alphabet.len())
        } else {
            index.checked_sub(step)
        };
        if let Some(symbol) = target.and_then(|t| self.alphabet.get(t)) {
            genome.genes_mut()[position] = symbol.clone();
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Two distinct cut points `start < end`, both in `0..n`. Requires `n >= 2`.
fn cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    // ---- Two-point crossover ----

    #[test]
    fn test_two_point_swaps_a_segment() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut a = Genome::new(vec![0u8; 8]);
            let mut b = Genome::new(vec![1u8; 8]);
            TwoPointCrossover.mate(&mut a, &mut b, &mut rng);

            // Every slot holds one parent's gene in `a` and the other's in `b`.
            for i in 0..8 {
                assert_eq!(a.genes()[i] + b.genes()[i], 1);
            }
            // The swapped slots form one contiguous, non-empty run.
            let swapped: Vec<usize> = (0..8).filter(|&i| a.genes()[i] == 1).collect();
            assert!(!swapped.is_empty());
            assert!(swapped.windows(2).all(|w| w[1] == w[0] + 1));
        }
    }

    #[test]
    fn test_two_point_invalidates_fitness() {
        let mut rng = create_rng(1);
        let mut a = Genome::new(vec!['a', 'b', 'c']);
        let mut b = Genome::new(vec!['x', 'y', 'z']);
        a.set_fitness(1.0);
        b.set_fitness(2.0);
        TwoPointCrossover.mate(&mut a, &mut b, &mut rng);
        assert!(!a.is_evaluated());
        assert!(!b.is_evaluated());
    }

    #[test]
    fn test_two_point_single_gene_is_noop() {
        let mut rng = create_rng(1);
        let mut a = Genome::new(vec![1.0]);
        let mut b = Genome::new(vec![2.0]);
        TwoPointCrossover.mate(&mut a, &mut b, &mut rng);
        assert_eq!(a.genes(), &[1.0]);
        assert_eq!(b.genes(), &[2.0]);
    }

    #[test]
    fn test_no_crossover_keeps_parents() {
        let mut rng = create_rng(1);
        let mut a = Genome::new(vec![1.0]);
        let mut b = Genome::new(vec![2.0]);
        a.set_fitness(1.0);
        NoCrossover.mate(&mut a, &mut b, &mut rng);
        assert_eq!(a.genes(), &[1.0]);
        assert_eq!(b.genes(), &[2.0]);
        assert_eq!(a.fitness(), Some(1.0));
    }

    #[test]
    fn test_cut_points_bounds() {
        let mut rng = create_rng(42);
        for n in 2..12 {
            for _ in 0..200 {
                let (start, end) = cut_points(n, &mut rng);
                assert!(start < end);
                assert!(end < n);
            }
        }
    }

    // ---- Uniform reset ----

    #[test]
    fn test_uniform_reset_full_rate_resamples_everything() {
        let region = Interval::new(5.0, 6.0).unwrap();
        let op = UniformResetMutation::new(region, 1.0).unwrap();
        let mut rng = create_rng(3);
        let mut genome = Genome::new(vec![0.0; 10]);
        op.mutate(&mut genome, &mut rng);
        assert!(genome.genes().iter().all(|&x| region.contains(x)));
    }

    #[test]
    fn test_uniform_reset_zero_rate_is_noop() {
        let region = Interval::new(5.0, 6.0).unwrap();
        let op = UniformResetMutation::new(region, 0.0).unwrap();
        let mut rng = create_rng(3);
        let mut genome = Genome::new(vec![0.0; 10]);
        genome.set_fitness(1.0);
        op.mutate(&mut genome, &mut rng);
        assert_eq!(genome.genes(), &[0.0; 10]);
        assert!(genome.is_evaluated());
    }

    #[test]
    fn test_operator_constructors_validate() {
        let region = Interval::new(0.0, 1.0).unwrap();
        assert!(UniformResetMutation::new(region, 1.5).is_err());
        assert!(BoundedStepMutation::new(region, 0.0, 0.05).is_err());
        assert!(BoundedStepMutation::new(region, 0.1, -0.1).is_err());
        assert!(AlphabetStepMutation::new(Alphabet::latin_lowercase(), 3, 2.0).is_err());
    }

    // ---- Bounded step ----

    #[test]
    fn test_bounded_step_moves_by_at_most_max_step() {
        let region = Interval::new(-2.0, 2.0).unwrap();
        let op = BoundedStepMutation::new(region, 0.1, 1.0).unwrap();
        let mut rng = create_rng(42);
        let mut moved = 0;
        for _ in 0..1000 {
            let mut genome = Genome::new(vec![0.5]);
            op.mutate(&mut genome, &mut rng);
            let delta = (genome.genes()[0] - 0.5).abs();
            assert!(delta <= 0.1);
            if delta > 0.0 {
                moved += 1;
            }
        }
        assert!(moved > 900, "expected nearly every attempt to move, got {moved}");
    }

    #[test]
    fn test_bounded_step_discards_instead_of_clamping() {
        let region = Interval::new(0.0, 1.0).unwrap();
        let op = BoundedStepMutation::new(region, 10.0, 1.0).unwrap();
        let mut rng = create_rng(42);
        let mut genome = Genome::new(vec![0.5]);
        for _ in 0..200 {
            op.mutate(&mut genome, &mut rng);
            let x = genome.genes()[0];
            // Steps of up to 10 mostly overshoot; survivors stay strictly inside.
            assert!(x > 0.0 && x < 1.0, "gene escaped to {x}");
        }
    }

    // ---- Alphabet step ----

    #[test]
    fn test_alphabet_step_changes_at_most_one_position() {
        let alphabet = Alphabet::latin_lowercase();
        let op = AlphabetStepMutation::new(alphabet.clone(), 3, 1.0).unwrap();
        let mut rng = create_rng(42);
        let original: Vec<char> = "hello".chars().collect();
        for _ in 0..500 {
            let mut genome = Genome::new(original.clone());
            op.mutate(&mut genome, &mut rng);
            let diffs: Vec<usize> = (0..5)
                .filter(|&i| genome.genes()[i] != original[i])
                .collect();
            assert!(diffs.len() <= 1);
            for &i in &diffs {
                let before = alphabet.index_of(&original[i]).unwrap() as i64;
                let after = alphabet.index_of(&genome.genes()[i]).unwrap() as i64;
                assert!((after - before).abs() <= 3);
            }
        }
    }

    #[test]
    fn test_alphabet_step_drops_out_of_range_moves() {
        let alphabet = Alphabet::from_chars("ab").unwrap();
        let op = AlphabetStepMutation::new(alphabet, 3, 1.0).unwrap();
        let mut rng = create_rng(9);
        for _ in 0..500 {
            let mut genome = Genome::new(vec!['a', 'b']);
            op.mutate(&mut genome, &mut rng);
            assert!(genome.genes().iter().all(|c| *c == 'a' || *c == 'b'));
        }
    }

    proptest! {
        #[test]
        fn prop_bounded_step_never_leaves_interval(
            lower in -100.0f64..100.0,
            width in 0.001f64..50.0,
            frac in 0.0f64..=1.0,
            max_step in 0.001f64..100.0,
            seed in any::<u64>(),
        ) {
            let region = Interval::new(lower, lower + width).unwrap();
            let start = lower + frac * width;
            prop_assume!(region.contains(start));
            let op = BoundedStepMutation::new(region, max_step, 1.0).unwrap();
            let mut rng = create_rng(seed);
            let mut genome = Genome::new(vec![start]);
            for _ in 0..20 {
                op.mutate(&mut genome, &mut rng);
                prop_assert!(region.contains(genome.genes()[0]));
            }
        }

        #[test]
        fn prop_two_point_preserves_length(
            genes in prop::collection::vec(any::<i32>(), 0..30),
            other in prop::collection::vec(any::<i32>(), 0..30),
            seed in any::<u64>(),
        ) {
            let n = genes.len().min(other.len());
            let mut a = Genome::new(genes[..n].to_vec());
            let mut b = Genome::new(other[..n].to_vec());
            TwoPointCrossover.mate(&mut a, &mut b, &mut create_rng(seed));
            prop_assert_eq!(a.len(), n);
            prop_assert_eq!(b.len(), n);
        }
    }
}
