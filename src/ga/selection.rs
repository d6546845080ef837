//! Survivor selection.
//!
//! Selection builds the next generation from the evaluated offspring pool.
//! Every strategy assumes **minimization** (lower fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{compare_fitness, Genome};
use crate::error::{EvolveError, Result};
use rand::Rng;
use std::cmp::Ordering;

/// Selection strategy.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Selection;
///
/// // Tournament with size 3 (the default)
/// let sel = Selection::default();
/// assert_eq!(sel, Selection::Tournament(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: draw `k` contenders uniformly **with
    /// replacement**, keep the best. Each survivor comes from an
    /// independent tournament, so one genome may survive several times.
    ///
    /// # Complexity
    /// O(k) per survivor
    Tournament(usize),

    /// Truncation: the `n` best genomes, best first.
    ///
    /// Deterministic; mostly useful for reporting.
    ///
    /// # Complexity
    /// O(n log n)
    Best,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Rejects a zero tournament size.
    pub fn validate(&self) -> Result<()> {
        match self {
            Selection::Tournament(0) => Err(EvolveError::InvalidTournamentSize),
            _ => Ok(()),
        }
    }

    /// Chooses `n` survivors from `pool` and returns them as owned copies.
    ///
    /// `pool` must be fully evaluated; unevaluated genomes rank last.
    ///
    /// # Panics
    /// Panics if `pool` is empty.
    pub fn select<G: Clone, R: Rng>(
        &self,
        pool: &[Genome<G>],
        n: usize,
        rng: &mut R,
    ) -> Vec<Genome<G>> {
        assert!(!pool.is_empty(), "cannot select from empty pool");

        match self {
            Selection::Tournament(k) => (0..n)
                .map(|_| pool[tournament(pool, *k, rng)].clone())
                .collect(),
            Selection::Best => best_indices(pool, n)
                .into_iter()
                .map(|i| pool[i].clone())
                .collect(),
        }
    }
}

/// Runs one tournament and returns the winner's index.
///
/// Ties go to the contender drawn first.
pub fn tournament<G, R: Rng>(pool: &[Genome<G>], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = pool.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if compare_fitness(&pool[idx], &pool[best_idx]) == Ordering::Less {
            best_idx = idx;
        }
    }
    best_idx
}

/// Indices of the `n` best genomes, cycling from the top when `n > pool.len()`.
fn best_indices<G>(pool: &[Genome<G>], n: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..pool.len()).collect();
    ranked.sort_by(|&a, &b| compare_fitness(&pool[a], &pool[b]));
    ranked.iter().copied().cycle().take(n).collect()
}
