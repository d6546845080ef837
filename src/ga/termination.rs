//! Termination predicates.
//!
//! A [`Termination`] looks at the evaluated population and the number of
//! completed generations and decides whether the run should stop. The
//! driver checks it before every generation, including before the first.

use super::types::Population;

/// Decides when a run stops.
///
/// Closures of the form `Fn(&Population<G>, usize) -> bool` implement this
/// trait.
pub trait Termination<G> {
    /// Returns `true` to stop. `generation` counts completed generations.
    fn should_stop(&self, population: &Population<G>, generation: usize) -> bool;
}

impl<G, F> Termination<G> for F
where
    F: Fn(&Population<G>, usize) -> bool,
{
    fn should_stop(&self, population: &Population<G>, generation: usize) -> bool {
        self(population, generation)
    }
}

/// Stops after exactly `generations` generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBudget {
    /// Number of generations to run.
    pub generations: usize,
}

impl FixedBudget {
    /// Creates the budget.
    pub fn new(generations: usize) -> Self {
        Self { generations }
    }
}

impl<G> Termination<G> for FixedBudget {
    fn should_stop(&self, _population: &Population<G>, generation: usize) -> bool {
        generation >= self.generations
    }
}

/// Stops once the best genome's genes equal `target` exactly.
///
/// Has no iteration cap of its own. Pair it with
/// [`EvolutionConfig::with_generation_ceiling`](super::EvolutionConfig::with_generation_ceiling)
/// or [`TerminationExt::or`] when the target may be unreachable.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetMatch<G> {
    target: Vec<G>,
}

impl<G> TargetMatch<G> {
    /// Creates the predicate.
    pub fn new(target: Vec<G>) -> Self {
        Self { target }
    }

    /// The sequence being searched for.
    pub fn target(&self) -> &[G] {
        &self.target
    }
}

impl<G: PartialEq> Termination<G> for TargetMatch<G> {
    fn should_stop(&self, population: &Population<G>, _generation: usize) -> bool {
        population.best().genes() == self.target.as_slice()
    }
}

/// Stops when either predicate does.
#[derive(Debug, Clone)]
pub struct AnyOf<A, B>(pub A, pub B);

impl<G, A, B> Termination<G> for AnyOf<A, B>
where
    A: Termination<G>,
    B: Termination<G>,
{
    fn should_stop(&self, population: &Population<G>, generation: usize) -> bool {
        self.0.should_stop(population, generation) || self.1.should_stop(population, generation)
    }
}

/// Combinators on termination predicates.
pub trait TerminationExt: Sized {
    /// Stops when `self` or `other` does.
    fn or<B>(self, other: B) -> AnyOf<Self, B> {
        AnyOf(self, other)
    }
}

impl<T> TerminationExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::types::Genome;

    fn scored(words: &[(&str, f64)]) -> Population<char> {
        let members = words
            .iter()
            .map(|&(w, f)| {
                let mut g = Genome::new(w.chars().collect());
                g.set_fitness(f);
                g
            })
            .collect();
        Population::new(members).unwrap()
    }

    #[test]
    fn test_fixed_budget() {
        let pop = scored(&[("ab", 0.0)]);
        let budget = FixedBudget::new(3);
        assert!(!budget.should_stop(&pop, 0));
        assert!(!budget.should_stop(&pop, 2));
        assert!(budget.should_stop(&pop, 3));
        assert!(FixedBudget::new(0).should_stop(&pop, 0));
    }

    #[test]
    fn test_target_match_uses_best_genome() {
        let target = TargetMatch::new("hi".chars().collect());

        // The exact match is present but not the best: keep going.
        let pop = scored(&[("hi", 1.0), ("ho", 0.5)]);
        assert!(!target.should_stop(&pop, 10));

        let pop = scored(&[("ho", 3.0), ("hi", 0.0)]);
        assert!(target.should_stop(&pop, 10));
    }

    #[test]
    fn test_closure_and_or() {
        let pop = scored(&[("ab", 0.0)]);
        let never = |_: &Population<char>, _: usize| false;
        let combined = never.or(FixedBudget::new(5));
        assert!(!combined.should_stop(&pop, 4));
        assert!(combined.should_stop(&pop, 5));

        let target = TargetMatch::new(vec!['a', 'b']).or(FixedBudget::new(100));
        assert!(target.should_stop(&pop, 0));
    }
}
