//! Genome and population model.
//!
//! A [`Genome`] is a fixed-length gene sequence with a cached fitness. The
//! cache is cleared whenever the genes are borrowed mutably, so a score is
//! never carried over from before a variation step.
//!
//! A [`Population`] is an ordered, non-empty collection of genomes whose
//! size stays constant for a whole run.

use super::domain::GeneSampler;
use crate::error::{EvolveError, Result};
use rand::Rng;
use std::cmp::Ordering;

/// A candidate solution.
///
/// Lower fitness is better. Maximization is expressed by negating the
/// objective in the evaluator, never by a flag on the genome.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome<G> {
    genes: Vec<G>,
    fitness: Option<f64>,
}

impl<G> Genome<G> {
    /// Creates an unevaluated genome.
    pub fn new(genes: Vec<G>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Draws `length` genes independently from `sampler`.
    pub fn random<S, R>(sampler: &S, length: usize, rng: &mut R) -> Self
    where
        S: GeneSampler<G>,
        R: Rng,
    {
        Self::new((0..length).map(|_| sampler.sample(rng)).collect())
    }

    /// The genes.
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    /// Mutable access to the genes. Invalidates the cached fitness.
    pub fn genes_mut(&mut self) -> &mut [G] {
        self.fitness = None;
        &mut self.genes
    }

    /// Consumes the genome and returns its genes.
    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the genome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Cached fitness, `None` until evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Whether the cached fitness is up to date.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Stores a freshly computed fitness.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Drops the cached fitness.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Fitness used for ranking; unevaluated genomes rank last.
    pub(crate) fn rank_key(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }
}

/// Orders genomes best first. Incomparable values compare equal.
pub(crate) fn compare_fitness<G>(a: &Genome<G>, b: &Genome<G>) -> Ordering {
    a.rank_key()
        .partial_cmp(&b.rank_key())
        .unwrap_or(Ordering::Equal)
}

/// A fixed-size, ordered collection of genomes.
#[derive(Debug, Clone, PartialEq)]
pub struct Population<G> {
    members: Vec<Genome<G>>,
}

impl<G> Population<G> {
    /// Wraps existing genomes. Fails if `members` is empty.
    pub fn new(members: Vec<Genome<G>>) -> Result<Self> {
        if members.is_empty() {
            return Err(EvolveError::InvalidPopulationSize { size: 0 });
        }
        Ok(Self { members })
    }

    /// Samples `size` genomes of `genome_length` genes each.
    ///
    /// Duplicates are allowed.
    pub fn random<S, R>(sampler: &S, genome_length: usize, size: usize, rng: &mut R) -> Result<Self>
    where
        S: GeneSampler<G>,
        R: Rng,
    {
        if size == 0 {
            return Err(EvolveError::InvalidPopulationSize { size });
        }
        if genome_length == 0 {
            return Err(EvolveError::InvalidGenomeLength);
        }
        let members = (0..size)
            .map(|_| Genome::random(sampler, genome_length, rng))
            .collect();
        Ok(Self { members })
    }

    /// Number of genomes.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; populations are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The genomes in order.
    pub fn members(&self) -> &[Genome<G>] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut [Genome<G>] {
        &mut self.members
    }

    /// Iterates over the genomes.
    pub fn iter(&self) -> std::slice::Iter<'_, Genome<G>> {
        self.members.iter()
    }

    /// Consumes the population and returns its genomes.
    pub fn into_members(self) -> Vec<Genome<G>> {
        self.members
    }

    /// Whether every genome carries a fitness.
    pub fn is_evaluated(&self) -> bool {
        self.members.iter().all(Genome::is_evaluated)
    }

    /// The genome with the lowest fitness. Ties go to the earliest slot.
    pub fn best(&self) -> &Genome<G> {
        let mut best = &self.members[0];
        for genome in &self.members[1..] {
            if compare_fitness(genome, best) == Ordering::Less {
                best = genome;
            }
        }
        best
    }

    /// The `k` best genomes, best first. Stable with respect to slot order.
    pub fn best_n(&self, k: usize) -> Vec<&Genome<G>> {
        let mut ranked: Vec<&Genome<G>> = self.members.iter().collect();
        ranked.sort_by(|a, b| compare_fitness(a, b));
        ranked.truncate(k);
        ranked
    }
}

impl<'a, G> IntoIterator for &'a Population<G> {
    type Item = &'a Genome<G>;
    type IntoIter = std::slice::Iter<'a, Genome<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::domain::{Alphabet, Interval};
    use crate::random::create_rng;

    fn scored(values: &[f64]) -> Population<f64> {
        let members = values
            .iter()
            .map(|&f| {
                let mut g = Genome::new(vec![f]);
                g.set_fitness(f);
                g
            })
            .collect();
        Population::new(members).unwrap()
    }

    #[test]
    fn test_genes_mut_invalidates_fitness() {
        let mut genome = Genome::new(vec![1.0, 2.0]);
        genome.set_fitness(3.0);
        assert_eq!(genome.fitness(), Some(3.0));

        genome.genes_mut()[0] = 5.0;
        assert_eq!(genome.fitness(), None);
        assert_eq!(genome.genes(), &[5.0, 2.0]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = Genome::new(vec!['a', 'b']);
        let b = a.clone();
        a.genes_mut()[0] = 'z';
        assert_eq!(b.genes(), &['a', 'b']);
    }

    #[test]
    fn test_random_population_shape() {
        let region = Interval::new(-10.0, 10.0).unwrap();
        let mut rng = create_rng(42);
        let pop = Population::random(&region, 8, 300, &mut rng).unwrap();

        assert_eq!(pop.len(), 300);
        assert!(pop.iter().all(|g| g.len() == 8));
        assert!(pop
            .iter()
            .flat_map(|g| g.genes().iter())
            .all(|&x| region.contains(x)));
        assert!(!pop.is_evaluated());
    }

    #[test]
    fn test_random_symbolic_population() {
        let alphabet = Alphabet::latin_lowercase();
        let mut rng = create_rng(42);
        let pop = Population::random(&alphabet, 5, 10, &mut rng).unwrap();
        assert!(pop
            .iter()
            .flat_map(|g| g.genes().iter())
            .all(|c| alphabet.index_of(c).is_some()));
    }

    #[test]
    fn test_random_population_rejects_bad_shape() {
        let region = Interval::new(0.0, 1.0).unwrap();
        let mut rng = create_rng(42);
        assert_eq!(
            Population::<f64>::random(&region, 1, 0, &mut rng),
            Err(EvolveError::InvalidPopulationSize { size: 0 })
        );
        assert_eq!(
            Population::<f64>::random(&region, 0, 10, &mut rng),
            Err(EvolveError::InvalidGenomeLength)
        );
        assert!(Population::<f64>::new(vec![]).is_err());
    }

    #[test]
    fn test_best_prefers_lowest_and_earliest() {
        let pop = scored(&[4.0, 1.0, 3.0, 1.0]);
        let best = pop.best();
        assert_eq!(best.fitness(), Some(1.0));
        assert!(std::ptr::eq(best, &pop.members()[1]));
    }

    #[test]
    fn test_best_skips_unevaluated() {
        let mut members = vec![Genome::new(vec![0.0]), Genome::new(vec![1.0])];
        members[1].set_fitness(10.0);
        let pop = Population::new(members).unwrap();
        assert_eq!(pop.best().fitness(), Some(10.0));
    }

    #[test]
    fn test_best_n() {
        let pop = scored(&[4.0, 1.0, 3.0, 2.0]);
        let top: Vec<f64> = pop.best_n(2).iter().filter_map(|g| g.fitness()).collect();
        assert_eq!(top, vec![1.0, 2.0]);
        assert_eq!(pop.best_n(10).len(), 4);
    }
}
