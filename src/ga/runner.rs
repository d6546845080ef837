//! Generation loop execution.
//!
//! [`Evolution`] owns one run and moves through
//! `Initialized → Running → Terminated`:
//!
//! 1. **Initialized**: population created and evaluated, generation 0.
//! 2. **Running**: each [`step`](Evolution::step) performs variation
//!    (pairwise crossover, then per-offspring mutation), evaluates offspring
//!    whose fitness is stale, and selects a same-size survivor population.
//! 3. **Terminated**: the predicate (or the optional generation ceiling)
//!    fired; the best genome of the final population is returned.
//!
//! Any evaluation failure aborts the run. The error is returned and the
//! run is left in [`EvolutionState::Failed`].

use super::config::{EvolutionConfig, Toolbox};
use super::domain::GeneSampler;
use super::evaluator::Evaluator;
use super::operators::{Crossover, Mutation};
use super::termination::Termination;
use super::types::{Genome, Population};
use crate::error::{EvolveError, Result};
use crate::random::rng_from_seed;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The termination predicate returned `true`.
    Satisfied,
    /// [`EvolutionConfig::generation_ceiling`] was reached first.
    GenerationCeiling,
}

/// Lifecycle of an [`Evolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionState {
    /// Population evaluated, no generation run yet.
    Initialized,
    /// At least one generation has completed.
    Running,
    /// Stopped normally.
    Terminated(StopReason),
    /// A generation failed; the run cannot continue.
    Failed,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<G> {
    /// Best genome of the final population.
    pub best: Genome<G>,

    /// Fitness of `best` as minimized by the engine.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Why the run stopped.
    pub stop_reason: StopReason,

    /// Best population fitness after initialization and after each generation.
    ///
    /// Without elitism this is not guaranteed to be monotone.
    pub fitness_history: Vec<f64>,
}

impl<G> EvolutionResult<G> {
    /// Lowest fitness observed in any generation.
    pub fn best_fitness_seen(&self) -> f64 {
        self.fitness_history
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }
}

/// One evolution run.
///
/// # Usage
///
/// ```
/// use u_evolve::ga::{
///     BoundedStepMutation, Evolution, EvolutionConfig, FixedBudget, Interval,
///     NoCrossover, Toolbox,
/// };
///
/// let region = Interval::new(-2.0, 2.0).unwrap();
/// let toolbox = Toolbox::new(
///     |genes: &[f64]| -> u_evolve::Result<f64> { Ok((genes[0] - 0.8).powi(2) + 4.0) },
///     NoCrossover,
///     BoundedStepMutation::with_defaults(region),
/// );
/// let config = EvolutionConfig::default().with_population_size(50).with_seed(1);
///
/// let evolution = Evolution::initialize(&region, 1, toolbox, config).unwrap();
/// let result = evolution.run(&FixedBudget::new(20)).unwrap();
/// assert_eq!(result.generations, 20);
/// assert!(result.best_fitness >= 4.0);
/// ```
pub struct Evolution<G, E, C, M> {
    toolbox: Toolbox<E, C, M>,
    config: EvolutionConfig,
    population: Population<G>,
    generation: usize,
    state: EvolutionState,
    rng: StdRng,
    fitness_history: Vec<f64>,
}

impl<G, E, C, M> Evolution<G, E, C, M>
where
    G: Clone + Send + Sync,
    E: Evaluator<G>,
    C: Crossover<G>,
    M: Mutation<G>,
{
    /// Samples `config.population_size` genomes of `genome_length` genes from
    /// `sampler` and evaluates them.
    pub fn initialize<S: GeneSampler<G>>(
        sampler: &S,
        genome_length: usize,
        toolbox: Toolbox<E, C, M>,
        config: EvolutionConfig,
    ) -> Result<Self> {
        config.validate()?;
        toolbox.selection.validate()?;

        let mut rng = rng_from_seed(config.seed);
        let population =
            Population::random(sampler, genome_length, config.population_size, &mut rng)?;
        Self::start(population, toolbox, config, rng)
    }

    /// Starts from an explicit population, evaluating any genome without a
    /// cached fitness. The population keeps its own size;
    /// `config.population_size` is not consulted.
    pub fn from_population(
        population: Population<G>,
        toolbox: Toolbox<E, C, M>,
        config: EvolutionConfig,
    ) -> Result<Self> {
        config.validate()?;
        toolbox.selection.validate()?;

        let rng = rng_from_seed(config.seed);
        Self::start(population, toolbox, config, rng)
    }

    fn start(
        mut population: Population<G>,
        toolbox: Toolbox<E, C, M>,
        config: EvolutionConfig,
        rng: StdRng,
    ) -> Result<Self> {
        evaluate_pending(
            &toolbox.evaluator,
            population.members_mut(),
            0,
            config.parallel,
        )?;

        let initial_best = population.best().rank_key();
        debug!(
            "initialized population of {} genomes, best fitness {initial_best}",
            population.len()
        );

        Ok(Self {
            toolbox,
            config,
            population,
            generation: 0,
            state: EvolutionState::Initialized,
            rng,
            fitness_history: vec![initial_best],
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EvolutionState {
        self.state
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current, fully evaluated population.
    pub fn population(&self) -> &Population<G> {
        &self.population
    }

    /// The run configuration.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Best fitness after initialization and after each generation so far.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    /// Runs one generation: variation, evaluation, selection.
    ///
    /// The population is replaced only if every step succeeds.
    pub fn step(&mut self) -> Result<()> {
        if matches!(
            self.state,
            EvolutionState::Terminated(_) | EvolutionState::Failed
        ) {
            return Err(EvolveError::AlreadyTerminated);
        }

        match self.next_generation() {
            Ok(survivors) => {
                self.population = survivors;
                self.generation += 1;
                self.state = EvolutionState::Running;
                self.record_progress();
                Ok(())
            }
            Err(err) => {
                self.state = EvolutionState::Failed;
                Err(err)
            }
        }
    }

    fn next_generation(&mut self) -> Result<Population<G>> {
        let size = self.population.len();
        let mut offspring: Vec<Genome<G>> = self.population.members().to_vec();

        vary(
            &mut offspring,
            &self.toolbox.crossover,
            &self.toolbox.mutation,
            self.config.crossover_rate,
            self.config.mutation_rate,
            &mut self.rng,
        );

        evaluate_pending(
            &self.toolbox.evaluator,
            &mut offspring,
            self.generation + 1,
            self.config.parallel,
        )?;

        let survivors = self.toolbox.selection.select(&offspring, size, &mut self.rng);
        debug_assert_eq!(survivors.len(), size);
        Population::new(survivors)
    }

    fn record_progress(&mut self) {
        let best = self.population.best().rank_key();
        self.fitness_history.push(best);
        debug!("generation {}: best fitness {best}", self.generation);

        let every = self.config.progress_interval;
        if every > 0 && self.generation % every == 0 {
            info!("generation {}: best fitness {best}", self.generation);
        }
    }

    /// Runs generations until `termination` fires or the configured
    /// generation ceiling is reached.
    ///
    /// The predicate is checked before every generation, so a run whose
    /// initial population already satisfies it performs zero generations.
    pub fn run<T: Termination<G>>(mut self, termination: &T) -> Result<EvolutionResult<G>> {
        let reason = loop {
            if termination.should_stop(&self.population, self.generation) {
                break StopReason::Satisfied;
            }
            if let Some(ceiling) = self.config.generation_ceiling {
                if self.generation >= ceiling {
                    break StopReason::GenerationCeiling;
                }
            }
            self.step()?;
        };

        self.state = EvolutionState::Terminated(reason);
        let best = self.population.best().clone();
        let best_fitness = best.rank_key();
        info!(
            "terminated after {} generations ({reason:?}), best fitness {best_fitness}",
            self.generation
        );

        Ok(EvolutionResult {
            best,
            best_fitness,
            generations: self.generation,
            stop_reason: reason,
            fitness_history: self.fitness_history,
        })
    }
}

/// Single entry point over [`Evolution`].
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Evolves `population` under `toolbox` until `termination` fires.
    pub fn run<G, E, C, M, T>(
        population: Population<G>,
        toolbox: Toolbox<E, C, M>,
        termination: &T,
        config: EvolutionConfig,
    ) -> Result<EvolutionResult<G>>
    where
        G: Clone + Send + Sync,
        E: Evaluator<G>,
        C: Crossover<G>,
        M: Mutation<G>,
        T: Termination<G>,
    {
        Evolution::from_population(population, toolbox, config)?.run(termination)
    }

    /// Samples the initial population from `sampler`, then runs.
    pub fn run_sampled<G, S, E, C, M, T>(
        sampler: &S,
        genome_length: usize,
        toolbox: Toolbox<E, C, M>,
        termination: &T,
        config: EvolutionConfig,
    ) -> Result<EvolutionResult<G>>
    where
        G: Clone + Send + Sync,
        S: GeneSampler<G>,
        E: Evaluator<G>,
        C: Crossover<G>,
        M: Mutation<G>,
        T: Termination<G>,
    {
        Evolution::initialize(sampler, genome_length, toolbox, config)?.run(termination)
    }
}

/// Crossover on adjacent pairs with probability `cxpb`, then mutation on
/// each offspring with probability `mutpb`. The two stages are independent.
fn vary<G, C, M, R>(
    offspring: &mut [Genome<G>],
    crossover: &C,
    mutation: &M,
    cxpb: f64,
    mutpb: f64,
    rng: &mut R,
) where
    C: Crossover<G>,
    M: Mutation<G>,
    R: Rng,
{
    for pair in offspring.chunks_exact_mut(2) {
        if rng.random::<f64>() < cxpb {
            let (first, second) = pair.split_at_mut(1);
            crossover.mate(&mut first[0], &mut second[0], rng);
        }
    }
    for genome in offspring.iter_mut() {
        if rng.random::<f64>() < mutpb {
            mutation.mutate(genome, rng);
        }
    }
}

/// Scores one genome, rejecting NaN.
fn score<G, E: Evaluator<G>>(
    evaluator: &E,
    genome: &mut Genome<G>,
    generation: usize,
    index: usize,
) -> Result<()> {
    let fitness = evaluator.evaluate(genome.genes())?;
    if fitness.is_nan() {
        return Err(EvolveError::UndefinedFitness { generation, index });
    }
    genome.set_fitness(fitness);
    Ok(())
}

/// Evaluates every genome without a cached fitness.
#[cfg(feature = "parallel")]
fn evaluate_pending<G, E>(
    evaluator: &E,
    genomes: &mut [Genome<G>],
    generation: usize,
    parallel: bool,
) -> Result<()>
where
    G: Send + Sync,
    E: Evaluator<G>,
{
    use rayon::prelude::*;

    if parallel {
        genomes
            .par_iter_mut()
            .enumerate()
            .filter(|(_, g)| !g.is_evaluated())
            .try_for_each(|(index, genome)| score(evaluator, genome, generation, index))
    } else {
        genomes
            .iter_mut()
            .enumerate()
            .filter(|(_, g)| !g.is_evaluated())
            .try_for_each(|(index, genome)| score(evaluator, genome, generation, index))
    }
}

/// Evaluates every genome without a cached fitness.
#[cfg(not(feature = "parallel"))]
fn evaluate_pending<G, E>(
    evaluator: &E,
    genomes: &mut [Genome<G>],
    generation: usize,
    _parallel: bool,
) -> Result<()>
where
    E: Evaluator<G>,
{
    genomes
        .iter_mut()
        .enumerate()
        .filter(|(_, g)| !g.is_evaluated())
        .try_for_each(|(index, genome)| score(evaluator, genome, generation, index))
}

// ============================================================================
// Tests
// ============================================================================
