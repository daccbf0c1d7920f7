//! Generational GA runner.
//!
//! Maximizing, elitist GA with a fixed generation budget:
//!
//! 1. Create `population_size` independent individuals and evaluate them.
//! 2. Each generation: rank descending by fitness, copy the top
//!    `elite_count` unchanged, then refill by picking two parents uniformly
//!    from the top `parent_pool`, breeding one child and mutating it with
//!    probability `mutation_rate`.
//! 3. Children are evaluated (in parallel when enabled) before the next
//!    ranking. Collecting every score before sorting is the generation
//!    barrier.
//! 4. After the last generation (or when the time limit passes) the
//!    rank-0 individual is returned.
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::models::Termination;

/// A GA individual carrying its cached fitness.
pub trait Individual: Clone + Send {
    /// Cached fitness (higher = better).
    fn fitness(&self) -> f64;

    /// Stores an evaluated fitness.
    fn set_fitness(&mut self, fitness: f64);
}

/// Problem definition plugged into [`GaRunner`].
pub trait GaProblem: Sync {
    type Individual: Individual;

    /// Builds one random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Scores an individual (higher = better). Must be pure.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Breeds one child from two parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);
}

/// GA hyperparameters.
#[derive(Debug, Clone)]
pub struct GaConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub mutation_rate: f64,
    pub elite_count: usize,
    pub parent_pool: usize,
    /// Evaluate fitness on the rayon pool.
    pub parallel: bool,
    /// Fixed seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Wall-clock budget (ms).
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            mutation_rate: 0.1,
            elite_count: 10,
            parent_pool: 20,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_elitism(mut self, elite_count: usize, parent_pool: usize) -> Self {
        self.elite_count = elite_count;
        self.parent_pool = parent_pool;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, limit_ms: u64) -> Self {
        self.time_limit_ms = Some(limit_ms);
        self
    }
}

/// Fitness summary of one ranked generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub median: f64,
    pub worst: f64,
    /// Lowest fitness among the elites carried into the next generation.
    pub elite_floor: Option<f64>,
}

impl GenerationStats {
    fn from_ranked<I: Individual>(generation: usize, ranked: &[I], elite_count: usize) -> Self {
        let n = ranked.len();
        let median = if n == 0 {
            f64::NAN
        } else if n % 2 == 1 {
            ranked[n / 2].fitness()
        } else {
            (ranked[n / 2 - 1].fitness() + ranked[n / 2].fitness()) / 2.0
        };
        Self {
            generation,
            best: ranked.first().map_or(f64::NAN, Individual::fitness),
            median,
            worst: ranked.last().map_or(f64::NAN, Individual::fitness),
            elite_floor: elite_count
                .checked_sub(1)
                .and_then(|i| ranked.get(i))
                .map(Individual::fitness),
        }
    }
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// Rank-0 individual of the final population.
    pub best: I,
    pub best_fitness: f64,
    /// Generations completed.
    pub generations: usize,
    pub termination: Termination,
    /// One entry per completed generation.
    pub history: Vec<GenerationStats>,
}

/// Runs a [`GaProblem`] to completion.
pub struct GaRunner;

impl GaRunner {
    /// Runs with an RNG seeded from `config.seed` (or the OS).
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> GaResult<P::Individual> {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs with a caller-supplied RNG.
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: &mut R,
    ) -> GaResult<P::Individual> {
        let size = config.population_size.max(1);
        let elite_count = config.elite_count.min(size);
        let pool = config.parent_pool.clamp(1, size);
        let mutation_rate = config.mutation_rate.clamp(0.0, 1.0);
        let deadline = config
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        let mut population: Vec<P::Individual> =
            (0..size).map(|_| problem.create_individual(rng)).collect();
        evaluate_all(problem, &mut population, config.parallel);
        rank(&mut population);

        let mut history = Vec::with_capacity(config.max_generations);
        let mut termination = Termination::Generations;

        for generation in 0..config.max_generations {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                warn!(generation, "time limit reached, returning best so far");
                termination = Termination::TimeLimit;
                break;
            }

            let stats = GenerationStats::from_ranked(generation, &population, elite_count);

            let mut next: Vec<P::Individual> = Vec::with_capacity(size);
            next.extend(population[..elite_count].iter().cloned());
            while next.len() < size {
                let parent1 = &population[rng.random_range(0..pool)];
                let parent2 = &population[rng.random_range(0..pool)];
                let mut child = problem.crossover(parent1, parent2, rng);
                if rng.random_bool(mutation_rate) {
                    problem.mutate(&mut child, rng);
                }
                next.push(child);
            }

            evaluate_all(problem, &mut next[elite_count..], config.parallel);
            rank(&mut next);
            population = next;

            debug!(
                generation,
                best = stats.best,
                median = stats.median,
                "generation ranked"
            );
            history.push(stats);
        }

        let best = population.swap_remove(0);
        GaResult {
            best_fitness: best.fitness(),
            best,
            generations: history.len(),
            termination,
            history,
        }
    }
}

fn evaluate_all<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], parallel: bool) {
    if parallel {
        individuals.par_iter_mut().for_each(|ind| {
            let fitness = problem.evaluate(ind);
            ind.set_fitness(fitness);
        });
    } else {
        for ind in individuals.iter_mut() {
            let fitness = problem.evaluate(ind);
            ind.set_fitness(fitness);
        }
    }
}

/// Stable descending sort by fitness.
fn rank<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}

#[cfg(test)]
mod tests {
    use super::*;

    // OneMax: maximize the number of set bits.
    #[derive(Debug, Clone)]
    struct Bits {
        genes: Vec<bool>,
        fitness: f64,
    }

    impl Individual for Bits {
        fn fitness(&self) -> f64 {
            self.fitness
        }

        fn set_fitness(&mut self, fitness: f64) {
            self.fitness = fitness;
        }
    }

    struct OneMax {
        len: usize,
    }

    impl GaProblem for OneMax {
        type Individual = Bits;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Bits {
            Bits {
                genes: (0..self.len).map(|_| rng.random_bool(0.2)).collect(),
                fitness: f64::NEG_INFINITY,
            }
        }

        fn evaluate(&self, individual: &Bits) -> f64 {
            individual.genes.iter().filter(|&&b| b).count() as f64
        }

        fn crossover<R: Rng>(&self, p1: &Bits, p2: &Bits, rng: &mut R) -> Bits {
            let split = rng.random_range(0..=p1.genes.len());
            let mut genes = p1.genes[..split].to_vec();
            genes.extend_from_slice(&p2.genes[split..]);
            Bits {
                genes,
                fitness: f64::NEG_INFINITY,
            }
        }

        fn mutate<R: Rng>(&self, individual: &mut Bits, rng: &mut R) {
            let idx = rng.random_range(0..individual.genes.len());
            individual.genes[idx] = !individual.genes[idx];
        }
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_default_hyperparameters() {
        let c = GaConfig::default();
        assert_eq!(c.population_size, 50);
        assert_eq!(c.max_generations, 100);
        assert_eq!(c.elite_count, 10);
        assert_eq!(c.parent_pool, 20);
    }

    #[test]
    fn test_runs_full_budget() {
        let result = GaRunner::run(&OneMax { len: 32 }, &small_config());
        assert_eq!(result.generations, 40);
        assert_eq!(result.history.len(), 40);
        assert_eq!(result.termination, Termination::Generations);
        assert!(result.best_fitness >= result.history[0].best);
    }

    #[test]
    fn test_best_never_regresses() {
        let result = GaRunner::run(&OneMax { len: 32 }, &small_config());
        for pair in result.history.windows(2) {
            assert!(pair[1].best >= pair[0].best);
        }
    }

    #[test]
    fn test_elites_at_least_median() {
        let result = GaRunner::run(&OneMax { len: 32 }, &small_config());
        for stats in &result.history {
            assert!(stats.best >= stats.median && stats.median >= stats.worst);
        }
        // Elites survive unchanged, so the next generation's floor never
        // drops below this generation's median.
        for pair in result.history.windows(2) {
            let floor = pair[1].elite_floor.unwrap();
            assert!(
                floor >= pair[0].median,
                "gen {}: {floor} < {}",
                pair[1].generation,
                pair[0].median
            );
        }
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let a = GaRunner::run(&OneMax { len: 24 }, &small_config());
        let b = GaRunner::run(&OneMax { len: 24 }, &small_config().with_parallel(true));
        assert_eq!(a.best.genes, b.best.genes);
        assert_eq!(a.best_fitness, b.best_fitness);
    }

    #[test]
    fn test_zero_time_limit_returns_initial_best() {
        let config = small_config().with_time_limit_ms(0);
        let result = GaRunner::run(&OneMax { len: 16 }, &config);
        assert_eq!(result.termination, Termination::TimeLimit);
        assert_eq!(result.generations, 0);
        assert!(result.best_fitness.is_finite());
    }

    #[test]
    fn test_elite_count_clamped() {
        let config = small_config()
            .with_population_size(4)
            .with_elitism(10, 20)
            .with_max_generations(3);
        let result = GaRunner::run(&OneMax { len: 8 }, &config);
        assert_eq!(result.generations, 3);
        // All individuals are elites: the population never changes.
        assert_eq!(result.history[0].best, result.history[2].best);
    }

    #[test]
    fn test_median_even_population() {
        let ranked: Vec<Bits> = [4.0, 3.0, 2.0, 1.0]
            .into_iter()
            .map(|f| Bits {
                genes: Vec::new(),
                fitness: f,
            })
            .collect();
        let stats = GenerationStats::from_ranked(0, &ranked, 0);
        assert!((stats.median - 2.5).abs() < 1e-10);
        assert_eq!(stats.elite_floor, None);
        assert_eq!(stats.best, 4.0);
        assert_eq!(stats.worst, 1.0);
    }
}
