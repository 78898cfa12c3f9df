//! GA generational loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! repair → re-evaluation → repeat.

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use super::config::GaConfig;
use super::selection::tournament;
use super::types::{GaProblem, Individual};
use crate::error::Result;
use crate::random::{create_rng, DEFAULT_SEED};

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Fitness of the best member of the initial population and of each
    /// generation's population. Elitism keeps it non-decreasing.
    pub fitness_history: Vec<f64>,

    /// Mean population fitness, aligned with `fitness_history`.
    pub mean_history: Vec<f64>,
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration
    /// is invalid.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        config.validate()?;
        let mut rng = create_rng(config.seed.unwrap_or(DEFAULT_SEED));

        // 1. Initialize and evaluate
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate_population(problem, &mut population, config.parallel);

        // 2. Track best
        sort_descending(&mut population);
        let mut best = population[0].clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        let mut mean_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(population[0].fitness());
        mean_history.push(mean_fitness(&population));

        // 3. Generational loop
        for gen in 0..config.max_generations {
            // Elites are already evaluated and sorted to the front.
            let elite_count = config.elite_count;
            let mut next_gen: Vec<P::Individual> = population[..elite_count].to_vec();

            while next_gen.len() < config.population_size {
                let p1 = tournament(&population, config.tournament_size, &mut rng);
                let p2 = tournament(&population, config.tournament_size, &mut rng);

                let children = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    problem.crossover(&population[p1], &population[p2], &mut rng)
                } else {
                    vec![population[p1].clone()]
                };

                for mut child in children {
                    if next_gen.len() >= config.population_size {
                        break;
                    }
                    if rng.random_range(0.0..1.0) < config.mutation_rate {
                        problem.mutate(&mut child, &mut rng);
                    }
                    problem.repair(&mut child, &mut rng);
                    next_gen.push(child);
                }
            }

            evaluate_population(problem, &mut next_gen[elite_count..], config.parallel);
            population = next_gen;
            sort_descending(&mut population);

            if population[0].fitness() > best.fitness() {
                best = population[0].clone();
            }
            fitness_history.push(population[0].fitness());
            mean_history.push(mean_fitness(&population));

            if (gen + 1) % 25 == 0 {
                debug!(
                    generation = gen + 1,
                    best = best.fitness(),
                    mean = mean_history[mean_history.len() - 1],
                    "ga progress"
                );
            }
        }

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: config.max_generations,
            fitness_history,
            mean_history,
        })
    }
}

/// Evaluates individuals, in parallel when requested.
#[cfg(feature = "parallel")]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        evaluate_sequential(problem, population);
    }
}

/// Evaluates individuals; the flag has no effect without the `parallel`
/// feature.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    _parallel: bool,
) {
    evaluate_sequential(problem, population);
}

fn evaluate_sequential<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Sorts the population best first. Stable, so ties keep their order.
fn sort_descending<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}

fn mean_fitness<I: Individual>(population: &[I]) -> f64 {
    population.iter().map(Individual::fitness).sum::<f64>() / population.len() as f64
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::GaConfig;

    // ---- OneMax problem: maximize the number of set bits ----

    #[derive(Clone, Debug)]
    struct BitString {
        bits: Vec<bool>,
        fitness: f64,
    }

    impl Individual for BitString {
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: f64) {
            self.fitness = f;
        }
    }

    struct OneMaxProblem {
        n: usize,
    }

    impl GaProblem for OneMaxProblem {
        type Individual = BitString;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> BitString {
            let bits: Vec<bool> = (0..self.n).map(|_| rng.random_bool(0.5)).collect();
            BitString {
                bits,
                fitness: f64::NEG_INFINITY,
            }
        }

        fn evaluate(&self, ind: &BitString) -> f64 {
            ind.bits.iter().filter(|&&b| b).count() as f64
        }

        fn crossover<R: Rng>(
            &self,
            p1: &BitString,
            p2: &BitString,
            rng: &mut R,
        ) -> Vec<BitString> {
            // Single-point crossover
            let point = rng.random_range(0..self.n);
            let mut c1_bits = Vec::with_capacity(self.n);
            let mut c2_bits = Vec::with_capacity(self.n);
            for i in 0..self.n {
                if i < point {
                    c1_bits.push(p1.bits[i]);
                    c2_bits.push(p2.bits[i]);
                } else {
                    c1_bits.push(p2.bits[i]);
                    c2_bits.push(p1.bits[i]);
                }
            }
            vec![
                BitString {
                    bits: c1_bits,
                    fitness: f64::NEG_INFINITY,
                },
                BitString {
                    bits: c2_bits,
                    fitness: f64::NEG_INFINITY,
                },
            ]
        }

        fn mutate<R: Rng>(&self, ind: &mut BitString, rng: &mut R) {
            let idx = rng.random_range(0..self.n);
            ind.bits[idx] = !ind.bits[idx];
        }
    }

    #[test]
    fn test_onemax_convergence() {
        let problem = OneMaxProblem { n: 20 };
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(200)
            .with_mutation_rate(0.3)
            .with_seed(42);

        let result = GaRunner::run(&problem, &config).unwrap();

        assert!(
            result.best_fitness >= 15.0,
            "expected fitness >= 15 for 20-bit OneMax, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_elite_preservation() {
        let problem = OneMaxProblem { n: 10 };
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(50)
            .with_seed(42);

        let result = GaRunner::run(&problem, &config).unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "population best should never decrease with elitism: {} < {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.fitness_history.last().copied(), Some(result.best_fitness));
    }

    #[test]
    fn test_zero_elites_rejected() {
        let problem = OneMaxProblem { n: 10 };
        let config = GaConfig::default()
            .with_population_size(20)
            .with_elite_count(0);
        assert!(GaRunner::run(&problem, &config).is_err());
    }

    #[test]
    fn test_fitness_history_lengths() {
        let problem = OneMaxProblem { n: 10 };
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(30)
            .with_seed(42);

        let result = GaRunner::run(&problem, &config).unwrap();

        assert_eq!(result.generations, 30);
        assert_eq!(result.fitness_history.len(), 31);
        assert_eq!(result.mean_history.len(), 31);
        for (best, mean) in result.fitness_history.iter().zip(&result.mean_history) {
            assert!(mean <= best, "mean {mean} above best {best}");
        }
    }

    #[test]
    fn test_deterministic_per_seed() {
        let problem = OneMaxProblem { n: 16 };
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(20)
            .with_seed(5);

        let a = GaRunner::run(&problem, &config).unwrap();
        let b = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(a.best.bits, b.best.bits);
        assert_eq!(a.mean_history, b.mean_history);
    }

    #[test]
    fn test_parallel_flag_same_result() {
        let problem = OneMaxProblem { n: 16 };
        let base = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(20)
            .with_seed(11);

        let seq = GaRunner::run(&problem, &base.clone().with_parallel(false)).unwrap();
        let par = GaRunner::run(&problem, &base.with_parallel(true)).unwrap();
        assert_eq!(seq.fitness_history, par.fitness_history);
        assert_eq!(seq.mean_history, par.mean_history);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let problem = OneMaxProblem { n: 4 };
        let config = GaConfig::default().with_population_size(1);
        assert!(GaRunner::run(&problem, &config).is_err());
    }

    // ---- Repair hook ----

    struct RepairedOneMax;

    impl GaProblem for RepairedOneMax {
        type Individual = BitString;

        fn create_individual<R: Rng>(&self, _rng: &mut R) -> BitString {
            BitString {
                bits: vec![false; 8],
                fitness: f64::NEG_INFINITY,
            }
        }

        fn evaluate(&self, ind: &BitString) -> f64 {
            ind.bits.iter().filter(|&&b| b).count() as f64
        }

        fn repair<R: Rng>(&self, ind: &mut BitString, _rng: &mut R) {
            ind.bits[0] = true;
        }
    }

    #[test]
    fn test_repair_applied_to_offspring() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(1)
            .with_seed(42);

        let result = GaRunner::run(&RepairedOneMax, &config).unwrap();

        assert_eq!(result.fitness_history[0], 0.0);
        assert_eq!(result.best_fitness, 1.0);
    }
}
