//! Hill Climbing execution engine.
//!
//! # Algorithm
//!
//! 1. Generate initial solution
//! 2. At each iteration:
//!    a. Sample `neighbors_per_iteration` neighbors of the current solution
//!    b. Keep the fittest sample
//!    c. Move to it if it beats the current fitness by more than the
//!       tolerance, otherwise stop at a local optimum
//! 3. Terminate at the iteration cap or the first local optimum

use tracing::debug;

use super::config::HcConfig;
use super::types::HcProblem;
use crate::error::Result;
use crate::random::{create_rng, DEFAULT_SEED};

/// Result of a Hill Climbing run.
#[derive(Debug, Clone)]
pub struct HcResult<S: Clone> {
    /// Best solution found (the final current solution).
    pub best: S,
    /// Fitness of the best solution.
    pub best_fitness: f64,
    /// Improving moves accepted.
    pub iterations: usize,
    /// Total fitness evaluations, including the initial solution.
    pub evaluations: usize,
    /// Whether the run stopped because no sampled neighbor improved.
    pub local_optimum: bool,
    /// Fitness after each iteration, starting with the initial fitness.
    pub fitness_history: Vec<f64>,
}

/// Hill Climbing runner.
pub struct HcRunner;

impl HcRunner {
    /// Executes Hill Climbing on the given problem.
    ///
    /// # Errors
    /// Fails only when the configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use u_workload::hc::{HcConfig, HcProblem, HcRunner};
    /// use rand::Rng;
    ///
    /// struct Peak;
    /// impl HcProblem for Peak {
    ///     type Solution = i32;
    ///     fn initial_solution<R: Rng>(&self, _rng: &mut R) -> i32 { 0 }
    ///     fn fitness(&self, x: &i32) -> f64 { -((x - 5) * (x - 5)) as f64 }
    ///     fn neighbor<R: Rng>(&self, x: &i32, rng: &mut R) -> i32 {
    ///         if rng.random_bool(0.5) { x + 1 } else { x - 1 }
    ///     }
    /// }
    ///
    /// let result = HcRunner::run(&Peak, &HcConfig::default().with_seed(1)).unwrap();
    /// assert_eq!(result.best, 5);
    /// ```
    pub fn run<P: HcProblem>(problem: &P, config: &HcConfig) -> Result<HcResult<P::Solution>> {
        config.validate()?;
        let mut rng = create_rng(config.seed.unwrap_or(DEFAULT_SEED));

        let mut current = problem.initial_solution(&mut rng);
        let mut current_fitness = problem.fitness(&current);
        let mut evaluations = 1;
        let mut fitness_history = Vec::with_capacity(config.max_iterations + 1);
        fitness_history.push(current_fitness);

        let mut iterations = 0;
        let mut local_optimum = false;

        while iterations < config.max_iterations {
            let mut best_neighbor = None;
            let mut best_neighbor_fitness = f64::NEG_INFINITY;

            for _ in 0..config.neighbors_per_iteration {
                let candidate = problem.neighbor(&current, &mut rng);
                let fitness = problem.fitness(&candidate);
                evaluations += 1;
                if fitness > best_neighbor_fitness {
                    best_neighbor_fitness = fitness;
                    best_neighbor = Some(candidate);
                }
            }

            match best_neighbor {
                Some(neighbor)
                    if best_neighbor_fitness > current_fitness + config.improvement_tolerance =>
                {
                    current = neighbor;
                    current_fitness = best_neighbor_fitness;
                    iterations += 1;
                    fitness_history.push(current_fitness);
                }
                _ => {
                    local_optimum = true;
                    break;
                }
            }

            if iterations % 100 == 0 {
                debug!(iterations, fitness = current_fitness, "hill climbing progress");
            }
        }

        Ok(HcResult {
            best: current,
            best_fitness: current_fitness,
            iterations,
            evaluations,
            local_optimum,
            fitness_history,
        })
    }
}
