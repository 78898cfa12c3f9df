//! SA execution loop.

use rand::Rng;
use tracing::debug;

use super::config::{CoolingSchedule, SaConfig};
use super::types::SaProblem;
use crate::error::Result;
use crate::random::{create_rng, DEFAULT_SEED};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Fitness of the best solution.
    pub best_fitness: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Best fitness so far, initially and after every iteration.
    pub fitness_history: Vec<f64>,

    /// Current-solution fitness, aligned with `fitness_history`.
    pub current_history: Vec<f64>,

    /// Temperature, aligned with `fitness_history`.
    pub temperature_history: Vec<f64>,

    /// Whether each iteration's move was accepted; one entry per iteration.
    pub accepted_history: Vec<bool>,
}

/// Probability of accepting a move whose fitness changes by `delta` at
/// `temperature` (maximization).
///
/// Non-negative deltas are always accepted; worsening moves follow the
/// Metropolis criterion `exp(delta / T)`. At `T <= 0` only non-worsening
/// moves are accepted.
///
/// ```
/// use u_workload::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(0.5, 10.0), 1.0);
/// assert!(acceptance_probability(-1.0, 10.0) > acceptance_probability(-1.0, 1.0));
/// assert_eq!(acceptance_probability(-1.0, 0.0), 0.0);
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta >= 0.0 {
        1.0
    } else if temperature > 0.0 {
        (delta / temperature).exp()
    } else {
        0.0
    }
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    ///
    /// Stops when the temperature reaches `min_temperature` or after
    /// `max_iterations` neighbor evaluations, whichever comes first.
    ///
    /// # Errors
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration
    /// is invalid.
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        config.validate()?;
        let mut rng = create_rng(config.seed.unwrap_or(DEFAULT_SEED));

        let mut current = problem.initial_solution(&mut rng);
        let mut current_fitness = problem.fitness(&current);
        let mut best = current.clone();
        let mut best_fitness = current_fitness;

        let mut temperature = config.initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let linear_steps = (config.max_iterations / config.iterations_per_temperature).max(1);

        let mut fitness_history = Vec::with_capacity(config.max_iterations + 1);
        let mut current_history = Vec::with_capacity(config.max_iterations + 1);
        let mut temperature_history = Vec::with_capacity(config.max_iterations + 1);
        let mut accepted_history = Vec::with_capacity(config.max_iterations);
        fitness_history.push(best_fitness);
        current_history.push(current_fitness);
        temperature_history.push(temperature);

        let mut step = 0usize;

        'outer: while temperature > config.min_temperature {
            for _ in 0..config.iterations_per_temperature {
                if total_iterations >= config.max_iterations {
                    break 'outer;
                }

                let neighbor = problem.neighbor(&current, &mut rng);
                let neighbor_fitness = problem.fitness(&neighbor);
                let delta = neighbor_fitness - current_fitness;

                // Metropolis acceptance criterion
                let accept = if delta > 0.0 {
                    improving_moves += 1;
                    true
                } else {
                    rng.random_range(0.0..1.0) < acceptance_probability(delta, temperature)
                };

                if accept {
                    current = neighbor;
                    current_fitness = neighbor_fitness;
                    accepted_moves += 1;

                    if current_fitness > best_fitness {
                        best = current.clone();
                        best_fitness = current_fitness;
                    }
                }

                total_iterations += 1;
                accepted_history.push(accept);
                fitness_history.push(best_fitness);
                current_history.push(current_fitness);
                temperature_history.push(temperature);
            }

            temperature = cool(temperature, config, step, linear_steps);
            step += 1;

            if step % 1000 == 0 {
                debug!(
                    iterations = total_iterations,
                    temperature,
                    best = best_fitness,
                    current = current_fitness,
                    "sa progress"
                );
            }
        }

        Ok(SaResult {
            best,
            best_fitness,
            iterations: total_iterations,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            fitness_history,
            current_history,
            temperature_history,
            accepted_history,
        })
    }
}

/// Apply the cooling schedule to compute the next temperature.
fn cool(temperature: f64, config: &SaConfig, step: usize, linear_steps: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,

        CoolingSchedule::Linear => {
            let t = config.initial_temperature
                - (step + 1) as f64 * (config.initial_temperature - config.min_temperature)
                    / linear_steps as f64;
            t.max(config.min_temperature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sa::{CoolingSchedule, SaConfig};

    // ---- f(x) = -x^2, maximum at 0 ----

    struct InvertedParabola;

    impl SaProblem for InvertedParabola {
        type Solution = f64;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> f64 {
            rng.random_range(-10.0..10.0)
        }

        fn fitness(&self, x: &f64) -> f64 {
            -(x * x)
        }

        fn neighbor<R: Rng>(&self, x: &f64, rng: &mut R) -> f64 {
            x + rng.random_range(-1.0..1.0)
        }
    }

    #[test]
    fn test_sa_parabola_geometric() {
        let config = SaConfig::default()
            .with_initial_temperature(100.0)
            .with_min_temperature(0.001)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.95 })
            .with_iterations_per_temperature(50)
            .with_seed(42);

        let result = SaRunner::run(&InvertedParabola, &config).unwrap();

        assert!(
            result.best_fitness > -1.0,
            "expected near-zero fitness, got {}",
            result.best_fitness
        );
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves > result.improving_moves);
    }

    #[test]
    fn test_sa_parabola_linear() {
        let config = SaConfig::default()
            .with_initial_temperature(100.0)
            .with_min_temperature(0.001)
            .with_cooling(CoolingSchedule::Linear)
            .with_iterations_per_temperature(50)
            .with_max_iterations(50_000)
            .with_seed(42);

        let result = SaRunner::run(&InvertedParabola, &config).unwrap();

        assert!(
            result.best_fitness > -1.0,
            "expected near-zero fitness, got {}",
            result.best_fitness
        );
        assert!((result.final_temperature - 0.001).abs() < 1e-9);
    }

    #[test]
    fn test_sa_max_iterations_limit() {
        let config = SaConfig::default()
            .with_initial_temperature(1e10)
            .with_min_temperature(1e-15)
            .with_iterations_per_temperature(10)
            .with_max_iterations(100)
            .with_seed(42);

        let result = SaRunner::run(&InvertedParabola, &config).unwrap();

        assert_eq!(result.iterations, 100);
        assert_eq!(result.fitness_history.len(), 101);
        assert_eq!(result.current_history.len(), 101);
        assert_eq!(result.temperature_history.len(), 101);
        assert_eq!(result.accepted_history.len(), 100);
        assert_eq!(
            result.accepted_history.iter().filter(|&&a| a).count(),
            result.accepted_moves
        );
    }

    #[test]
    fn test_sa_stops_at_min_temperature() {
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(0.5)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.5 })
            .with_seed(42);

        let result = SaRunner::run(&InvertedParabola, &config).unwrap();

        // 1.0 -> 0.5 after the first step
        assert_eq!(result.iterations, 1);
        assert!(result.final_temperature <= 0.5);
    }

    #[test]
    fn test_sa_best_history_non_decreasing() {
        let config = SaConfig::default()
            .with_initial_temperature(50.0)
            .with_min_temperature(0.01)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.95 })
            .with_iterations_per_temperature(100)
            .with_seed(42);

        let result = SaRunner::run(&InvertedParabola, &config).unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness history should be non-decreasing: {} < {}",
                window[1],
                window[0]
            );
        }
        for (best, current) in result.fitness_history.iter().zip(&result.current_history) {
            assert!(current <= best);
        }
    }

    #[test]
    fn test_sa_metropolis_accepts_downhill() {
        // At very high temperature, almost all moves should be accepted
        let config = SaConfig::default()
            .with_initial_temperature(1e8)
            .with_min_temperature(1e7)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.99 })
            .with_iterations_per_temperature(1000)
            .with_seed(42);

        let result = SaRunner::run(&InvertedParabola, &config).unwrap();

        let acceptance_ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(
            acceptance_ratio > 0.8,
            "expected high acceptance at high temp, got {acceptance_ratio}"
        );
    }

    #[test]
    fn test_acceptance_probability_decreases_with_temperature() {
        let delta = -0.5;
        let temps = [100.0, 10.0, 1.0, 0.1, 0.01];
        let probs: Vec<f64> = temps
            .iter()
            .map(|&t| acceptance_probability(delta, t))
            .collect();
        for w in probs.windows(2) {
            assert!(w[1] < w[0], "{probs:?}");
        }
        assert_eq!(acceptance_probability(delta, 0.0), 0.0);
        assert_eq!(acceptance_probability(0.0, 0.0), 1.0);
        assert_eq!(acceptance_probability(2.0, 1.0), 1.0);
    }

    #[test]
    fn test_sa_deterministic_per_seed() {
        let config = SaConfig::default().with_max_iterations(500).with_seed(3);
        let a = SaRunner::run(&InvertedParabola, &config).unwrap();
        let b = SaRunner::run(&InvertedParabola, &config).unwrap();
        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.current_history, b.current_history);
    }

    #[test]
    fn test_sa_invalid_config() {
        let config = SaConfig::default().with_iterations_per_temperature(0);
        assert!(SaRunner::run(&InvertedParabola, &config).is_err());
    }
}
