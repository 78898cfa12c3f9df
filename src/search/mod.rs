//! Workload allocation search.
//!
//! Glues the domain model to the generic optimizers:
//!
//! - [`construct`]: greedy initial allocation and repair
//! - [`neighbor`]: the one-course perturbation every optimizer uses
//! - [`AllocationSearch`]: implements [`HcProblem`](crate::hc::HcProblem),
//!   [`GaProblem`](crate::ga::GaProblem) and [`SaProblem`](crate::sa::SaProblem)
//! - [`solve`]: runs one algorithm end to end and evaluates its result

pub mod construct;
pub mod neighbor;
mod problem;

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

pub use problem::{AllocationSearch, Candidate};

use crate::config::ExperimentConfig;
use crate::error::{Error, Result};
use crate::fitness::{Evaluation, Evaluator};
use crate::ga::GaRunner;
use crate::hc::HcRunner;
use crate::model::{Allocation, WorkloadProblem};
use crate::sa::SaRunner;

/// Settings of the variation operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// Per-course probability of perturbation during GA mutation.
    pub gene_mutation_rate: f64,
    /// Lower bound on a team member's share when shares are redrawn.
    /// Capped at `1 / n` for a team of `n`.
    pub min_share: f64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            gene_mutation_rate: 0.05,
            min_share: 0.2,
        }
    }
}

impl OperatorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.gene_mutation_rate) {
            return Err(Error::Config(format!(
                "gene_mutation_rate must be in [0, 1], got {}",
                self.gene_mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.min_share) {
            return Err(Error::Config(format!(
                "min_share must be in [0, 1], got {}",
                self.min_share
            )));
        }
        Ok(())
    }
}

/// The optimizers available for allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    HillClimbing,
    Genetic,
    Annealing,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::HillClimbing,
        Algorithm::Genetic,
        Algorithm::Annealing,
    ];

    /// Short name used in file names and tables.
    pub fn slug(self) -> &'static str {
        match self {
            Algorithm::HillClimbing => "hill_climbing",
            Algorithm::Genetic => "genetic_algorithm",
            Algorithm::Annealing => "simulated_annealing",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::HillClimbing => "Hill Climbing",
            Algorithm::Genetic => "Genetic Algorithm",
            Algorithm::Annealing => "Simulated Annealing",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "hill-climbing" | "hc" => Ok(Algorithm::HillClimbing),
            "genetic" | "genetic-algorithm" | "ga" => Ok(Algorithm::Genetic),
            "annealing" | "simulated-annealing" | "sa" => Ok(Algorithm::Annealing),
            other => Err(Error::Config(format!("unknown algorithm: {other}"))),
        }
    }
}

/// Per-step convergence data of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    /// Best fitness so far, starting with the initial value.
    pub best: Vec<f64>,
    /// Mean population fitness (GA only).
    pub mean: Option<Vec<f64>>,
    /// Current-solution fitness (SA only).
    pub current: Option<Vec<f64>>,
    /// Temperature (SA only).
    pub temperature: Option<Vec<f64>>,
    /// Whether the move leading to each step was accepted (SA only); one
    /// entry shorter than `best`.
    pub accepted: Option<Vec<bool>>,
}

/// Result of one algorithm run on a problem.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub algorithm: Algorithm,
    pub allocation: Allocation,
    pub evaluation: Evaluation,
    pub trace: Trace,
    /// Iterations (HC, SA) or generations (GA) performed.
    pub iterations: usize,
    pub elapsed: Duration,
}

/// Runs `algorithm` on `problem` and evaluates the best allocation found.
///
/// The experiment seed applies to any algorithm config without its own.
///
/// # Errors
/// Fails when the weights, operators or algorithm config are invalid.
pub fn solve(
    problem: &WorkloadProblem,
    algorithm: Algorithm,
    config: &ExperimentConfig,
) -> Result<Outcome> {
    config.weights.validate()?;
    config.operators.validate()?;

    let evaluator = Evaluator::new(problem, config.weights.clone());
    let search = AllocationSearch::new(evaluator.clone(), config.operators.clone());
    info!(
        algorithm = algorithm.label(),
        professors = problem.professor_count(),
        courses = problem.course_count(),
        "starting optimization"
    );
    let started = Instant::now();

    let (allocation, trace, iterations) = match algorithm {
        Algorithm::HillClimbing => {
            let mut hc = config.hill_climbing.clone();
            hc.seed = hc.seed.or(Some(config.seed));
            let result = HcRunner::run(&search, &hc)?;
            info!(
                iterations = result.iterations,
                evaluations = result.evaluations,
                local_optimum = result.local_optimum,
                "hill climbing finished"
            );
            let trace = Trace {
                best: result.fitness_history,
                ..Trace::default()
            };
            (result.best, trace, result.iterations)
        }
        Algorithm::Genetic => {
            let mut ga = config.genetic.clone();
            ga.seed = ga.seed.or(Some(config.seed));
            let result = GaRunner::run(&search, &ga)?;
            info!(generations = result.generations, "genetic algorithm finished");
            let trace = Trace {
                best: result.fitness_history,
                mean: Some(result.mean_history),
                ..Trace::default()
            };
            (result.best.allocation, trace, result.generations)
        }
        Algorithm::Annealing => {
            let mut sa = config.annealing.clone();
            sa.seed = sa.seed.or(Some(config.seed));
            let result = SaRunner::run(&search, &sa)?;
            info!(
                iterations = result.iterations,
                accepted = result.accepted_moves,
                improving = result.improving_moves,
                final_temperature = result.final_temperature,
                "simulated annealing finished"
            );
            let trace = Trace {
                best: result.fitness_history,
                current: Some(result.current_history),
                temperature: Some(result.temperature_history),
                accepted: Some(result.accepted_history),
                ..Trace::default()
            };
            (result.best, trace, result.iterations)
        }
    };

    let elapsed = started.elapsed();
    let evaluation = evaluator.evaluate(&allocation);
    info!(
        algorithm = algorithm.label(),
        fitness = evaluation.fitness,
        feasible = evaluation.feasible,
        elapsed_ms = elapsed.as_millis() as u64,
        "optimization complete"
    );

    Ok(Outcome {
        algorithm,
        allocation,
        evaluation,
        trace,
        iterations,
        elapsed,
    })
}
