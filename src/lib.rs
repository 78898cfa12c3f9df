//! Faculty workload allocation with metaheuristics.
//!
//! Assigns professors to courses, optionally as teaching teams with share
//! fractions, so that teaching hours are fair and balanced, expertise
//! matches, preferences are honored and every hard constraint holds.
//! Three optimizers compete on the same objective:
//!
//! - **Hill Climbing (HC)**: best-of-batch steepest ascent that stops at the
//!   first local optimum.
//! - **Genetic Algorithm (GA)**: tournament selection, elitism, per-course
//!   uniform crossover, mutation and repair.
//! - **Simulated Annealing (SA)**: Metropolis acceptance under a geometric
//!   or linear cooling schedule.
//!
//! # Architecture
//!
//! The optimizers in [`hc`], [`ga`] and [`sa`] are domain-agnostic and
//! maximize whatever their problem trait reports. [`search`] binds them to
//! the allocation problem defined in [`model`] and scored by [`fitness`].
//! [`dataset`] supplies problem instances, [`report`] turns outcomes into
//! CSV tables, statistical tests and PNG charts.
//!
//! # Example
//!
//! ```no_run
//! use u_workload::config::ExperimentConfig;
//! use u_workload::dataset::{generate, GeneratorConfig};
//! use u_workload::search::{solve, Algorithm};
//!
//! let problem = generate(&GeneratorConfig::default())?;
//! let outcome = solve(&problem, Algorithm::Annealing, &ExperimentConfig::default())?;
//! println!("fitness {:.4}, feasible {}", outcome.evaluation.fitness, outcome.evaluation.feasible);
//! # Ok::<(), u_workload::Error>(())
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod hc;
pub mod model;
pub mod random;
pub mod report;
pub mod sa;
pub mod search;

pub use error::{Error, Result};
