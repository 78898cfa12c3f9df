//! Genetic Algorithm (GA).
//!
//! Generational loop with elitism and tournament selection over any
//! [`GaProblem`]. Each generation keeps the `elite_count` best individuals,
//! fills the rest with children of tournament winners (crossover, mutation,
//! repair) and evaluates them, optionally in parallel. The best fitness per
//! generation therefore never decreases.
//!
//! Fitness is maximized.

mod config;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::tournament;
pub use types::{GaProblem, Individual};
