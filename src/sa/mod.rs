//! Simulated Annealing (SA).
//!
//! Walks from a single solution, always taking improving neighbors and
//! taking worsening ones with probability `exp(delta / T)`. The temperature
//! falls geometrically or linearly until it reaches the floor or the
//! iteration budget runs out. Fitness is maximized.
//!
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing".

mod config;
mod runner;
mod types;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::{acceptance_probability, SaResult, SaRunner};
pub use types::SaProblem;
