//! Steepest-ascent Hill Climbing (HC).
//!
//! A single-solution trajectory method: sample a batch of neighbors, move
//! to the best one if it improves on the current solution, and stop as
//! soon as no sampled neighbor does. There are no restarts, so the run ends
//! at the first local optimum it reaches.
//!
//! # References
//!
//! - Russell, S. & Norvig, P. (2010). *Artificial Intelligence: A Modern
//!   Approach*, 3rd ed., §4.1.1.

mod config;
mod runner;
mod types;

pub use config::HcConfig;
pub use runner::{HcResult, HcRunner};
pub use types::HcProblem;
