//! Hill Climbing configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration parameters for Hill Climbing.
///
/// # Examples
///
/// ```
/// use u_workload::hc::HcConfig;
///
/// let config = HcConfig::default()
///     .with_max_iterations(200)
///     .with_neighbors_per_iteration(10);
/// assert_eq!(config.max_iterations, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HcConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Neighbors sampled per iteration.
    pub neighbors_per_iteration: usize,
    /// Minimum fitness gain that counts as an improvement.
    pub improvement_tolerance: f64,
    /// Random seed (None falls back to the crate default).
    pub seed: Option<u64>,
}

impl Default for HcConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            neighbors_per_iteration: 20,
            improvement_tolerance: 1e-9,
            seed: None,
        }
    }
}

impl HcConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the neighborhood sample size.
    pub fn with_neighbors_per_iteration(mut self, n: usize) -> Self {
        self.neighbors_per_iteration = n;
        self
    }

    pub fn with_improvement_tolerance(mut self, tolerance: f64) -> Self {
        self.improvement_tolerance = tolerance;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameter ranges.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.neighbors_per_iteration == 0 {
            return Err(Error::Config(
                "hill climbing needs at least one neighbor per iteration".into(),
            ));
        }
        if !self.improvement_tolerance.is_finite() || self.improvement_tolerance < 0.0 {
            return Err(Error::Config(format!(
                "improvement_tolerance must be non-negative, got {}",
                self.improvement_tolerance
            )));
        }
        Ok(())
    }
}
