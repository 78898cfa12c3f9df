//! Experiment configuration.
//!
//! Loaded from JSON; every field is optional and falls back to its default.
//!
//! ```json
//! {
//!   "seed": 7,
//!   "weights": { "fairness": 0.4 },
//!   "genetic": { "population_size": 50, "max_generations": 100 },
//!   "annealing": { "cooling": { "type": "linear" } }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::fitness::FitnessWeights;
use crate::ga::GaConfig;
use crate::hc::HcConfig;
use crate::random::DEFAULT_SEED;
use crate::sa::SaConfig;
use crate::search::OperatorConfig;

/// Settings for one experiment: objective weights, operators and the
/// three optimizers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Seed for every optimizer whose own config leaves `seed` unset.
    pub seed: u64,
    pub weights: FitnessWeights,
    pub operators: OperatorConfig,
    pub hill_climbing: HcConfig,
    pub genetic: GaConfig,
    pub annealing: SaConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            weights: FitnessWeights::default(),
            operators: OperatorConfig::default(),
            hill_climbing: HcConfig::default(),
            genetic: GaConfig::default(),
            annealing: SaConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.operators.validate()?;
        self.hill_climbing.validate()?;
        self.genetic.validate()?;
        self.annealing.validate()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
