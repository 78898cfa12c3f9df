//! Annealing temperature settings.
//!
//! Fitness in this crate is a weighted score in roughly `[0, 1]` minus
//! penalties of 10 per hard violation, so the default start temperature of
//! 100 accepts almost any move early on. At the 0.1 floor a move losing 0.1
//! fitness is still accepted about a third of the time.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the temperature falls between levels.
///
/// Serialized with a `type` tag, e.g. `{"type": "geometric", "alpha": 0.995}`
/// or `{"type": "linear"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoolingSchedule {
    /// `T <- alpha * T` after every level; `alpha` in (0, 1).
    Geometric { alpha: f64 },

    /// Straight line from the initial to the minimum temperature over
    /// `max_iterations / iterations_per_temperature` levels.
    Linear,
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.999 }
    }
}

/// Simulated annealing parameters.
///
/// A run ends at whichever comes first: the temperature dropping to
/// `min_temperature`, or `max_iterations` proposed moves. With the defaults
/// (geometric 0.999 from 100 to 0.1) the floor is reached after about 6900
/// levels, so the 10 000 iteration cap rarely binds.
///
/// ```
/// use u_workload::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(50.0)
///     .with_min_temperature(0.01)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.99 })
///     .with_iterations_per_temperature(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaConfig {
    pub initial_temperature: f64,

    /// Stopping temperature; must lie below `initial_temperature`.
    pub min_temperature: f64,

    pub cooling: CoolingSchedule,

    /// Moves proposed before each cooling step.
    pub iterations_per_temperature: usize,

    /// Cap on proposed moves over the whole run.
    pub max_iterations: usize,

    /// `None` defers to the experiment seed.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 0.1,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 1,
            max_iterations: 10_000,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks temperatures, counts and the cooling factor.
    ///
    /// # Errors
    /// [`Error::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, t) in [
            ("initial_temperature", self.initial_temperature),
            ("min_temperature", self.min_temperature),
        ] {
            if !t.is_finite() || t <= 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be positive and finite, got {t}"
                )));
            }
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(Error::Config(format!(
                "min_temperature {} must be below initial_temperature {}",
                self.min_temperature, self.initial_temperature
            )));
        }
        for (name, n) in [
            ("iterations_per_temperature", self.iterations_per_temperature),
            ("max_iterations", self.max_iterations),
        ] {
            if n == 0 {
                return Err(Error::Config(format!("{name} must be at least 1")));
            }
        }
        if let CoolingSchedule::Geometric { alpha } = self.cooling {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(Error::Config(format!(
                    "geometric alpha must be in (0, 1), got {alpha}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.min_temperature - 0.1).abs() < 1e-15);
        assert_eq!(config.cooling, CoolingSchedule::Geometric { alpha: 0.999 });
        assert_eq!(config.iterations_per_temperature, 1);
        assert_eq!(config.max_iterations, 10_000);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::Geometric { alpha: 1.5 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_finite_and_zero_counts() {
        assert!(SaConfig::default().with_initial_temperature(f64::NAN).validate().is_err());
        assert!(SaConfig::default().with_min_temperature(f64::INFINITY).validate().is_err());
        assert!(SaConfig::default()
            .with_cooling(CoolingSchedule::Geometric { alpha: f64::NAN })
            .validate()
            .is_err());

        let err = SaConfig::default()
            .with_iterations_per_temperature(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("iterations_per_temperature"));
        assert!(SaConfig::default().with_max_iterations(0).validate().is_err());
    }

    #[test]
    fn test_cooling_from_json() {
        let config: SaConfig =
            serde_json::from_str(r#"{"cooling": {"type": "linear"}, "max_iterations": 500}"#)
                .unwrap();
        assert_eq!(config.cooling, CoolingSchedule::Linear);
        assert_eq!(config.max_iterations, 500);
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);

        let config: SaConfig =
            serde_json::from_str(r#"{"cooling": {"type": "geometric", "alpha": 0.95}}"#).unwrap();
        assert_eq!(config.cooling, CoolingSchedule::Geometric { alpha: 0.95 });
    }
}
