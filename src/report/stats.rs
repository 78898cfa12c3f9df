//! Statistical comparison of algorithm outcomes.

use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{Error, Result};
use crate::search::Outcome;

/// Significance level used to flag differences.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Result of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTest {
    pub t_statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    pub degrees_of_freedom: f64,
}

impl TTest {
    pub fn significant(&self) -> bool {
        self.p_value < SIGNIFICANCE_LEVEL
    }
}

/// Two-sided Student's t-test for independent samples with pooled
/// variance.
///
/// Samples with zero pooled variance give `t = 0, p = 1` when their means
/// agree and `t = ±inf, p = 0` otherwise.
///
/// # Errors
/// Returns [`Error::Statistics`] when either sample has fewer than two
/// observations.
///
/// ```
/// use u_workload::report::t_test;
///
/// let a = [10.0, 12.0, 11.0, 13.0];
/// let same = t_test(&a, &a).unwrap();
/// assert_eq!(same.t_statistic, 0.0);
/// assert_eq!(same.p_value, 1.0);
/// ```
pub fn t_test(a: &[f64], b: &[f64]) -> Result<TTest> {
    if a.len() < 2 || b.len() < 2 {
        return Err(Error::Statistics(format!(
            "t-test needs at least two observations per sample, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (m1, v1) = mean_variance(a);
    let (m2, v2) = mean_variance(b);
    let df = n1 + n2 - 2.0;
    let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
    let se = (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
    let diff = m1 - m2;

    if se == 0.0 || !se.is_finite() {
        let (t_statistic, p_value) = if diff == 0.0 {
            (0.0, 1.0)
        } else {
            (diff.signum() * f64::INFINITY, 0.0)
        };
        return Ok(TTest {
            t_statistic,
            p_value,
            degrees_of_freedom: df,
        });
    }

    let t_statistic = diff / se;
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| Error::Statistics(e.to_string()))?;
    let p_value = (2.0 * dist.sf(t_statistic.abs())).clamp(0.0, 1.0);
    Ok(TTest {
        t_statistic,
        p_value,
        degrees_of_freedom: df,
    })
}

/// Sample mean and unbiased variance.
fn mean_variance(xs: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var)
}

/// A t-test between the teaching-hour distributions of two algorithms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseTest {
    pub comparison: String,
    pub t_statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: f64,
    pub significant: bool,
    pub interpretation: &'static str,
}

/// Tests every pair of outcomes, in input order.
pub fn pairwise_tests(outcomes: &[Outcome]) -> Result<Vec<PairwiseTest>> {
    let mut tests = Vec::new();
    for (i, a) in outcomes.iter().enumerate() {
        for b in &outcomes[i + 1..] {
            let test = t_test(&a.evaluation.teaching_hours, &b.evaluation.teaching_hours)?;
            let significant = test.significant();
            tests.push(PairwiseTest {
                comparison: format!("{} vs {}", a.algorithm.label(), b.algorithm.label()),
                t_statistic: test.t_statistic,
                p_value: test.p_value,
                degrees_of_freedom: test.degrees_of_freedom,
                significant,
                interpretation: if significant {
                    "Significant difference"
                } else {
                    "No significant difference"
                },
            });
        }
    }
    Ok(tests)
}

pub fn write_tests(path: &Path, tests: &[PairwiseTest]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for test in tests {
        writer.serialize(test)?;
    }
    writer.flush()?;
    Ok(())
}
