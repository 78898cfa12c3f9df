//! Result reporting: CSV tables, statistical tests and charts.
//!
//! [`write_all`] produces the complete set of files for a batch of
//! outcomes:
//!
//! | File | Writer |
//! |------|--------|
//! | `<slug>_allocation.csv` | [`tables::write_allocation`] |
//! | `<slug>_professor_summary.csv` | [`tables::write_professor_summary`] |
//! | `<slug>_trace.csv` | [`tables::write_trace`] |
//! | `algorithm_comparison.csv` | [`tables::write_comparison`] |
//! | `statistical_tests.csv` | [`stats::write_tests`] (two or more outcomes, two or more professors) |
//! | `<slug>_convergence.png` | [`plot::convergence`] |
//! | `<slug>_cooling_process.png` | [`plot::cooling_process`] (annealing) |
//! | `workload_distribution.png` | [`plot::workload_distribution`] |
//! | `fitness_comparison.png` | [`plot::fitness_comparison`] |
//! | `execution_time_comparison.png` | [`plot::execution_time_comparison`] |
//! | `algorithm_performance_comparison.png` | [`plot::performance_comparison`] |
//! | `fairness_analysis.png` | [`plot::fairness_analysis`] |
//!
//! Charts are PNG at [`plot::DPI`].

pub mod plot;
pub mod stats;
pub mod tables;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use stats::{pairwise_tests, t_test, PairwiseTest, TTest, SIGNIFICANCE_LEVEL};
pub use tables::{load_percentage, WorkloadStats};

use crate::error::Result;
use crate::model::WorkloadProblem;
use crate::search::Outcome;

/// Writes every table, and the charts unless `plots` is false, into `dir`.
/// Returns the written paths in creation order.
pub fn write_all(
    dir: &Path,
    problem: &WorkloadProblem,
    outcomes: &[Outcome],
    plots: bool,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    for outcome in outcomes {
        let slug = outcome.algorithm.slug();

        let path = dir.join(format!("{slug}_allocation.csv"));
        tables::write_allocation(&path, problem, outcome)?;
        written.push(path);

        let path = dir.join(format!("{slug}_professor_summary.csv"));
        tables::write_professor_summary(&path, problem, outcome)?;
        written.push(path);

        let path = dir.join(format!("{slug}_trace.csv"));
        tables::write_trace(&path, outcome)?;
        written.push(path);

        if plots {
            let path = dir.join(format!("{slug}_convergence.png"));
            plot::convergence(&path, outcome)?;
            written.push(path);

            if outcome.trace.temperature.is_some() {
                let path = dir.join(format!("{slug}_cooling_process.png"));
                plot::cooling_process(&path, outcome)?;
                written.push(path);
            }
        }
    }

    let path = dir.join("algorithm_comparison.csv");
    tables::write_comparison(&path, outcomes)?;
    written.push(path);

    let smallest_sample = outcomes
        .iter()
        .map(|o| o.evaluation.teaching_hours.len())
        .min()
        .unwrap_or(0);
    if outcomes.len() >= 2 && smallest_sample < 2 {
        warn!(
            professors = smallest_sample,
            "skipping t-tests: need at least two professors per sample"
        );
    } else if outcomes.len() >= 2 {
        let tests = pairwise_tests(outcomes)?;
        for t in &tests {
            info!(
                comparison = %t.comparison,
                t = t.t_statistic,
                p = t.p_value,
                significant = t.significant,
                "t-test"
            );
        }
        let path = dir.join("statistical_tests.csv");
        stats::write_tests(&path, &tests)?;
        written.push(path);
    }

    if plots {
        let path = dir.join("workload_distribution.png");
        plot::workload_distribution(&path, outcomes)?;
        written.push(path);

        let path = dir.join("fitness_comparison.png");
        plot::fitness_comparison(&path, outcomes)?;
        written.push(path);

        let path = dir.join("execution_time_comparison.png");
        plot::execution_time_comparison(&path, outcomes)?;
        written.push(path);

        let path = dir.join("algorithm_performance_comparison.png");
        plot::performance_comparison(&path, outcomes)?;
        written.push(path);

        let path = dir.join("fairness_analysis.png");
        plot::fairness_analysis(&path, problem, outcomes)?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "report written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExperimentConfig;
    use crate::dataset::{generate, GeneratorConfig};
    use crate::search::{solve, Algorithm};

    fn outcomes(problem: &WorkloadProblem) -> Vec<Outcome> {
        let mut config = ExperimentConfig::default();
        config.hill_climbing.max_iterations = 10;
        config.genetic.population_size = 8;
        config.genetic.max_generations = 3;
        config.annealing.max_iterations = 50;
        Algorithm::ALL
            .iter()
            .map(|&a| solve(problem, a, &config).unwrap())
            .collect()
    }

    #[test]
    fn test_write_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let problem = generate(&GeneratorConfig::default().with_size(15, 12)).unwrap();
        let outcomes = outcomes(&problem);

        let written = write_all(dir.path(), &problem, &outcomes, true).unwrap();
        // 4 per algorithm + cooling process + comparison + tests + 5 charts
        assert_eq!(written.len(), 3 * 4 + 1 + 2 + 5);
        assert!(written.iter().all(|p| p.exists()));
        assert!(dir.path().join("genetic_algorithm_trace.csv").exists());
        for name in [
            "simulated_annealing_cooling_process.png",
            "execution_time_comparison.png",
            "algorithm_performance_comparison.png",
            "fairness_analysis.png",
        ] {
            assert!(dir.path().join(name).exists(), "missing {name}");
        }
        assert!(!dir.path().join("hill_climbing_cooling_process.png").exists());

        // PNG signature
        let bytes = fs::read(dir.path().join("fitness_comparison.png")).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_cooling_process_needs_temperature() {
        let dir = tempfile::tempdir().unwrap();
        let problem = generate(&GeneratorConfig::default().with_size(15, 12)).unwrap();
        let outcomes = outcomes(&problem);
        let path = dir.path().join("cooling.png");

        let err = plot::cooling_process(&path, &outcomes[0]).unwrap_err();
        assert!(matches!(err, crate::Error::Plot(_)));
        plot::cooling_process(&path, &outcomes[2]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_single_professor_skips_tests() {
        let dir = tempfile::tempdir().unwrap();
        let problem = generate(&GeneratorConfig::default().with_size(1, 3)).unwrap();
        let outcomes = outcomes(&problem);

        let written = write_all(dir.path(), &problem, &outcomes, false).unwrap();
        assert_eq!(written.len(), 3 * 3 + 1);
        assert!(dir.path().join("algorithm_comparison.csv").exists());
        assert!(!dir.path().join("statistical_tests.csv").exists());
    }

    #[test]
    fn test_annealing_trace_columns() {
        let dir = tempfile::tempdir().unwrap();
        let problem = generate(&GeneratorConfig::default().with_size(15, 12)).unwrap();
        let outcomes = outcomes(&problem);

        write_all(dir.path(), &problem, &outcomes[2..], false).unwrap();
        let mut reader =
            csv::Reader::from_path(dir.path().join("simulated_annealing_trace.csv")).unwrap();
        let rows: Vec<std::collections::HashMap<String, String>> =
            reader.deserialize().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), outcomes[2].trace.best.len());
        assert_eq!(rows[0]["accepted"], "");
        assert!(!rows[0]["temperature"].is_empty());
        assert!(rows[1..].iter().all(|r| r["accepted"] == "true" || r["accepted"] == "false"));
        assert!(rows.iter().all(|r| r["mean_fitness"].is_empty()));
    }

    #[test]
    fn test_write_tables_only() {
        let dir = tempfile::tempdir().unwrap();
        let problem = generate(&GeneratorConfig::default().with_size(15, 12)).unwrap();
        let outcomes = outcomes(&problem);

        let written = write_all(dir.path(), &problem, &outcomes[..1], false).unwrap();
        assert_eq!(written.len(), 4);
        assert!(written.iter().all(|p| p.extension().is_some_and(|e| e == "csv")));

        let mut reader = csv::Reader::from_path(dir.path().join("hill_climbing_allocation.csv")).unwrap();
        let shares: f64 = reader
            .deserialize::<std::collections::HashMap<String, String>>()
            .map(|row| row.unwrap()["share"].parse::<f64>().unwrap())
            .sum();
        assert!((shares - 12.0).abs() < 1e-6);
    }
}
