//! End-to-end runs on the default 100-professor / 80-course dataset.

use u_workload::config::ExperimentConfig;
use u_workload::dataset::{self, generate, GeneratorConfig};
use u_workload::fitness::{Evaluator, FitnessWeights};
use u_workload::model::Assignment;
use u_workload::report;
use u_workload::search::{solve, Algorithm};

fn quick_config() -> ExperimentConfig {
    let mut config = ExperimentConfig::default().with_seed(2024);
    config.hill_climbing.max_iterations = 60;
    config.hill_climbing.neighbors_per_iteration = 10;
    config.genetic.population_size = 20;
    config.genetic.max_generations = 10;
    config.annealing.max_iterations = 1500;
    config
}

#[test]
fn test_each_algorithm_is_reproducible() {
    let problem = generate(&GeneratorConfig::default()).unwrap();
    let config = quick_config();

    for algorithm in Algorithm::ALL {
        let first = solve(&problem, algorithm, &config).unwrap();
        let second = solve(&problem, algorithm, &config).unwrap();
        assert_eq!(
            first.evaluation.fitness, second.evaluation.fitness,
            "{algorithm} is not reproducible"
        );
        assert_eq!(first.allocation, second.allocation);
        assert_eq!(first.trace.best, second.trace.best);
    }
}

#[test]
fn test_seed_changes_result() {
    let problem = generate(&GeneratorConfig::default()).unwrap();
    let a = solve(&problem, Algorithm::Annealing, &quick_config()).unwrap();
    let b = solve(&problem, Algorithm::Annealing, &quick_config().with_seed(7)).unwrap();
    assert_ne!(a.trace.current, b.trace.current);
}

#[test]
fn test_dataset_generation_is_deterministic() {
    let a = generate(&GeneratorConfig::default().with_seed(11)).unwrap();
    let b = generate(&GeneratorConfig::default().with_seed(11)).unwrap();
    let c = generate(&GeneratorConfig::default().with_seed(12)).unwrap();
    assert_eq!(a.professors(), b.professors());
    assert_eq!(a.preference_entries(), b.preference_entries());
    assert_ne!(a.professors(), c.professors());
}

#[test]
fn test_csv_round_trip_gives_same_run() {
    let dir = tempfile::tempdir().unwrap();
    let problem = generate(&GeneratorConfig::default()).unwrap();
    dataset::csv::save_dir(&problem, dir.path()).unwrap();
    let loaded = dataset::csv::load_dir(dir.path()).unwrap();

    assert_eq!(loaded.professors(), problem.professors());
    assert_eq!(loaded.courses(), problem.courses());

    let config = quick_config();
    let original = solve(&problem, Algorithm::HillClimbing, &config).unwrap();
    let reloaded = solve(&loaded, Algorithm::HillClimbing, &config).unwrap();
    assert_eq!(original.evaluation.fitness, reloaded.evaluation.fitness);
}

#[test]
fn test_infeasible_scores_below_feasible_range() {
    let problem = generate(&GeneratorConfig::default()).unwrap();
    let outcome = solve(&problem, Algorithm::Annealing, &quick_config()).unwrap();
    let evaluator = Evaluator::new(&problem, FitnessWeights::default());

    let mut broken = outcome.allocation.clone();
    broken.assignments[0] = Assignment::default();
    let eval = evaluator.evaluate(&broken);

    assert!(!eval.feasible);
    // a feasible allocation never scores below -mismatch_penalty
    assert!(eval.fitness < -FitnessWeights::default().mismatch_penalty);
}

#[test]
fn test_full_report() {
    let dir = tempfile::tempdir().unwrap();
    let problem = generate(&GeneratorConfig::default()).unwrap();
    let config = quick_config();
    let outcomes: Vec<_> = Algorithm::ALL
        .iter()
        .map(|&a| solve(&problem, a, &config).unwrap())
        .collect();

    report::write_all(dir.path(), &problem, &outcomes, true).unwrap();

    for name in [
        "hill_climbing_allocation.csv",
        "genetic_algorithm_professor_summary.csv",
        "simulated_annealing_trace.csv",
        "simulated_annealing_convergence.png",
        "simulated_annealing_cooling_process.png",
        "algorithm_comparison.csv",
        "statistical_tests.csv",
        "workload_distribution.png",
        "fitness_comparison.png",
        "execution_time_comparison.png",
        "algorithm_performance_comparison.png",
        "fairness_analysis.png",
    ] {
        assert!(dir.path().join(name).exists(), "missing {name}");
    }

    let mut tests = csv::Reader::from_path(dir.path().join("statistical_tests.csv")).unwrap();
    assert_eq!(tests.records().count(), 3);

    let mut summary =
        csv::Reader::from_path(dir.path().join("hill_climbing_professor_summary.csv")).unwrap();
    assert_eq!(summary.records().count(), 100);
}
