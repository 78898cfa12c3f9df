//! Property-based tests for allocation invariants and optimizer monotonicity.

use proptest::prelude::*;

use u_workload::dataset::{generate, GeneratorConfig};
use u_workload::fitness::{Evaluator, FitnessWeights};
use u_workload::ga::{GaConfig, GaRunner};
use u_workload::hc::{HcConfig, HcRunner};
use u_workload::model::WorkloadProblem;
use u_workload::random::create_rng;
use u_workload::sa::acceptance_probability;
use u_workload::search::construct::{initial_allocation, repair};
use u_workload::search::neighbor::random_neighbor;
use u_workload::search::{AllocationSearch, OperatorConfig};

fn problem(profs: usize, courses: usize, seed: u64) -> WorkloadProblem {
    generate(
        &GeneratorConfig::default()
            .with_size(profs, courses)
            .with_seed(seed),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn shares_sum_to_one_and_hours_non_negative(
        profs in 2usize..30,
        courses in 1usize..25,
        data_seed in 0u64..1000,
        seed in any::<u64>(),
        steps in 0usize..40,
    ) {
        let problem = problem(profs, courses, data_seed);
        let mut rng = create_rng(seed);
        let mut allocation = initial_allocation(&problem, &mut rng);
        for _ in 0..steps {
            allocation = random_neighbor(&problem, &allocation, 0.2, &mut rng);
        }

        prop_assert_eq!(allocation.len(), courses);
        for assignment in &allocation.assignments {
            let sum: f64 = assignment.shares.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-6, "shares sum to {}", sum);
            prop_assert!(assignment.shares.iter().all(|&s| s >= 0.0));
        }
        for hours in allocation.teaching_hours(&problem) {
            prop_assert!(hours >= 0.0);
        }
    }

    #[test]
    fn repair_restores_coverage(
        profs in 2usize..20,
        courses in 1usize..15,
        seed in any::<u64>(),
        drop_course in 0usize..15,
    ) {
        let problem = problem(profs, courses, 1);
        let mut rng = create_rng(seed);
        let mut allocation = initial_allocation(&problem, &mut rng);
        let c = drop_course % courses;
        allocation.assignments[c].professors.clear();
        allocation.assignments[c].shares.clear();

        repair(&problem, &mut allocation, &mut rng);
        for (i, a) in allocation.assignments.iter().enumerate() {
            prop_assert!(a.shares_valid());
            prop_assert!(a.len() >= problem.course(i).min_professors.min(profs));
        }
    }

    #[test]
    fn acceptance_decreases_toward_zero_temperature(
        delta in -10.0f64..-0.01,
        t_low in 0.1f64..50.0,
        factor in 1.1f64..4.0,
    ) {
        let t_high = t_low * factor;
        let p_high = acceptance_probability(delta, t_high);
        let p_low = acceptance_probability(delta, t_low);
        prop_assert!(p_high > p_low, "p({t_high}) = {p_high} <= p({t_low}) = {p_low}");
        prop_assert!(p_low > acceptance_probability(delta, 0.0));
        prop_assert!(p_high <= 1.0);
    }

    #[test]
    fn improving_moves_always_accepted(delta in 0.0f64..100.0, t in 0.0f64..100.0) {
        prop_assert_eq!(acceptance_probability(delta, t), 1.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn hill_climbing_never_decreases(seed in any::<u64>()) {
        let problem = problem(15, 12, 3);
        let search = AllocationSearch::new(
            Evaluator::new(&problem, FitnessWeights::default()),
            OperatorConfig::default(),
        );
        let config = HcConfig::default()
            .with_max_iterations(40)
            .with_neighbors_per_iteration(8)
            .with_seed(seed);
        let result = HcRunner::run(&search, &config).unwrap();

        for w in result.fitness_history.windows(2) {
            prop_assert!(w[1] >= w[0], "{} < {}", w[1], w[0]);
        }
        prop_assert_eq!(result.fitness_history.last().copied(), Some(result.best_fitness));
    }

    #[test]
    fn genetic_best_never_decreases(seed in any::<u64>()) {
        let problem = problem(15, 12, 3);
        let search = AllocationSearch::new(
            Evaluator::new(&problem, FitnessWeights::default()),
            OperatorConfig::default(),
        );
        let config = GaConfig::default()
            .with_population_size(12)
            .with_max_generations(8)
            .with_seed(seed);
        let result = GaRunner::run(&search, &config).unwrap();

        // per-generation population best, not a running maximum
        prop_assert_eq!(result.fitness_history.len(), 9);
        for w in result.fitness_history.windows(2) {
            prop_assert!(w[1] >= w[0], "{} < {}", w[1], w[0]);
        }
        prop_assert_eq!(result.fitness_history.last().copied(), Some(result.best_fitness));
        prop_assert!(GaRunner::run(&search, &config.clone().with_elite_count(0)).is_err());
    }
}
