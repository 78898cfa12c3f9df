//! Criterion benchmarks for workload allocation.
//!
//! Measures the evaluator and neighbor move on generated datasets of
//! increasing size, and short optimizer runs on the default dataset.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_workload::config::ExperimentConfig;
use u_workload::dataset::{generate, GeneratorConfig};
use u_workload::fitness::{Evaluator, FitnessWeights};
use u_workload::random::create_rng;
use u_workload::search::construct::initial_allocation;
use u_workload::search::neighbor::random_neighbor;
use u_workload::search::{solve, Algorithm};

const SIZES: [(usize, usize); 3] = [(25, 20), (50, 40), (100, 80)];

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for (profs, courses) in SIZES {
        let problem = generate(&GeneratorConfig::default().with_size(profs, courses)).unwrap();
        let allocation = initial_allocation(&problem, &mut create_rng(42));
        let evaluator = Evaluator::new(&problem, FitnessWeights::default());
        group.bench_with_input(
            BenchmarkId::new(format!("p{profs}_c{courses}"), profs),
            &allocation,
            |b, a| b.iter(|| black_box(evaluator.evaluate(black_box(a)))),
        );
    }
    group.finish();
}

fn bench_neighbor(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor");

    for (profs, courses) in SIZES {
        let problem = generate(&GeneratorConfig::default().with_size(profs, courses)).unwrap();
        let allocation = initial_allocation(&problem, &mut create_rng(42));
        let mut rng = create_rng(7);
        group.bench_with_input(
            BenchmarkId::new(format!("p{profs}_c{courses}"), profs),
            &allocation,
            |b, a| b.iter(|| black_box(random_neighbor(&problem, black_box(a), 0.2, &mut rng))),
        );
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    let problem = generate(&GeneratorConfig::default()).unwrap();
    let mut config = ExperimentConfig::default();
    config.hill_climbing.max_iterations = 50;
    config.genetic.population_size = 30;
    config.genetic.max_generations = 10;
    config.annealing.max_iterations = 1000;

    for algorithm in Algorithm::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm.slug()),
            &algorithm,
            |b, &a| b.iter(|| black_box(solve(black_box(&problem), a, &config))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_neighbor, bench_solve);
criterion_main!(benches);
