use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use u_workload::config::ExperimentConfig;
use u_workload::dataset::{self, DatasetSummary, GeneratorConfig};
use u_workload::model::WorkloadProblem;
use u_workload::report;
use u_workload::search::{solve, Algorithm};
use u_workload::Result;

#[derive(Parser, Debug)]
#[command(author, version, about = "Faculty workload allocation with metaheuristics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a synthetic dataset and write it as CSV
    Generate {
        #[arg(long, default_value = "data")]
        out: PathBuf,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        professors: usize,
        #[arg(long, default_value_t = 80)]
        courses: usize,
    },
    /// Print an overview of a dataset
    Summary {
        /// Dataset directory; the default dataset is generated when absent
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Run one or all optimizers and write reports
    Run {
        /// Dataset directory; the default dataset is generated when absent
        #[arg(long)]
        data: Option<PathBuf>,
        /// all, hill-climbing, genetic or annealing
        #[arg(long, default_value = "all", value_parser = parse_selection)]
        algorithm: Selection,
        /// JSON experiment configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overrides the configured seed
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "results")]
        out: PathBuf,
        /// Skip PNG charts
        #[arg(long)]
        no_plots: bool,
    },
}

#[derive(Debug, Clone)]
enum Selection {
    All,
    One(Algorithm),
}

impl Selection {
    fn algorithms(&self) -> Vec<Algorithm> {
        match self {
            Selection::All => Algorithm::ALL.to_vec(),
            Selection::One(a) => vec![*a],
        }
    }
}

fn parse_selection(s: &str) -> std::result::Result<Selection, String> {
    if s.eq_ignore_ascii_case("all") {
        Ok(Selection::All)
    } else {
        s.parse().map(Selection::One).map_err(|e| e.to_string())
    }
}

fn load_problem(data: Option<&PathBuf>, seed: u64) -> Result<WorkloadProblem> {
    match data {
        Some(dir) => dataset::csv::load_dir(dir),
        None => dataset::generate(&GeneratorConfig::default().with_seed(seed)),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            out,
            seed,
            professors,
            courses,
        } => {
            let config = GeneratorConfig::default()
                .with_size(professors, courses)
                .with_seed(seed);
            let problem = dataset::generate(&config)?;
            dataset::csv::save_dir(&problem, &out)?;
            println!("{}", DatasetSummary::of(&problem));
        }
        Command::Summary { data, seed } => {
            let problem = load_problem(data.as_ref(), seed)?;
            println!("{}", DatasetSummary::of(&problem));
        }
        Command::Run {
            data,
            algorithm,
            config,
            seed,
            out,
            no_plots,
        } => {
            let mut experiment = match config {
                Some(path) => ExperimentConfig::load(&path)?,
                None => ExperimentConfig::default(),
            };
            if let Some(seed) = seed {
                experiment.seed = seed;
            }
            experiment.validate()?;

            let problem = load_problem(data.as_ref(), experiment.seed)?;
            let mut outcomes = Vec::new();
            for a in algorithm.algorithms() {
                outcomes.push(solve(&problem, a, &experiment)?);
            }
            let written = report::write_all(&out, &problem, &outcomes, !no_plots)?;

            println!(
                "{:<22} {:>10} {:>9} {:>10} {:>10}",
                "algorithm", "fitness", "feasible", "violations", "seconds"
            );
            for o in &outcomes {
                println!(
                    "{:<22} {:>10.4} {:>9} {:>10} {:>10.2}",
                    o.algorithm.label(),
                    o.evaluation.fitness,
                    o.evaluation.feasible,
                    o.evaluation.violations.count(),
                    o.elapsed.as_secs_f64()
                );
            }
            info!(files = written.len(), out = %out.display(), "done");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
