//! Binds the allocation problem to the three optimizer traits.

use rand::Rng;

use super::construct::{initial_allocation, repair};
use super::neighbor::{perturb_course, random_neighbor};
use super::OperatorConfig;
use crate::fitness::Evaluator;
use crate::ga::{GaProblem, Individual};
use crate::hc::HcProblem;
use crate::model::Allocation;
use crate::sa::SaProblem;

/// A GA individual: an allocation with its cached fitness.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub allocation: Allocation,
    pub fitness: f64,
}

impl Candidate {
    pub fn new(allocation: Allocation) -> Self {
        Self {
            allocation,
            fitness: f64::NEG_INFINITY,
        }
    }
}

impl Individual for Candidate {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

/// Workload allocation as seen by the optimizers.
///
/// All three share the evaluator, the initial construction and the
/// neighbor primitive; they differ only in how candidates are accepted.
#[derive(Debug, Clone)]
pub struct AllocationSearch<'a> {
    evaluator: Evaluator<'a>,
    operators: OperatorConfig,
}

impl<'a> AllocationSearch<'a> {
    pub fn new(evaluator: Evaluator<'a>, operators: OperatorConfig) -> Self {
        Self {
            evaluator,
            operators,
        }
    }

    pub fn evaluator(&self) -> &Evaluator<'a> {
        &self.evaluator
    }

    fn neighbor_of<R: Rng>(&self, allocation: &Allocation, rng: &mut R) -> Allocation {
        random_neighbor(
            self.evaluator.problem(),
            allocation,
            self.operators.min_share,
            rng,
        )
    }
}

impl HcProblem for AllocationSearch<'_> {
    type Solution = Allocation;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Allocation {
        initial_allocation(self.evaluator.problem(), rng)
    }

    fn fitness(&self, solution: &Allocation) -> f64 {
        self.evaluator.fitness(solution)
    }

    fn neighbor<R: Rng>(&self, solution: &Allocation, rng: &mut R) -> Allocation {
        self.neighbor_of(solution, rng)
    }
}

impl SaProblem for AllocationSearch<'_> {
    type Solution = Allocation;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Allocation {
        initial_allocation(self.evaluator.problem(), rng)
    }

    fn fitness(&self, solution: &Allocation) -> f64 {
        self.evaluator.fitness(solution)
    }

    fn neighbor<R: Rng>(&self, solution: &Allocation, rng: &mut R) -> Allocation {
        self.neighbor_of(solution, rng)
    }
}

impl GaProblem for AllocationSearch<'_> {
    type Individual = Candidate;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Candidate {
        Candidate::new(initial_allocation(self.evaluator.problem(), rng))
    }

    fn evaluate(&self, individual: &Candidate) -> f64 {
        self.evaluator.fitness(&individual.allocation)
    }

    /// Uniform crossover: each course's assignment comes from either parent.
    fn crossover<R: Rng>(&self, parent1: &Candidate, parent2: &Candidate, rng: &mut R) -> Vec<Candidate> {
        let mut child1 = Vec::with_capacity(parent1.allocation.len());
        let mut child2 = Vec::with_capacity(parent1.allocation.len());
        for (a, b) in parent1
            .allocation
            .assignments
            .iter()
            .zip(&parent2.allocation.assignments)
        {
            if rng.random_bool(0.5) {
                child1.push(a.clone());
                child2.push(b.clone());
            } else {
                child1.push(b.clone());
                child2.push(a.clone());
            }
        }
        vec![
            Candidate::new(Allocation::new(child1)),
            Candidate::new(Allocation::new(child2)),
        ]
    }

    /// Perturbs each course with the gene rate, always at least one.
    fn mutate<R: Rng>(&self, individual: &mut Candidate, rng: &mut R) {
        let problem = self.evaluator.problem();
        let n = individual.allocation.len();
        if n == 0 {
            return;
        }
        let mut touched = false;
        for c in 0..n {
            if rng.random_bool(self.operators.gene_mutation_rate) {
                perturb_course(problem, &mut individual.allocation, c, self.operators.min_share, rng);
                touched = true;
            }
        }
        if !touched {
            let c = rng.random_range(0..n);
            perturb_course(problem, &mut individual.allocation, c, self.operators.min_share, rng);
        }
        individual.fitness = f64::NEG_INFINITY;
    }

    fn repair<R: Rng>(&self, individual: &mut Candidate, rng: &mut R) {
        repair(self.evaluator.problem(), &mut individual.allocation, rng);
    }
}
