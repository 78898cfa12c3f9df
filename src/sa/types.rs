//! SA trait.

use rand::Rng;

/// A problem Simulated Annealing can walk through.
///
/// The runner owns temperature, acceptance and cooling; the problem only
/// supplies a start point, a fitness (maximized) and a random neighbor.
/// Neighbors should be small perturbations, and repeated moves should be
/// able to reach any solution from any other.
pub trait SaProblem: Send + Sync {
    type Solution: Clone + Send;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    fn fitness(&self, solution: &Self::Solution) -> f64;

    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}
