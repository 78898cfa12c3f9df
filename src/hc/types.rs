//! Core trait for Hill Climbing problems.

use rand::Rng;

/// Defines a maximization problem for Hill Climbing.
///
/// Users implement this trait to specify:
/// - How to create an initial solution
/// - How to score a solution (higher is better)
/// - How to draw one random neighbor
pub trait HcProblem: Send + Sync {
    /// The solution type.
    type Solution: Clone + Send;

    /// Creates an initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Scores a solution (higher is better).
    fn fitness(&self, solution: &Self::Solution) -> f64;

    /// Draws one random neighbor of `solution`.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}
