//! GA traits.

use rand::Rng;

/// A population member that caches its own fitness (higher is better).
///
/// The runner stores the value returned by [`GaProblem::evaluate`] with
/// [`set_fitness`](Individual::set_fitness) and reads it back for
/// selection, elitism and the convergence history.
pub trait Individual: Clone + Send + Sync {
    fn fitness(&self) -> f64;

    fn set_fitness(&mut self, fitness: f64);
}

/// A problem the GA can evolve solutions for.
///
/// Offspring go through `crossover`, then `mutate` (each at its configured
/// rate), then always through `repair` before they are evaluated. Only
/// `create_individual` and `evaluate` are required.
///
/// The bound on `Send + Sync` lets the `parallel` feature evaluate a
/// generation on the rayon pool.
pub trait GaProblem: Send + Sync {
    type Individual: Individual;

    /// Builds one member of the initial population.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Fitness of `individual`; called once per offspring.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Recombines two parents into one or more children.
    ///
    /// Defaults to cloning the first parent.
    fn crossover<R: Rng>(
        &self,
        first: &Self::Individual,
        _second: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![first.clone()]
    }

    /// Perturbs a child in place. Defaults to doing nothing.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Restores structural validity of a child. Defaults to doing nothing.
    fn repair<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}
}
