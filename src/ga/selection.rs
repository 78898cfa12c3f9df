//! Parent selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::Rng;

/// Tournament selection: pick `k` random individuals, return the index of
/// the fittest.
///
/// Higher `k` means stronger selection pressure. `k = 0` is treated as 1.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[derive(Clone, Debug)]
    struct Simple(f64);

    impl Individual for Simple {
        fn fitness(&self) -> f64 {
            self.0
        }
        fn set_fitness(&mut self, f: f64) {
            self.0 = f;
        }
    }

    fn population() -> Vec<Simple> {
        (0..10).map(|i| Simple(i as f64)).collect()
    }

    #[test]
    fn test_tournament_prefers_fitter() {
        let pop = population();
        let mut rng = create_rng(42);
        let mut hits = [0usize; 10];
        for _ in 0..1000 {
            hits[tournament(&pop, 3, &mut rng)] += 1;
        }
        assert!(
            hits[9] > hits[0],
            "fittest should be picked more often than the weakest: {hits:?}"
        );
    }

    #[test]
    fn test_tournament_full_pressure() {
        let pop = population();
        let mut rng = create_rng(1);
        // with a huge tournament the fittest is (almost) always drawn
        let picks: Vec<usize> = (0..20).map(|_| tournament(&pop, 200, &mut rng)).collect();
        assert!(picks.iter().all(|&i| i == 9), "picks: {picks:?}");
    }

    #[test]
    fn test_tournament_single_individual() {
        let pop = vec![Simple(1.0)];
        let mut rng = create_rng(3);
        assert_eq!(tournament(&pop, 3, &mut rng), 0);
        assert_eq!(tournament(&pop, 0, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_tournament_empty_panics() {
        let pop: Vec<Simple> = Vec::new();
        let mut rng = create_rng(3);
        tournament(&pop, 3, &mut rng);
    }
}
