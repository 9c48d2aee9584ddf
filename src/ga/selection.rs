//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. Different strategies provide different selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use rand::Rng;

use super::types::{by_fitness_desc, Individual};

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher fitness = better).
///
/// # Examples
///
/// ```
/// use u_pathfind::ga::Selection;
///
/// // Tournament with size 4 (the default)
/// let sel = Selection::Tournament(4);
///
/// // Linear ranking
/// let sel = Selection::Rank;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Tournament selection: pick `k` individuals at random (with
    /// replacement), select the best.
    ///
    /// Higher `k` = stronger selection pressure.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Rank-based selection.
    ///
    /// Selection probability is proportional to rank position, not raw
    /// fitness, so the million-point goal bonus does not swamp the rest of
    /// the population.
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(4)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

/// Tournament selection: pick k random individuals, return best.
fn tournament<R: Rng>(population: &[Individual], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness > population[best_idx].fitness {
            best_idx = idx;
        }
    }
    best_idx
}

/// Rank-based selection using linear ranking.
///
/// Individuals are ordered best first, then rank `r` gets weight `n - r`.
fn rank<R: Rng>(population: &[Individual], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| by_fitness_desc(&population[a], &population[b]));

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &original_idx) in order.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    order[n - 1] // floating-point fallback
}
