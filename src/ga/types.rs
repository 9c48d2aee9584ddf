//! Individuals and populations.
//!
//! Fitness is maximized: higher is better.

use std::cmp::Ordering;

use super::chromosome::PathChromosome;
use super::fitness::evaluate;
use crate::grid::Grid;

/// A chromosome paired with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// The candidate path.
    pub chromosome: PathChromosome,
    /// Its score.
    pub fitness: f64,
}

impl Individual {
    /// Scores `chromosome` against `grid`.
    pub fn evaluated(grid: &Grid, chromosome: PathChromosome) -> Self {
        let fitness = evaluate(grid, chromosome.genes());
        Self {
            chromosome,
            fitness,
        }
    }
}

/// Orders individuals best first; stable for ties.
pub(crate) fn by_fitness_desc(a: &Individual, b: &Individual) -> Ordering {
    b.fitness.total_cmp(&a.fitness)
}

/// One generation of individuals.
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Wraps already-evaluated individuals.
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Evaluates and wraps chromosomes.
    ///
    /// With the `parallel` feature the scores are computed on the rayon
    /// pool; order and values are the same either way.
    pub fn evaluate(grid: &Grid, chromosomes: Vec<PathChromosome>) -> Self {
        #[cfg(feature = "parallel")]
        let individuals = {
            use rayon::prelude::*;
            chromosomes
                .into_par_iter()
                .map(|c| Individual::evaluated(grid, c))
                .collect()
        };
        #[cfg(not(feature = "parallel"))]
        let individuals = chromosomes
            .into_iter()
            .map(|c| Individual::evaluated(grid, c))
            .collect();
        Self::new(individuals)
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The individuals in their current order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Sorts best first, keeping the relative order of equal scores.
    pub fn sort_by_fitness(&mut self) {
        self.individuals.sort_by(by_fitness_desc);
    }

    /// The highest-scoring individual.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .reduce(|best, ind| if ind.fitness > best.fitness { ind } else { best })
    }

    /// Clones the top `count` individuals; assumes the population is sorted.
    pub fn elite(&self, count: usize) -> Vec<Individual> {
        self.individuals[..count.min(self.individuals.len())].to_vec()
    }

    /// Mean over finite fitness values; `NEG_INFINITY` if there are none.
    pub fn mean_fitness(&self) -> f64 {
        let finite: Vec<f64> = self
            .individuals
            .iter()
            .map(|ind| ind.fitness)
            .filter(|f| f.is_finite())
            .collect();
        if finite.is_empty() {
            f64::NEG_INFINITY
        } else {
            finite.iter().sum::<f64>() / finite.len() as f64
        }
    }

    /// Consumes the population.
    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }
}
