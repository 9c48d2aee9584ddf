//! The GA as a [`Solver`].

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::Solver;

use super::config::GaConfig;
use super::runner::GaRunner;

/// Evolves a path with [`GaRunner`].
///
/// A run that ends without reaching the goal fails with
/// [`SolveError::GaExhausted`] unless the configuration sets
/// `accept_partial`, in which case the best partial path is returned.
#[derive(Debug, Clone, Default)]
pub struct GeneticSolver {
    config: GaConfig,
}

impl GeneticSolver {
    /// Creates a solver with `config`.
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    /// The configuration used for every run.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

impl Solver for GeneticSolver {
    fn algorithm_name(&self) -> &str {
        "Genetic Algorithm"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let result = GaRunner::run(grid, &self.config);
        if result.reached_goal || self.config.accept_partial {
            return Ok(result.best.into_genes());
        }
        let (ended_at, remaining) = match result.best.last() {
            Some(c) => (c.to_string(), c.manhattan(grid.goal())),
            None => ("nowhere".to_string(), 0),
        };
        Err(SolveError::GaExhausted(format!(
            "best path ends at {ended_at}, {remaining} cells from the goal, after {} generations",
            result.generations
        )))
    }
}
