//! The solver contract.
//!
//! Every algorithm implements [`Solver::search`], which returns a raw path
//! or a [`SolveError`]. The provided [`Solver::solve`] wraps it with timing
//! and cost accounting and produces a [`SolverResult`].
//!
//! # Toolkit
//!
//! Free functions shared across algorithms: [`DIRECTIONS`],
//! [`walkable_neighbors`], [`step_cost`], [`path_cost`], [`is_valid_path`],
//! [`reaches_goal`].
//!
//! # Registry
//!
//! [`available_solvers`] lists every algorithm in display order;
//! [`find_solver`] looks one up by name.

mod registry;
mod toolkit;

use std::time::{Duration, Instant};

use log::debug;

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};

pub use registry::{available_solvers, find_solver};
pub(crate) use toolkit::{neighbor_indices, reconstruct_path, MinQueue, NO_PARENT};
pub use toolkit::{
    is_valid_path, is_walkable, path_cost, reaches_goal, step_cost, walkable_neighbors, Direction,
    DIRECTIONS,
};

/// Outcome of a successful [`Solver::solve`].
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Start-first path; never empty.
    pub path: Vec<Coordinate>,
    /// Sum of step costs over every path cell.
    pub total_cost: u64,
    /// When the search began.
    pub started_at: Instant,
    /// When the search returned.
    pub finished_at: Instant,
}

impl SolverResult {
    /// Wall-clock search time.
    pub fn elapsed(&self) -> Duration {
        self.finished_at.duration_since(self.started_at)
    }
}

/// A pathfinding algorithm.
///
/// Implementors hold only configuration, never per-run state, so one
/// instance can solve any number of grids.
pub trait Solver {
    /// Display name used by registries and reports.
    fn algorithm_name(&self) -> &str;

    /// Finds a start-first path to the goal.
    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError>;

    /// Runs [`search`](Self::search) with timing and cost accounting.
    fn solve(&self, grid: &Grid) -> Result<SolverResult, SolveError> {
        debug!(
            "{}: solving '{}' ({}x{}) {} -> {}",
            self.algorithm_name(),
            grid.name(),
            grid.height(),
            grid.width(),
            grid.start(),
            grid.goal()
        );
        let started_at = Instant::now();
        let path = self.search(grid)?;
        let finished_at = Instant::now();

        if path.is_empty() {
            return Err(SolveError::no_path());
        }
        let total_cost = path_cost(grid, &path);
        debug!(
            "{}: path of {} cells, cost {}",
            self.algorithm_name(),
            path.len(),
            total_cost
        );
        Ok(SolverResult {
            path,
            total_cost,
            started_at,
            finished_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;

    struct Fixed(Vec<Coordinate>);

    impl Solver for Fixed {
        fn algorithm_name(&self) -> &str {
            "fixed"
        }

        fn search(&self, _grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_solve_wraps_cost_and_timing() {
        let grid = fixtures::open_3x3();
        let path = [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)].map(Coordinate::from);
        let result = Fixed(path.to_vec()).solve(&grid).unwrap();
        assert_eq!(result.total_cost, 5);
        assert_eq!(result.path.len(), 5);
        assert!(result.finished_at >= result.started_at);
    }

    #[test]
    fn test_empty_search_is_no_path() {
        let grid = fixtures::open_3x3();
        let err = Fixed(Vec::new()).solve(&grid).unwrap_err();
        assert!(matches!(err, SolveError::NoPath(_)));
    }
}
