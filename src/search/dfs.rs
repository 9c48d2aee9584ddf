//! Depth-first search.

use log::debug;

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::{neighbor_indices, reconstruct_path, Solver, NO_PARENT};

/// LIFO expansion; returns the first path found, not the shortest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dfs;

impl Solver for Dfs {
    fn algorithm_name(&self) -> &str {
        "DFS (Depth-First Search)"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let n = grid.cell_count();
        let start = grid.index(grid.start());
        let goal = grid.index(grid.goal());

        let mut parents = vec![NO_PARENT; n];
        let mut visited = vec![false; n];
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(current) = stack.pop() {
            if current == goal {
                return Ok(reconstruct_path(grid, &parents, current));
            }
            for next in neighbor_indices(grid, current) {
                if !visited[next] {
                    visited[next] = true;
                    parents[next] = current;
                    stack.push(next);
                }
            }
        }

        debug!("dfs exhausted on '{}'", grid.name());
        Err(SolveError::no_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;
    use crate::search::Bfs;
    use crate::solver::reaches_goal;

    #[test]
    fn test_finds_valid_path() {
        for grid in [
            fixtures::open_3x3(),
            fixtures::weighted_maze(),
            fixtures::open_room(),
            fixtures::serpentine(),
        ] {
            let path = Dfs.search(&grid).unwrap();
            assert!(reaches_goal(&grid, &path), "invalid DFS path on {}", grid.name());
            let shortest = Bfs.search(&grid).unwrap();
            assert!(path.len() >= shortest.len());
        }
    }

    #[test]
    fn test_blocked_and_trivial() {
        assert!(Dfs.search(&fixtures::blocked_1x3()).is_err());
        let grid = fixtures::start_is_goal();
        assert_eq!(Dfs.search(&grid).unwrap(), vec![grid.start()]);
    }
}
