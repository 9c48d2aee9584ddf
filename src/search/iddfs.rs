//! Iterative-deepening depth-first search.

use log::debug;

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::{neighbor_indices, Solver};

/// Depth-limited DFS re-run with bounds `0, 1, 2, ...` up to the cell count.
///
/// Visited marks live for one descent only and are cleared on backtrack, so
/// every simple path within the bound is eventually tried. The first bound
/// that reaches the goal yields a fewest-cells path.
///
/// The descent is recursive and its running time grows with the number of
/// simple paths, so this is only practical on narrow mazes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iddfs;

impl Solver for Iddfs {
    fn algorithm_name(&self) -> &str {
        "IDDFS (Iterative Deepening DFS)"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let start = grid.index(grid.start());
        let goal = grid.index(grid.goal());
        let max_depth = grid.cell_count();

        let mut visited = vec![false; grid.cell_count()];
        let mut path = Vec::with_capacity(max_depth);

        for limit in 0..=max_depth {
            path.clear();
            path.push(start);
            visited[start] = true;
            let found = descend(grid, start, goal, limit, &mut visited, &mut path);
            visited[start] = false;
            if found {
                debug!("iddfs reached goal at depth {limit}");
                return Ok(path.iter().map(|&i| grid.coordinate(i)).collect());
            }
        }

        Err(SolveError::no_path())
    }
}

fn descend(
    grid: &Grid,
    current: usize,
    goal: usize,
    remaining: usize,
    visited: &mut [bool],
    path: &mut Vec<usize>,
) -> bool {
    if current == goal {
        return true;
    }
    if remaining == 0 {
        return false;
    }
    for next in neighbor_indices(grid, current) {
        if visited[next] {
            continue;
        }
        visited[next] = true;
        path.push(next);
        if descend(grid, next, goal, remaining - 1, visited, path) {
            return true;
        }
        path.pop();
        visited[next] = false;
    }
    false
}
