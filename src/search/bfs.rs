//! Breadth-first search.

use std::collections::VecDeque;

use log::debug;

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::{neighbor_indices, reconstruct_path, Solver, NO_PARENT};

/// Unweighted shortest path by FIFO expansion.
///
/// The first time the goal is dequeued its path has the fewest cells.
/// Step costs are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl Solver for Bfs {
    fn algorithm_name(&self) -> &str {
        "BFS (Breadth-First Search)"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let open: Vec<bool> = (0..grid.cell_count())
            .map(|i| grid.cell_at(i).is_walkable())
            .collect();
        breadth_first(grid, &open).ok_or_else(SolveError::no_path)
    }
}

/// BFS from start to goal restricted to cells with `open[i] == true`.
pub(crate) fn breadth_first(grid: &Grid, open: &[bool]) -> Option<Vec<Coordinate>> {
    let n = grid.cell_count();
    let start = grid.index(grid.start());
    let goal = grid.index(grid.goal());

    let mut parents = vec![NO_PARENT; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(start);

    let mut expansions = 0usize;
    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(reconstruct_path(grid, &parents, current));
        }
        expansions += 1;
        for next in neighbor_indices(grid, current) {
            if open[next] && !visited[next] {
                visited[next] = true;
                parents[next] = current;
                queue.push_back(next);
            }
        }
    }

    debug!("bfs exhausted after {expansions} expansions");
    None
}
