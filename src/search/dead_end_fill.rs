//! Dead-end filling.

use std::collections::VecDeque;

use log::debug;

use super::bfs::breadth_first;
use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::{neighbor_indices, Solver};

/// Prunes dead ends to a fixed point, then runs BFS on what is left.
///
/// An open cell other than start or goal with at most one open neighbor
/// cannot be the interior of a simple start-goal path, so removing it never
/// disconnects the endpoints. Removal can turn its neighbor into a new dead
/// end, which is queued in turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadEndFill;

impl Solver for DeadEndFill {
    fn algorithm_name(&self) -> &str {
        "Dead-End Fill"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        if grid.start() != grid.goal()
            && neighbor_indices(grid, grid.index(grid.start())).next().is_none()
        {
            return Err(SolveError::Trapped(
                "starting position is enclosed by walls".into(),
            ));
        }

        let open = fill_dead_ends(grid);
        breadth_first(grid, &open).ok_or_else(SolveError::no_path)
    }
}

/// Walkability mask with every removable dead end cleared.
pub(crate) fn fill_dead_ends(grid: &Grid) -> Vec<bool> {
    let n = grid.cell_count();
    let start = grid.index(grid.start());
    let goal = grid.index(grid.goal());
    let mut open: Vec<bool> = (0..n).map(|i| grid.cell_at(i).is_walkable()).collect();

    let degree = |open: &[bool], i: usize| neighbor_indices(grid, i).filter(|&j| open[j]).count();
    let pinned = |i: usize| i == start || i == goal;

    let mut queue: VecDeque<usize> = (0..n)
        .filter(|&i| open[i] && !pinned(i) && degree(&open, i) <= 1)
        .collect();

    let mut filled = 0usize;
    while let Some(cell) = queue.pop_front() {
        if !open[cell] || degree(&open, cell) > 1 {
            continue;
        }
        open[cell] = false;
        filled += 1;
        for next in neighbor_indices(grid, cell) {
            if open[next] && !pinned(next) && degree(&open, next) <= 1 {
                queue.push_back(next);
            }
        }
    }

    debug!("dead-end fill removed {filled} cells from '{}'", grid.name());
    open
}
