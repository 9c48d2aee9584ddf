//! Dijkstra's algorithm.

use log::debug;

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::{neighbor_indices, reconstruct_path, MinQueue, Solver, NO_PARENT};

/// Minimum-cost path with a binary heap and lazy deletion.
///
/// Distances count the cost of every entered cell; the start cell's own
/// cost is added back by [`Solver::solve`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl Solver for Dijkstra {
    fn algorithm_name(&self) -> &str {
        "Dijkstra's Algorithm"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let n = grid.cell_count();
        let start = grid.index(grid.start());
        let goal = grid.index(grid.goal());

        let mut dist = vec![u64::MAX; n];
        let mut parents = vec![NO_PARENT; n];
        let mut closed = vec![false; n];
        let mut open = MinQueue::new();
        dist[start] = 0;
        open.push(0.0, start);

        while let Some(entry) = open.pop() {
            let current = entry.index;
            if closed[current] {
                continue;
            }
            closed[current] = true;
            if current == goal {
                return Ok(reconstruct_path(grid, &parents, current));
            }
            for next in neighbor_indices(grid, current) {
                if closed[next] {
                    continue;
                }
                let candidate = dist[current] + u64::from(grid.cell_at(next).step_cost());
                if candidate < dist[next] {
                    dist[next] = candidate;
                    parents[next] = current;
                    open.push(candidate as f64, next);
                }
            }
        }

        debug!("dijkstra exhausted on '{}'", grid.name());
        Err(SolveError::no_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;
    use crate::solver::reaches_goal;

    #[test]
    fn test_open_3x3() {
        let grid = fixtures::open_3x3();
        let result = Dijkstra.solve(&grid).unwrap();
        assert_eq!(result.path.len(), 5);
        assert_eq!(result.total_cost, 5);
    }

    #[test]
    fn test_avoids_heavy_cell() {
        let grid = fixtures::weighted_maze();
        let result = Dijkstra.solve(&grid).unwrap();
        assert!(reaches_goal(&grid, &result.path));
        assert_eq!(result.total_cost, 21);
        assert!(!result.path.contains(&Coordinate::new(2, 4)));
    }

    #[test]
    fn test_blocked() {
        assert!(matches!(
            Dijkstra.solve(&fixtures::blocked_1x3()),
            Err(SolveError::NoPath(_))
        ));
    }
}
