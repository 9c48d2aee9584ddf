//! Bellman-Ford and SPFA.

use std::collections::VecDeque;

use log::debug;

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::{neighbor_indices, reconstruct_path, Solver, NO_PARENT};

/// Full edge-relaxation sweeps, at most `cells - 1` of them.
///
/// Stops early once a sweep relaxes nothing. Weights are always positive,
/// so no negative-cycle check is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellmanFord;

impl Solver for BellmanFord {
    fn algorithm_name(&self) -> &str {
        "Bellman-Ford"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let n = grid.cell_count();
        let start = grid.index(grid.start());
        let goal = grid.index(grid.goal());

        let mut dist = vec![u64::MAX; n];
        let mut parents = vec![NO_PARENT; n];
        dist[start] = 0;

        let mut passes = 0;
        for _ in 1..n.max(2) {
            passes += 1;
            let mut relaxed = false;
            for u in 0..n {
                if dist[u] == u64::MAX {
                    continue;
                }
                for v in neighbor_indices(grid, u) {
                    let candidate = dist[u] + u64::from(grid.cell_at(v).step_cost());
                    if candidate < dist[v] {
                        dist[v] = candidate;
                        parents[v] = u;
                        relaxed = true;
                    }
                }
            }
            if !relaxed {
                break;
            }
        }
        debug!("bellman-ford settled after {passes} passes");

        if dist[goal] == u64::MAX {
            return Err(SolveError::no_path());
        }
        Ok(reconstruct_path(grid, &parents, goal))
    }
}

/// Queue-based Bellman-Ford ("Shortest Path Faster Algorithm").
///
/// A cell is re-enqueued whenever its distance drops and it is not already
/// queued.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spfa;

impl Solver for Spfa {
    fn algorithm_name(&self) -> &str {
        "SPFA (Shortest Path Faster Algorithm)"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let n = grid.cell_count();
        let start = grid.index(grid.start());
        let goal = grid.index(grid.goal());

        let mut dist = vec![u64::MAX; n];
        let mut parents = vec![NO_PARENT; n];
        let mut queued = vec![false; n];
        let mut queue = VecDeque::new();
        dist[start] = 0;
        queue.push_back(start);
        queued[start] = true;

        let mut pops = 0usize;
        while let Some(u) = queue.pop_front() {
            queued[u] = false;
            pops += 1;
            for v in neighbor_indices(grid, u) {
                let candidate = dist[u] + u64::from(grid.cell_at(v).step_cost());
                if candidate < dist[v] {
                    dist[v] = candidate;
                    parents[v] = u;
                    if !queued[v] {
                        queued[v] = true;
                        queue.push_back(v);
                    }
                }
            }
        }
        debug!("spfa settled after {pops} dequeues");

        if dist[goal] == u64::MAX {
            return Err(SolveError::no_path());
        }
        Ok(reconstruct_path(grid, &parents, goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;
    use crate::search::Dijkstra;
    use crate::solver::reaches_goal;

    #[test]
    fn test_costs_match_dijkstra() {
        for grid in [
            fixtures::open_3x3(),
            fixtures::weighted_maze(),
            fixtures::open_room(),
            fixtures::serpentine(),
        ] {
            let expected = Dijkstra.solve(&grid).unwrap().total_cost;
            for solver in [&BellmanFord as &dyn Solver, &Spfa] {
                let result = solver.solve(&grid).unwrap();
                assert!(reaches_goal(&grid, &result.path));
                assert_eq!(
                    result.total_cost,
                    expected,
                    "{} on {}",
                    solver.algorithm_name(),
                    grid.name()
                );
            }
        }
    }

    #[test]
    fn test_blocked_and_trivial() {
        assert!(BellmanFord.search(&fixtures::blocked_1x3()).is_err());
        assert!(Spfa.search(&fixtures::blocked_1x3()).is_err());

        let grid = fixtures::start_is_goal();
        assert_eq!(BellmanFord.search(&grid).unwrap(), vec![grid.start()]);
        assert_eq!(Spfa.search(&grid).unwrap(), vec![grid.start()]);
    }
}
