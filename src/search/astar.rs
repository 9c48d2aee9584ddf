//! A*, weighted A*, and greedy best-first search.

use log::debug;

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::{neighbor_indices, reconstruct_path, MinQueue, Solver, NO_PARENT};

/// A* with the Manhattan heuristic.
///
/// Manhattan distance is admissible for 4-connected movement where every
/// step costs at least 1, so the returned path has minimum cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl Solver for AStar {
    fn algorithm_name(&self) -> &str {
        "A* Search"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        heuristic_search(grid, 1.0)
    }
}

/// A* with the heuristic scaled by `factor > 1`.
///
/// Expands fewer cells than [`AStar`] but the result is only approximately
/// minimal: its cost is bounded by `factor` times the optimum.
#[derive(Debug, Clone, Copy)]
pub struct WeightedAStar {
    factor: f64,
}

impl WeightedAStar {
    /// Default heuristic inflation.
    pub const DEFAULT_FACTOR: f64 = 1.5;

    /// Creates a weighted A* solver.
    ///
    /// # Panics
    ///
    /// If `factor` is not a finite value greater than 1.
    pub fn new(factor: f64) -> Self {
        assert!(
            factor.is_finite() && factor > 1.0,
            "weighted A* factor must be > 1, got {factor}"
        );
        Self { factor }
    }

    /// Heuristic inflation factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Default for WeightedAStar {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FACTOR)
    }
}

impl Solver for WeightedAStar {
    fn algorithm_name(&self) -> &str {
        "Weighted A* Search"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        heuristic_search(grid, self.factor)
    }
}

fn heuristic_search(grid: &Grid, weight: f64) -> Result<Vec<Coordinate>, SolveError> {
    let n = grid.cell_count();
    let goal_at = grid.goal();
    let start = grid.index(grid.start());
    let goal = grid.index(goal_at);
    let h = |i: usize| weight * f64::from(grid.coordinate(i).manhattan(goal_at));

    let mut g = vec![u64::MAX; n];
    let mut parents = vec![NO_PARENT; n];
    let mut closed = vec![false; n];
    let mut open = MinQueue::new();
    g[start] = 0;
    open.push(h(start), start);

    let mut expansions = 0usize;
    while let Some(entry) = open.pop() {
        let current = entry.index;
        if closed[current] {
            continue;
        }
        closed[current] = true;
        if current == goal {
            debug!("a* (w={weight}) reached goal after {expansions} expansions");
            return Ok(reconstruct_path(grid, &parents, current));
        }
        expansions += 1;
        for next in neighbor_indices(grid, current) {
            if closed[next] {
                continue;
            }
            let tentative = g[current] + u64::from(grid.cell_at(next).step_cost());
            if tentative < g[next] {
                g[next] = tentative;
                parents[next] = current;
                open.push(tentative as f64 + h(next), next);
            }
        }
    }

    debug!("a* (w={weight}) exhausted after {expansions} expansions");
    Err(SolveError::no_path())
}

/// Greedy best-first search ordered by Manhattan distance alone.
///
/// Fast, but makes no cost guarantee. A cell's parent is fixed the first
/// time it is discovered.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFirst;

impl Solver for BestFirst {
    fn algorithm_name(&self) -> &str {
        "Best-First Search (Greedy)"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let n = grid.cell_count();
        let goal_at = grid.goal();
        let start = grid.index(grid.start());
        let goal = grid.index(goal_at);
        let h = |i: usize| f64::from(grid.coordinate(i).manhattan(goal_at));

        let mut parents = vec![NO_PARENT; n];
        let mut discovered = vec![false; n];
        let mut open = MinQueue::new();
        discovered[start] = true;
        open.push(h(start), start);

        while let Some(entry) = open.pop() {
            let current = entry.index;
            if current == goal {
                return Ok(reconstruct_path(grid, &parents, current));
            }
            for next in neighbor_indices(grid, current) {
                if !discovered[next] {
                    discovered[next] = true;
                    parents[next] = current;
                    open.push(h(next), next);
                }
            }
        }

        Err(SolveError::no_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;
    use crate::search::Dijkstra;
    use crate::solver::reaches_goal;

    fn grids() -> Vec<Grid> {
        vec![
            fixtures::open_3x3(),
            fixtures::weighted_maze(),
            fixtures::open_room(),
            fixtures::serpentine(),
        ]
    }

    #[test]
    fn test_astar_is_optimal() {
        for grid in grids() {
            let expected = Dijkstra.solve(&grid).unwrap().total_cost;
            let result = AStar.solve(&grid).unwrap();
            assert!(reaches_goal(&grid, &result.path));
            assert_eq!(result.total_cost, expected, "A* on {}", grid.name());
        }
    }

    #[test]
    fn test_open_3x3_scenario() {
        let result = AStar.solve(&fixtures::open_3x3()).unwrap();
        assert_eq!(result.path.len(), 5);
        assert_eq!(result.total_cost, 5);
    }

    #[test]
    fn test_weighted_astar_bounded() {
        let solver = WeightedAStar::default();
        assert_eq!(solver.factor(), 1.5);
        for grid in grids() {
            let optimum = Dijkstra.solve(&grid).unwrap().total_cost as f64;
            let result = solver.solve(&grid).unwrap();
            assert!(reaches_goal(&grid, &result.path));
            assert!(
                result.total_cost as f64 <= optimum * solver.factor() + 1.0,
                "weighted A* cost {} vs optimum {optimum} on {}",
                result.total_cost,
                grid.name()
            );
        }
    }

    #[test]
    #[should_panic(expected = "factor must be > 1")]
    fn test_weighted_astar_rejects_small_factor() {
        WeightedAStar::new(1.0);
    }

    #[test]
    fn test_best_first_valid() {
        for grid in grids() {
            let path = BestFirst.search(&grid).unwrap();
            assert!(reaches_goal(&grid, &path), "best-first on {}", grid.name());
        }
    }

    #[test]
    fn test_blocked_and_trivial() {
        let blocked = fixtures::blocked_1x3();
        let trivial = fixtures::start_is_goal();
        for solver in [
            &AStar as &dyn Solver,
            &WeightedAStar::default(),
            &BestFirst,
        ] {
            assert!(matches!(solver.search(&blocked), Err(SolveError::NoPath(_))));
            let result = solver.solve(&trivial).unwrap();
            assert_eq!(result.path, vec![trivial.start()]);
            assert_eq!(result.total_cost, 3);
        }
    }
}
