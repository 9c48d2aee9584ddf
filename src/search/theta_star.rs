//! Theta*: any-angle A* with path pulling.

use log::debug;

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::{neighbor_indices, MinQueue, Solver, NO_PARENT};

/// Any-angle search over grid cells.
///
/// Expansion follows A*, but a neighbor may take the current cell's parent
/// as its own parent when the two see each other. Sight lines are sampled
/// once per unit along the longer axis and each sample is rounded to the
/// nearest cell, so a line that clips the corner of a wall cell can pass
/// without sampling it.
///
/// The returned path lists every sampled cell along each pulled segment, so
/// consecutive cells may be diagonal neighbors. All listed cells are
/// walkable and its cost is the sampled cost along the segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThetaStar;

impl Solver for ThetaStar {
    fn algorithm_name(&self) -> &str {
        "Theta* (Any-Angle A*)"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let n = grid.cell_count();
        let goal_at = grid.goal();
        let start = grid.index(grid.start());
        let goal = grid.index(goal_at);
        let h = |i: usize| f64::from(grid.coordinate(i).manhattan(goal_at));

        let mut g = vec![f64::INFINITY; n];
        let mut parents = vec![NO_PARENT; n];
        let mut closed = vec![false; n];
        let mut open = MinQueue::new();
        g[start] = 0.0;
        open.push(h(start), start);

        let mut expansions = 0usize;
        while let Some(entry) = open.pop() {
            let current = entry.index;
            if closed[current] {
                continue;
            }
            closed[current] = true;
            if current == goal {
                debug!("theta* reached goal after {expansions} expansions");
                return Ok(densify(grid, &parents, goal));
            }
            expansions += 1;

            let grandparent = parents[current];
            for next in neighbor_indices(grid, current) {
                if closed[next] {
                    continue;
                }
                let to = grid.coordinate(next);
                let mut best_parent = current;
                let mut best_g = g[current] + f64::from(grid.cell_at(next).step_cost());

                if grandparent != NO_PARENT {
                    let anchor = grid.coordinate(grandparent);
                    if line_of_sight(grid, anchor, to) {
                        let pulled = g[grandparent] + line_cost(grid, anchor, to);
                        if pulled <= best_g {
                            best_parent = grandparent;
                            best_g = pulled;
                        }
                    }
                }

                if best_g < g[next] {
                    g[next] = best_g;
                    parents[next] = best_parent;
                    open.push(best_g + h(next), next);
                }
            }
        }

        debug!("theta* exhausted after {expansions} expansions");
        Err(SolveError::no_path())
    }
}

/// Rounds halves upward, so `-0.5` becomes `0` and `0.5` becomes `1`.
fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}

/// Cells sampled along the segment `from -> to`, excluding `from`.
fn samples(from: Coordinate, to: Coordinate) -> impl Iterator<Item = Coordinate> {
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;
    let steps = d_row.abs().max(d_col.abs());
    let step_row = if steps == 0 { 0.0 } else { f64::from(d_row) / f64::from(steps) };
    let step_col = if steps == 0 { 0.0 } else { f64::from(d_col) / f64::from(steps) };
    (1..=steps).map(move |i| {
        let i = f64::from(i);
        Coordinate::new(
            round_half_up(f64::from(from.row) + i * step_row),
            round_half_up(f64::from(from.col) + i * step_col),
        )
    })
}

/// True when every interior sample between the endpoints is walkable.
pub(crate) fn line_of_sight(grid: &Grid, from: Coordinate, to: Coordinate) -> bool {
    samples(from, to)
        .filter(|&c| c != to)
        .all(|c| grid.is_walkable(c))
}

/// Sum of step costs over the samples of `from -> to`, `to` included.
fn line_cost(grid: &Grid, from: Coordinate, to: Coordinate) -> f64 {
    samples(from, to)
        .filter_map(|c| grid.cell(c))
        .map(|cell| f64::from(cell.step_cost()))
        .sum()
}

/// Expands the waypoint chain ending at `target` into sampled cells.
fn densify(grid: &Grid, parents: &[usize], target: usize) -> Vec<Coordinate> {
    let mut waypoints = Vec::new();
    let mut current = target;
    while current != NO_PARENT {
        waypoints.push(grid.coordinate(current));
        current = parents[current];
    }
    waypoints.reverse();

    let mut path = Vec::with_capacity(waypoints.len());
    if let Some(&head) = waypoints.first() {
        path.push(head);
    }
    for pair in waypoints.windows(2) {
        path.extend(samples(pair[0], pair[1]));
    }
    path
}
