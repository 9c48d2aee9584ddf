//! Bidirectional BFS and Dijkstra.
//!
//! Both run one frontier from the start and one from the goal and stitch
//! the two parent chains together at the best meeting cell.

use std::collections::VecDeque;

use log::debug;

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::{neighbor_indices, reconstruct_path, MinQueue, Solver, NO_PARENT};

/// Start-to-meeting chain from `forward`, then meeting-to-goal from
/// `backward` parents (which point toward the goal).
fn stitch(grid: &Grid, forward: &[usize], backward: &[usize], meeting: usize) -> Vec<Coordinate> {
    let mut path = reconstruct_path(grid, forward, meeting);
    let mut current = backward[meeting];
    while current != NO_PARENT {
        path.push(grid.coordinate(current));
        current = backward[current];
    }
    path
}

/// Two BFS frontiers advanced one full layer at a time, alternating sides.
///
/// When a layer touches cells already seen by the other side, the meeting
/// with the smallest combined depth within that layer is used, which gives
/// the same path length as [`Bfs`](super::Bfs).
#[derive(Debug, Clone, Copy, Default)]
pub struct BidirectionalBfs;

struct Side {
    depth: Vec<usize>,
    parents: Vec<usize>,
    frontier: VecDeque<usize>,
}

impl Side {
    fn new(n: usize, root: usize) -> Self {
        let mut depth = vec![usize::MAX; n];
        depth[root] = 0;
        Self {
            depth,
            parents: vec![NO_PARENT; n],
            frontier: VecDeque::from([root]),
        }
    }

    /// Expands the whole current layer. Returns the best `(total, meeting)`
    /// against `other`, if any.
    fn expand_layer(&mut self, grid: &Grid, other: &Side) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for _ in 0..self.frontier.len() {
            let Some(current) = self.frontier.pop_front() else {
                break;
            };
            for next in neighbor_indices(grid, current) {
                if self.depth[next] != usize::MAX {
                    continue;
                }
                self.depth[next] = self.depth[current] + 1;
                self.parents[next] = current;
                self.frontier.push_back(next);
                if other.depth[next] != usize::MAX {
                    let total = self.depth[next] + other.depth[next];
                    if best.map_or(true, |(b, _)| total < b) {
                        best = Some((total, next));
                    }
                }
            }
        }
        best
    }
}

impl Solver for BidirectionalBfs {
    fn algorithm_name(&self) -> &str {
        "Bidirectional BFS"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let n = grid.cell_count();
        let start = grid.index(grid.start());
        let goal = grid.index(grid.goal());
        if start == goal {
            return Ok(vec![grid.start()]);
        }

        let mut forward = Side::new(n, start);
        let mut backward = Side::new(n, goal);
        let mut forward_turn = true;

        while !forward.frontier.is_empty() && !backward.frontier.is_empty() {
            let meeting = if forward_turn {
                forward.expand_layer(grid, &backward)
            } else {
                backward.expand_layer(grid, &forward)
            };
            if let Some((total, at)) = meeting {
                debug!("bidirectional bfs met at {} (depth {total})", grid.coordinate(at));
                return Ok(stitch(grid, &forward.parents, &backward.parents, at));
            }
            forward_turn = !forward_turn;
        }

        Err(SolveError::no_path())
    }
}

/// Two Dijkstra frontiers, one pop per side per round.
///
/// Every time a relaxation gives a cell finite distances from both sides,
/// `forward + backward` is a candidate. The search stops once the two
/// smallest open keys together can no longer beat the best candidate, so the
/// result has the same cost as [`Dijkstra`](super::Dijkstra).
///
/// Forward distance counts entered cells after the start; backward distance
/// counts cells after the given cell up to and including the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BidirectionalDijkstra;

impl Solver for BidirectionalDijkstra {
    fn algorithm_name(&self) -> &str {
        "Bidirectional Dijkstra"
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let n = grid.cell_count();
        let start = grid.index(grid.start());
        let goal = grid.index(grid.goal());
        if start == goal {
            return Ok(vec![grid.start()]);
        }
        let cost = |i: usize| u64::from(grid.cell_at(i).step_cost());

        let mut dist_f = vec![u64::MAX; n];
        let mut dist_b = vec![u64::MAX; n];
        let mut parent_f = vec![NO_PARENT; n];
        let mut parent_b = vec![NO_PARENT; n];
        let mut closed_f = vec![false; n];
        let mut closed_b = vec![false; n];
        let mut open_f = MinQueue::new();
        let mut open_b = MinQueue::new();
        dist_f[start] = 0;
        dist_b[goal] = 0;
        open_f.push(0.0, start);
        open_b.push(0.0, goal);

        let mut best = u64::MAX;
        let mut meeting = NO_PARENT;
        let mut rounds = 0usize;

        while !open_f.is_empty() && !open_b.is_empty() {
            if let (Some(top_f), Some(top_b)) = (open_f.peek_key(), open_b.peek_key()) {
                if best != u64::MAX && top_f + top_b >= best as f64 {
                    break;
                }
            }
            rounds += 1;

            if let Some(entry) = open_f.pop() {
                let u = entry.index;
                if !closed_f[u] {
                    closed_f[u] = true;
                    for v in neighbor_indices(grid, u) {
                        let candidate = dist_f[u] + cost(v);
                        if candidate < dist_f[v] {
                            dist_f[v] = candidate;
                            parent_f[v] = u;
                            open_f.push(candidate as f64, v);
                        }
                        if dist_b[v] != u64::MAX && dist_f[v] + dist_b[v] < best {
                            best = dist_f[v] + dist_b[v];
                            meeting = v;
                        }
                    }
                }
            }

            if let Some(entry) = open_b.pop() {
                let u = entry.index;
                if !closed_b[u] {
                    closed_b[u] = true;
                    for v in neighbor_indices(grid, u) {
                        let candidate = dist_b[u] + cost(u);
                        if candidate < dist_b[v] {
                            dist_b[v] = candidate;
                            parent_b[v] = u;
                            open_b.push(candidate as f64, v);
                        }
                        if dist_f[v] != u64::MAX && dist_f[v] + dist_b[v] < best {
                            best = dist_f[v] + dist_b[v];
                            meeting = v;
                        }
                    }
                }
            }
        }

        if meeting == NO_PARENT {
            debug!("bidirectional dijkstra exhausted after {rounds} rounds");
            return Err(SolveError::no_path());
        }
        debug!(
            "bidirectional dijkstra met at {} (cost {best}) after {rounds} rounds",
            grid.coordinate(meeting)
        );
        Ok(stitch(grid, &parent_f, &parent_b, meeting))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;
    use crate::search::{Bfs, Dijkstra};
    use crate::solver::reaches_goal;

    fn grids() -> Vec<Grid> {
        vec![
            fixtures::open_3x3(),
            fixtures::weighted_maze(),
            fixtures::open_room(),
            fixtures::serpentine(),
            Grid::from_ascii("adjacent", "SG").unwrap(),
        ]
    }

    #[test]
    fn test_bfs_matches_unidirectional_length() {
        for grid in grids() {
            let path = BidirectionalBfs.search(&grid).unwrap();
            assert!(reaches_goal(&grid, &path), "invalid path on {}", grid.name());
            assert_eq!(path.len(), Bfs.search(&grid).unwrap().len(), "{}", grid.name());
        }
    }

    #[test]
    fn test_dijkstra_matches_unidirectional_cost() {
        for grid in grids() {
            let result = BidirectionalDijkstra.solve(&grid).unwrap();
            assert!(reaches_goal(&grid, &result.path), "invalid path on {}", grid.name());
            assert_eq!(
                result.total_cost,
                Dijkstra.solve(&grid).unwrap().total_cost,
                "{}",
                grid.name()
            );
        }
    }

    #[test]
    fn test_dijkstra_keeps_cheapest_meeting() {
        // The straight corridor through the 9 meets first; the detour is cheaper.
        let grid = Grid::from_ascii("detour", "S9G\n...").unwrap();
        let result = BidirectionalDijkstra.solve(&grid).unwrap();
        assert_eq!(result.total_cost, 5);
        assert!(!result.path.contains(&Coordinate::new(0, 1)));
    }

    #[test]
    fn test_blocked_and_trivial() {
        let blocked = fixtures::blocked_1x3();
        let trivial = fixtures::start_is_goal();
        for solver in [&BidirectionalBfs as &dyn Solver, &BidirectionalDijkstra] {
            assert!(matches!(solver.search(&blocked), Err(SolveError::NoPath(_))));
            let result = solver.solve(&trivial).unwrap();
            assert_eq!(result.path, vec![trivial.start()]);
            assert_eq!(result.total_cost, 3);
        }
    }
}
