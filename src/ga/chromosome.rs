//! Path chromosomes and the repair routine that keeps them valid.

use std::collections::HashSet;

use super::bridge::{bridge, repair_depth};
use crate::grid::{Coordinate, Grid};
use crate::solver::{is_valid_path, reaches_goal, walkable_neighbors};

/// Largest ring radius probed when substituting a waypoint.
const SUBSTITUTE_RADIUS: i32 = 5;

/// A candidate path: an ordered sequence of waypoints.
///
/// Raw chromosomes produced by operators may contain gaps, walls, or
/// out-of-bounds cells. [`repair`](Self::repair) turns any chromosome into a
/// valid start-first path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathChromosome {
    genes: Vec<Coordinate>,
}

impl PathChromosome {
    /// Wraps a waypoint list as-is.
    pub fn new(genes: Vec<Coordinate>) -> Self {
        Self { genes }
    }

    /// The waypoints.
    pub fn genes(&self) -> &[Coordinate] {
        &self.genes
    }

    /// Consumes the chromosome, returning its waypoints.
    pub fn into_genes(self) -> Vec<Coordinate> {
        self.genes
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether there are no waypoints.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Last waypoint, if any.
    pub fn last(&self) -> Option<Coordinate> {
        self.genes.last().copied()
    }

    /// Whether every waypoint is walkable and consecutive ones are adjacent.
    pub fn is_valid(&self, grid: &Grid) -> bool {
        is_valid_path(grid, &self.genes)
    }

    /// Whether this is a valid path from start to goal.
    pub fn reaches_goal(&self, grid: &Grid) -> bool {
        reaches_goal(grid, &self.genes)
    }

    /// Rebuilds the chromosome as a valid path from the grid's start.
    ///
    /// The head is forced to the start. Each later waypoint is kept when it
    /// is walkable and adjacent to the path so far; otherwise the gap is
    /// bridged with a bounded A* (falling back to a straight walk), or the
    /// waypoint is swapped for the nearest walkable cell, or dropped. The
    /// result is cut at the first goal visit and then extended toward the
    /// goal.
    ///
    /// The output always starts at the start, is always valid, and repairing
    /// it again returns it unchanged.
    pub fn repair(&self, grid: &Grid) -> PathChromosome {
        let start = grid.start();
        let goal = grid.goal();
        let depth = repair_depth(grid);
        let mut path = vec![start];

        for &target in self.genes.iter().skip(1) {
            let tail = path[path.len() - 1];
            if tail == goal {
                break;
            }
            if target == tail {
                continue;
            }
            if tail.is_adjacent(target) && grid.is_walkable(target) {
                path.push(target);
                continue;
            }
            if let Some(segment) = bridge(grid, tail, target, depth) {
                path.extend_from_slice(&segment[1..]);
                continue;
            }
            let Some(substitute) = nearest_walkable(grid, target) else {
                continue;
            };
            if substitute == tail {
                continue;
            }
            if tail.is_adjacent(substitute) {
                path.push(substitute);
            } else if let Some(segment) = bridge(grid, tail, substitute, depth) {
                path.extend_from_slice(&segment[1..]);
            }
        }

        if let Some(at) = path.iter().position(|&c| c == goal) {
            path.truncate(at + 1);
        }

        PathChromosome::new(path).extend_toward_goal(grid)
    }

    /// Greedily appends steps toward the goal.
    ///
    /// Stops at the goal, when the path reaches
    /// `clamp(3 * manhattan(tail, goal), 50, 500)` cells, or when the tail
    /// has no walkable neighbor. Unvisited neighbors closest to the goal are
    /// preferred; if all are visited any walkable neighbor is taken.
    pub fn extend_toward_goal(&self, grid: &Grid) -> PathChromosome {
        let goal = grid.goal();
        let mut genes = if self.genes.is_empty() {
            vec![grid.start()]
        } else {
            self.genes.clone()
        };
        let mut visited: HashSet<Coordinate> = genes.iter().copied().collect();

        while let Some(&tail) = genes.last() {
            if tail == goal || genes.len() >= extension_limit(tail, goal) {
                break;
            }
            let next = walkable_neighbors(grid, tail)
                .filter(|n| !visited.contains(n))
                .min_by_key(|n| n.manhattan(goal))
                .or_else(|| walkable_neighbors(grid, tail).min_by_key(|n| n.manhattan(goal)));
            let Some(next) = next else {
                break;
            };
            genes.push(next);
            visited.insert(next);
        }

        PathChromosome::new(genes)
    }
}

impl From<Vec<Coordinate>> for PathChromosome {
    fn from(genes: Vec<Coordinate>) -> Self {
        Self::new(genes)
    }
}

fn extension_limit(tail: Coordinate, goal: Coordinate) -> usize {
    (3 * tail.manhattan(goal) as usize).clamp(50, 500)
}

/// Closest walkable cell within a Manhattan ring of radius 1 to 5.
///
/// Rings are probed outward; within a ring, rows before columns, each
/// ascending.
pub(crate) fn nearest_walkable(grid: &Grid, target: Coordinate) -> Option<Coordinate> {
    (1..=SUBSTITUTE_RADIUS).find_map(|radius| {
        (-radius..=radius).find_map(|dr| {
            (-radius..=radius)
                .filter(|dc| dr.abs() + dc.abs() == radius)
                .map(|dc| target.offset(dr, dc))
                .find(|&c| grid.is_walkable(c))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;
    use proptest::prelude::*;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    // ---- Basic accessors ----

    #[test]
    fn test_accessors() {
        let chromosome = PathChromosome::from(vec![c(0, 0), c(0, 1)]);
        assert_eq!(chromosome.len(), 2);
        assert!(!chromosome.is_empty());
        assert_eq!(chromosome.last(), Some(c(0, 1)));
        assert_eq!(chromosome.genes(), &[c(0, 0), c(0, 1)]);
        assert!(PathChromosome::default().is_empty());
    }

    // ---- Repair ----

    #[test]
    fn test_repair_forces_start_and_fills_gaps() {
        let grid = fixtures::open_room();
        let raw = PathChromosome::new(vec![c(5, 5), c(0, 4), c(3, 0)]);
        let repaired = raw.repair(&grid);
        assert_eq!(repaired.genes()[0], grid.start());
        assert!(repaired.is_valid(&grid));
        assert!(repaired.genes().contains(&c(0, 4)));
        assert!(repaired.genes().contains(&c(3, 0)));
    }

    #[test]
    fn test_repair_keeps_valid_goal_path() {
        let grid = fixtures::open_3x3();
        let genes = vec![c(0, 0), c(0, 1), c(0, 2), c(1, 2), c(2, 2)];
        let repaired = PathChromosome::new(genes.clone()).repair(&grid);
        assert_eq!(repaired.genes(), genes.as_slice());
    }

    #[test]
    fn test_repair_truncates_after_goal() {
        let grid = fixtures::open_3x3();
        let genes = vec![c(0, 0), c(1, 0), c(2, 0), c(2, 1), c(2, 2), c(1, 2)];
        let repaired = PathChromosome::new(genes).repair(&grid);
        assert_eq!(repaired.last(), Some(grid.goal()));
        assert_eq!(repaired.len(), 5);
        assert!(repaired.reaches_goal(&grid));
    }

    #[test]
    fn test_repair_substitutes_walls() {
        let grid = fixtures::weighted_maze();
        // (1,1) is a wall next to the start
        let repaired = PathChromosome::new(vec![c(0, 0), c(1, 1)]).repair(&grid);
        assert!(repaired.is_valid(&grid));
        assert!(!repaired.genes().contains(&c(1, 1)));
    }

    #[test]
    fn test_repair_empty_extends_from_start() {
        let grid = fixtures::open_3x3();
        let repaired = PathChromosome::default().repair(&grid);
        assert!(repaired.reaches_goal(&grid));
        assert_eq!(repaired.len(), 5);
    }

    #[test]
    fn test_repair_enclosed_start() {
        let grid = fixtures::blocked_1x3();
        let repaired = PathChromosome::new(vec![c(0, 0), c(0, 1), c(0, 2)]).repair(&grid);
        assert_eq!(repaired.genes(), &[grid.start()]);
    }

    #[test]
    fn test_repair_start_is_goal() {
        let grid = fixtures::start_is_goal();
        let repaired = PathChromosome::new(vec![c(0, 0), c(0, 1), c(1, 1)]).repair(&grid);
        assert_eq!(repaired.genes(), &[grid.start()]);
    }

    #[test]
    fn test_repair_out_of_bounds_waypoints() {
        let grid = fixtures::open_3x3();
        let raw = PathChromosome::new(vec![c(-4, 9), c(10, 10), c(-1, 1)]);
        let repaired = raw.repair(&grid);
        assert!(repaired.is_valid(&grid));
        assert_eq!(repaired.genes()[0], grid.start());
    }

    // ---- Extension ----

    #[test]
    fn test_extend_walks_to_goal() {
        let grid = fixtures::open_room();
        let extended = PathChromosome::new(vec![grid.start()]).extend_toward_goal(&grid);
        assert!(extended.reaches_goal(&grid));
        assert_eq!(extended.len(), 23);
    }

    #[test]
    fn test_extend_stops_on_dead_end() {
        let grid = fixtures::blocked_1x3();
        let extended = PathChromosome::new(vec![grid.start()]).extend_toward_goal(&grid);
        assert_eq!(extended.len(), 1);
    }

    #[test]
    fn test_extend_respects_length_cap() {
        // the goal is walled off, so greedy steps wander until the cap
        let grid = Grid::from_ascii(
            "sealed",
            "\
S..........
...........
...........
.........##
.........#G",
        )
        .unwrap();
        let extended = PathChromosome::new(vec![grid.start()]).extend_toward_goal(&grid);
        assert!(extended.len() <= 50);
        assert!(extended.is_valid(&grid));
        assert!(!extended.reaches_goal(&grid));
    }

    // ---- Substitution ----

    #[test]
    fn test_nearest_walkable_ring_order() {
        let grid = fixtures::open_3x3();
        // radius 1 around (1,1), dr = -1 first
        assert_eq!(nearest_walkable(&grid, c(1, 1)), Some(c(0, 1)));
        assert_eq!(nearest_walkable(&grid, c(-3, 0)), Some(c(0, 0)));
        assert_eq!(nearest_walkable(&grid, c(40, 40)), None);
    }

    // ---- Properties ----

    proptest! {
        #[test]
        fn prop_repair_is_valid_and_idempotent(
            raw in prop::collection::vec((-2i32..14, -2i32..14), 0..30)
        ) {
            let grid = fixtures::open_room();
            let genes: Vec<Coordinate> = raw.into_iter().map(Coordinate::from).collect();
            let once = PathChromosome::new(genes).repair(&grid);
            prop_assert!(once.is_valid(&grid));
            prop_assert_eq!(once.genes()[0], grid.start());
            let twice = once.repair(&grid);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_repair_on_maze(
            raw in prop::collection::vec((0i32..7, 0i32..9), 0..20)
        ) {
            let grid = fixtures::weighted_maze();
            let genes: Vec<Coordinate> = raw.into_iter().map(Coordinate::from).collect();
            let once = PathChromosome::new(genes).repair(&grid);
            prop_assert!(once.is_valid(&grid));
            prop_assert_eq!(once.repair(&grid), once);
        }
    }
}
