//! Path fitness.
//!
//! Higher is better. Any path ending on the goal scores about a million
//! minus a small cost term, far above the best partial path (about 65 000),
//! so goal-reaching paths always sort first.

use crate::grid::{Coordinate, Grid};

const GOAL_REWARD: f64 = 1_000_000.0;
const GOAL_COST_WEIGHT: f64 = 0.1;
const GOAL_COLLISION_WEIGHT: f64 = 10.0;

const PROXIMITY_REWARD: f64 = 50_000.0;
const PROXIMITY_DECAY: f64 = 5.0;
const DIVERSITY_REWARD: f64 = 5_000.0;
const PROGRESS_REWARD: f64 = 10_000.0;
const EFFICIENCY_REWARD: f64 = 100.0;
const EFFICIENCY_SCALE: f64 = 1_000.0;

/// Cost charged for a cell outside the grid.
const OUT_OF_BOUNDS_COST: u64 = 1_000;
/// Penalty for a wall or out-of-bounds cell.
const BLOCKED_PENALTY: f64 = 1_000.0;
/// Penalty for two consecutive cells that are not adjacent.
const GAP_PENALTY: f64 = 500.0;

/// Scores a path.
///
/// Returns negative infinity for an empty path.
pub fn evaluate(grid: &Grid, path: &[Coordinate]) -> f64 {
    let Some(&last) = path.last() else {
        return f64::NEG_INFINITY;
    };
    let goal = grid.goal();
    let cost = raw_cost(grid, path) as f64;
    let collisions = collision_penalty(grid, path);

    let distance = last.manhattan(goal);
    if distance == 0 {
        return GOAL_REWARD - cost * GOAL_COST_WEIGHT - collisions * GOAL_COLLISION_WEIGHT;
    }

    let max_distance = (grid.width() + grid.height()).max(1) as f64;
    let normalized = (f64::from(distance) / max_distance).min(1.0);
    let proximity = PROXIMITY_REWARD * (-PROXIMITY_DECAY * normalized).exp();

    let unique = path
        .iter()
        .collect::<std::collections::HashSet<_>>()
        .len() as f64;
    let diversity = DIVERSITY_REWARD * unique / path.len() as f64;

    let progress = if path.len() < 2 {
        0.0
    } else {
        let from_first = f64::from(path[0].manhattan(goal));
        if from_first == 0.0 {
            0.0
        } else {
            PROGRESS_REWARD * ((from_first - f64::from(distance)) / from_first).max(0.0)
        }
    };

    let efficiency = EFFICIENCY_REWARD / (1.0 + cost / EFFICIENCY_SCALE);

    proximity + diversity + progress + efficiency - collisions
}

/// Sum of step costs, charging walls 1 and out-of-bounds cells 1000.
fn raw_cost(grid: &Grid, path: &[Coordinate]) -> u64 {
    path.iter()
        .map(|&c| match grid.cell(c) {
            Some(cell) => u64::from(cell.step_cost()),
            None => OUT_OF_BOUNDS_COST,
        })
        .sum()
}

fn collision_penalty(grid: &Grid, path: &[Coordinate]) -> f64 {
    let mut penalty = 0.0;
    for (i, &c) in path.iter().enumerate() {
        if !grid.is_walkable(c) {
            penalty += BLOCKED_PENALTY;
            continue;
        }
        if i > 0 && !path[i - 1].is_adjacent(c) {
            penalty += GAP_PENALTY;
        }
    }
    penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_empty_path() {
        let grid = fixtures::open_3x3();
        assert_eq!(evaluate(&grid, &[]), f64::NEG_INFINITY);
    }

    #[test]
    fn test_goal_path_score() {
        let grid = fixtures::open_3x3();
        let path = [c(0, 0), c(0, 1), c(0, 2), c(1, 2), c(2, 2)];
        let score = evaluate(&grid, &path);
        assert!((score - (1_000_000.0 - 0.5)).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_goal_beats_any_partial() {
        let grid = fixtures::open_room();
        let partial = [c(0, 0), c(0, 1), c(1, 1), c(2, 1), c(2, 2)];
        let long_goal: Vec<Coordinate> = (0..12)
            .map(|col| c(0, col))
            .chain((1..12).map(|row| c(row, 11)))
            .collect();
        assert!(evaluate(&grid, &long_goal) > 900_000.0);
        assert!(evaluate(&grid, &partial) < 70_000.0);
    }

    #[test]
    fn test_partial_path_components() {
        let grid = fixtures::open_3x3();
        // ends at (1,1): distance 2 of max 6, progress (4-2)/4
        let path = [c(0, 0), c(0, 1), c(1, 1)];
        let expected = 50_000.0 * (-5.0 * (2.0 / 6.0_f64)).exp()
            + 5_000.0
            + 10_000.0 * 0.5
            + 100.0 / (1.0 + 3.0 / 1_000.0);
        let score = evaluate(&grid, &path);
        assert!((score - expected).abs() < 1e-6, "got {score}, expected {expected}");
    }

    #[test]
    fn test_closer_is_better() {
        let grid = fixtures::open_room();
        let near = [c(0, 0), c(1, 0), c(1, 1), c(2, 1)];
        let far = [c(0, 0), c(0, 1), c(0, 0), c(1, 0)];
        assert!(evaluate(&grid, &near) > evaluate(&grid, &far));
    }

    #[test]
    fn test_collisions_penalized() {
        let grid = fixtures::weighted_maze();
        let clean = [c(0, 0), c(0, 1), c(0, 2)];
        let through_wall = [c(0, 0), c(0, 1), c(1, 1)];
        let gap = [c(0, 0), c(0, 2), c(0, 3)];
        assert_eq!(collision_penalty(&grid, &clean), 0.0);
        assert!((collision_penalty(&grid, &through_wall) - 1_000.0).abs() < 1e-9);
        assert!((collision_penalty(&grid, &gap) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_raw_cost_charges_out_of_bounds() {
        let grid = fixtures::open_3x3();
        assert_eq!(raw_cost(&grid, &[c(0, 0), c(-1, 0)]), 1_001);
        // walls cost 1
        let grid = fixtures::blocked_1x3();
        assert_eq!(raw_cost(&grid, &[c(0, 0), c(0, 1)]), 2);
    }
}
