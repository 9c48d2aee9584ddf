//! Initial population construction.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::chromosome::PathChromosome;
use crate::grid::{Coordinate, Grid};
use crate::solver::walkable_neighbors;

/// How many of the closest candidates a biased walk picks among.
const BIASED_CHOICES: usize = 3;

/// Builds `size` repaired chromosomes: the first half random walks, the
/// rest goal-biased walks.
pub fn initial_population<R: Rng>(grid: &Grid, size: usize, rng: &mut R) -> Vec<PathChromosome> {
    let half = size / 2;
    let max_steps = walk_budget(grid);
    let mut population = Vec::with_capacity(size);
    for _ in 0..half {
        population.push(PathChromosome::new(random_walk(grid, max_steps, rng)).repair(grid));
    }
    for _ in half..size {
        population.push(PathChromosome::new(biased_walk(grid, max_steps, rng)).repair(grid));
    }
    population
}

/// A fresh repaired random walk.
pub fn random_chromosome<R: Rng>(grid: &Grid, rng: &mut R) -> PathChromosome {
    PathChromosome::new(random_walk(grid, walk_budget(grid), rng)).repair(grid)
}

/// Twice the start-goal Manhattan distance.
fn walk_budget(grid: &Grid) -> usize {
    2 * grid.start().manhattan(grid.goal()) as usize
}

/// Uniform random steps from the start, stopping at the goal or a dead end.
fn random_walk<R: Rng>(grid: &Grid, max_steps: usize, rng: &mut R) -> Vec<Coordinate> {
    let goal = grid.goal();
    let mut current = grid.start();
    let mut path = vec![current];

    for _ in 0..max_steps {
        if current == goal {
            break;
        }
        let neighbors: Vec<Coordinate> = walkable_neighbors(grid, current).collect();
        if neighbors.is_empty() {
            break;
        }
        current = neighbors[rng.random_range(0..neighbors.len())];
        path.push(current);
    }
    path
}

/// Self-avoiding walk that picks randomly among the unvisited neighbors
/// closest to the goal.
fn biased_walk<R: Rng>(grid: &Grid, max_steps: usize, rng: &mut R) -> Vec<Coordinate> {
    let goal = grid.goal();
    let mut current = grid.start();
    let mut path = vec![current];
    let mut visited = HashSet::from([current]);

    for _ in 0..max_steps {
        if current == goal {
            break;
        }
        let mut candidates: Vec<Coordinate> = walkable_neighbors(grid, current)
            .filter(|n| !visited.contains(n))
            .collect();
        if candidates.is_empty() {
            break;
        }
        candidates.shuffle(rng);
        candidates.sort_by_key(|n| n.manhattan(goal));

        current = candidates[rng.random_range(0..candidates.len().min(BIASED_CHOICES))];
        path.push(current);
        visited.insert(current);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;
    use crate::random::create_rng;

    #[test]
    fn test_population_size_and_validity() {
        let grid = fixtures::weighted_maze();
        let mut rng = create_rng(42);
        for size in [0, 1, 7, 30] {
            let population = initial_population(&grid, size, &mut rng);
            assert_eq!(population.len(), size);
            for chromosome in &population {
                assert!(chromosome.is_valid(&grid));
                assert_eq!(chromosome.genes()[0], grid.start());
            }
        }
    }

    #[test]
    fn test_walks_stay_within_budget() {
        let grid = fixtures::open_room();
        let mut rng = create_rng(9);
        let budget = walk_budget(&grid);
        assert_eq!(budget, 44);
        for _ in 0..20 {
            assert!(random_walk(&grid, budget, &mut rng).len() <= budget + 1);
            let biased = biased_walk(&grid, budget, &mut rng);
            assert!(biased.len() <= budget + 1);
            let unique: HashSet<_> = biased.iter().collect();
            assert_eq!(unique.len(), biased.len(), "biased walk revisited a cell");
        }
    }

    #[test]
    fn test_biased_walk_often_reaches_open_goal() {
        let grid = fixtures::open_3x3();
        let mut rng = create_rng(5);
        let hits = (0..50)
            .filter(|_| biased_walk(&grid, walk_budget(&grid), &mut rng).last() == Some(&grid.goal()))
            .count();
        assert!(hits > 0);
    }

    #[test]
    fn test_enclosed_start() {
        let grid = fixtures::blocked_1x3();
        let mut rng = create_rng(1);
        assert_eq!(random_walk(&grid, 10, &mut rng), vec![grid.start()]);
        assert_eq!(biased_walk(&grid, 10, &mut rng), vec![grid.start()]);
        assert_eq!(random_chromosome(&grid, &mut rng).genes(), &[grid.start()]);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let grid = fixtures::open_room();
        let a = initial_population(&grid, 10, &mut create_rng(77));
        let b = initial_population(&grid, 10, &mut create_rng(77));
        assert_eq!(a, b);
    }
}
