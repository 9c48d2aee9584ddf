//! Path crossover and mutation operators.
//!
//! Every operator returns a repaired chromosome, so offspring are always
//! valid start-first paths.
//!
//! # Crossover
//!
//! - [`intersection_crossover`]: swap tails at the first shared waypoint,
//!   or average waypoints when the parents never meet
//!
//! # Mutation
//!
//! One roll picks at most one operator:
//!
//! - [`perturb`]: replace one waypoint with a walkable neighbor of itself
//! - [`smooth`]: cut out a detour between two cells in straight sight
//! - [`regrow`]: re-route a segment through a bounded A* bridge

use rand::Rng;

use super::bridge::{bounded_astar, regrowth_depth};
use super::chromosome::PathChromosome;
use crate::grid::{Coordinate, Grid};
use crate::solver::walkable_neighbors;

// ============================================================================
// Crossover
// ============================================================================

/// Intersection crossover.
///
/// Finds the first interior waypoint of `parent1` that also appears in the
/// interior of `parent2` and swaps tails there:
///
/// - child1 = `parent1[..=i] ++ parent2[j+1..]`
/// - child2 = `parent2[..=j] ++ parent1[i+1..]`
///
/// The shared head is skipped because every repaired path begins at the
/// start, which would make the swap a copy. Without a meeting point the
/// children are positional averages (integer division) of the parents,
/// the shorter one padded with its last waypoint; child1 takes the length
/// of `parent1`, child2 that of `parent2`. Both children are repaired.
pub fn intersection_crossover(
    grid: &Grid,
    parent1: &PathChromosome,
    parent2: &PathChromosome,
) -> (PathChromosome, PathChromosome) {
    let a = parent1.genes();
    let b = parent2.genes();
    if a.is_empty() || b.is_empty() {
        return (parent1.repair(grid), parent2.repair(grid));
    }

    let meeting = a.iter().enumerate().skip(1).find_map(|(i, gene)| {
        b.iter()
            .skip(1)
            .position(|other| other == gene)
            .map(|j| (i, j + 1))
    });

    let (child1, child2) = match meeting {
        Some((i, j)) => (
            a[..=i].iter().chain(&b[j + 1..]).copied().collect(),
            b[..=j].iter().chain(&a[i + 1..]).copied().collect(),
        ),
        None => {
            let averaged = averaged_waypoints(a, b);
            (averaged[..a.len()].to_vec(), averaged[..b.len()].to_vec())
        }
    };

    (
        PathChromosome::new(child1).repair(grid),
        PathChromosome::new(child2).repair(grid),
    )
}

/// Per-index midpoints over the longer parent's length.
fn averaged_waypoints(a: &[Coordinate], b: &[Coordinate]) -> Vec<Coordinate> {
    let len = a.len().max(b.len());
    let at = |path: &[Coordinate], i: usize| path[i.min(path.len() - 1)];
    (0..len)
        .map(|i| {
            let (p, q) = (at(a, i), at(b, i));
            Coordinate::new((p.row + q.row) / 2, (p.col + q.col) / 2)
        })
        .collect()
}

// ============================================================================
// Mutation
// ============================================================================

/// Probabilities of the three mutation operators.
///
/// A single uniform roll `r` selects perturbation when `r < perturbation`,
/// smoothing when below `perturbation + smoothing`, regrowth when below the
/// sum of all three, and no mutation otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationRates {
    /// Perturbation probability.
    pub perturbation: f64,
    /// Smoothing probability.
    pub smoothing: f64,
    /// Regrowth probability.
    pub regrowth: f64,
}

impl Default for MutationRates {
    fn default() -> Self {
        Self {
            perturbation: 0.10,
            smoothing: 0.20,
            regrowth: 0.05,
        }
    }
}

/// Applies at most one mutation operator.
///
/// Returns the input unchanged when the roll selects no operator or the
/// chosen operator does not apply.
pub fn mutate<R: Rng>(
    grid: &Grid,
    chromosome: &PathChromosome,
    rates: &MutationRates,
    rng: &mut R,
) -> PathChromosome {
    let roll: f64 = rng.random_range(0.0..1.0);
    if roll < rates.perturbation {
        perturb(grid, chromosome, rng)
    } else if roll < rates.perturbation + rates.smoothing {
        smooth(grid, chromosome, rng)
    } else if roll < rates.perturbation + rates.smoothing + rates.regrowth {
        regrow(grid, chromosome, rng)
    } else {
        chromosome.clone()
    }
}

/// Replaces a random non-head waypoint with one of its walkable neighbors.
pub fn perturb<R: Rng>(grid: &Grid, chromosome: &PathChromosome, rng: &mut R) -> PathChromosome {
    let mut genes = chromosome.genes().to_vec();
    if genes.len() < 2 {
        return chromosome.clone();
    }

    let index = rng.random_range(1..genes.len());
    let neighbors: Vec<Coordinate> = walkable_neighbors(grid, genes[index]).collect();
    if !neighbors.is_empty() {
        genes[index] = neighbors[rng.random_range(0..neighbors.len())];
    }
    PathChromosome::new(genes).repair(grid)
}

/// Tries to shortcut between two random waypoints in straight sight.
pub fn smooth<R: Rng>(grid: &Grid, chromosome: &PathChromosome, rng: &mut R) -> PathChromosome {
    let len = chromosome.len();
    if len < 3 {
        return chromosome.clone();
    }

    let i = rng.random_range(0..len - 2);
    let span = rng.random_range(2..=len - i);
    shortcut(grid, chromosome, i, span).unwrap_or_else(|| chromosome.clone())
}

/// Drops the waypoints strictly between `i` and `i + span` when the two
/// share a row or column with no wall between them.
fn shortcut(
    grid: &Grid,
    chromosome: &PathChromosome,
    i: usize,
    span: usize,
) -> Option<PathChromosome> {
    let genes = chromosome.genes();
    let j = i + span;
    if j >= genes.len() || !axis_line_of_sight(grid, genes[i], genes[j]) {
        return None;
    }
    let smoothed: Vec<Coordinate> = genes[..=i].iter().chain(&genes[j..]).copied().collect();
    Some(PathChromosome::new(smoothed).repair(grid))
}

/// Straight-line visibility along a row or column.
///
/// Identical cells see each other; diagonal pairs never do. Only the cells
/// strictly between the endpoints are tested.
pub(crate) fn axis_line_of_sight(grid: &Grid, from: Coordinate, to: Coordinate) -> bool {
    if from == to {
        return true;
    }
    if from.row != to.row && from.col != to.col {
        return false;
    }
    let (d_row, d_col) = ((to.row - from.row).signum(), (to.col - from.col).signum());
    let mut at = from.offset(d_row, d_col);
    while at != to {
        if !grid.is_walkable(at) {
            return false;
        }
        at = at.offset(d_row, d_col);
    }
    true
}

/// Re-routes a random segment through a bounded A* bridge.
pub fn regrow<R: Rng>(grid: &Grid, chromosome: &PathChromosome, rng: &mut R) -> PathChromosome {
    let len = chromosome.len();
    if len < 3 {
        return chromosome.clone();
    }

    let from = rng.random_range(0..len - 1);
    let to = rng.random_range(from + 1..len);
    regrow_segment(grid, chromosome, from, to).unwrap_or_else(|| chromosome.clone())
}

fn regrow_segment(
    grid: &Grid,
    chromosome: &PathChromosome,
    from: usize,
    to: usize,
) -> Option<PathChromosome> {
    let genes = chromosome.genes();
    let bridge = bounded_astar(grid, genes[from], genes[to], regrowth_depth(grid))?;
    let regrown: Vec<Coordinate> = genes[..=from]
        .iter()
        .chain(&bridge[1..])
        .chain(&genes[to + 1..])
        .copied()
        .collect();
    Some(PathChromosome::new(regrown).repair(grid))
}

// ============================================================================
// Tests
// ============================================================================
