//! Movement, cost, and reconstruction utilities shared by all solvers.

use std::cmp::Ordering;

use crate::grid::{Coordinate, Grid};

/// Parent-array sentinel for "no parent".
pub const NO_PARENT: usize = usize::MAX;

/// A compass heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Row - 1.
    North,
    /// Col + 1.
    East,
    /// Row + 1.
    South,
    /// Col - 1.
    West,
}

/// The four headings in clockwise order starting north.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// `(d_row, d_col)` for one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Heading after a 90° counter-clockwise turn.
    pub fn left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    /// Heading after a 90° clockwise turn.
    pub fn right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Reverse heading.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The coordinate one step from `from` in this heading.
    pub fn step(self, from: Coordinate) -> Coordinate {
        let (dr, dc) = self.delta();
        from.offset(dr, dc)
    }
}

/// True when `at` is in bounds and not a wall.
pub fn is_walkable(grid: &Grid, at: Coordinate) -> bool {
    grid.is_walkable(at)
}

/// Cost of entering `at`.
///
/// # Panics
///
/// If `at` is out of bounds or a wall.
pub fn step_cost(grid: &Grid, at: Coordinate) -> u32 {
    match grid.cell(at) {
        Some(cell) if cell.is_walkable() => cell.step_cost(),
        Some(_) => panic!("step_cost: {at} is a wall"),
        None => panic!("step_cost: {at} is outside the grid"),
    }
}

/// Walkable 4-neighbors of `at`, in N, E, S, W order.
pub fn walkable_neighbors(grid: &Grid, at: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
    DIRECTIONS
        .iter()
        .map(move |d| d.step(at))
        .filter(move |&n| grid.is_walkable(n))
}

/// Walkable 4-neighbors of a flattened index, as flattened indices.
pub(crate) fn neighbor_indices(grid: &Grid, index: usize) -> impl Iterator<Item = usize> + '_ {
    walkable_neighbors(grid, grid.coordinate(index)).map(move |n| grid.index(n))
}

/// Sum of step costs over every cell of `path`, start included.
///
/// # Panics
///
/// If any cell is out of bounds or a wall.
pub fn path_cost(grid: &Grid, path: &[Coordinate]) -> u64 {
    path.iter().map(|&c| u64::from(step_cost(grid, c))).sum()
}

/// True when `path` starts at the grid start and every cell is walkable
/// and 4-adjacent to its predecessor.
pub fn is_valid_path(grid: &Grid, path: &[Coordinate]) -> bool {
    match path.first() {
        Some(&head) if head == grid.start() => {}
        _ => return false,
    }
    path.iter().all(|&c| grid.is_walkable(c)) && path.windows(2).all(|w| w[0].is_adjacent(w[1]))
}

/// True when `path` is valid and ends on the goal.
pub fn reaches_goal(grid: &Grid, path: &[Coordinate]) -> bool {
    path.last() == Some(&grid.goal()) && is_valid_path(grid, path)
}

/// Walks `parents` back from `target` to the root and returns the
/// root-first path.
pub(crate) fn reconstruct_path(grid: &Grid, parents: &[usize], target: usize) -> Vec<Coordinate> {
    let mut path = Vec::new();
    let mut current = target;
    while current != NO_PARENT {
        path.push(grid.coordinate(current));
        current = parents[current];
    }
    path.reverse();
    path
}

/// Min-heap entry for priority frontiers.
///
/// `BinaryHeap` is a max-heap, so ordering is reversed. Ties on `key` go to
/// the entry pushed first (`seq`), which keeps expansion order deterministic.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frontier {
    pub key: f64,
    pub seq: u64,
    pub index: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A `BinaryHeap<Frontier>` that stamps each push with a sequence number.
#[derive(Debug, Default)]
pub(crate) struct MinQueue {
    heap: std::collections::BinaryHeap<Frontier>,
    seq: u64,
}

impl MinQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: f64, index: usize) {
        self.heap.push(Frontier {
            key,
            seq: self.seq,
            index,
        });
        self.seq += 1;
    }

    pub fn pop(&mut self) -> Option<Frontier> {
        self.heap.pop()
    }

    pub fn peek_key(&self) -> Option<f64> {
        self.heap.peek().map(|f| f.key)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::fixtures;

    #[test]
    fn test_direction_turns() {
        for d in DIRECTIONS {
            assert_eq!(d.left().right(), d);
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.left().left(), d.opposite());
        }
        assert_eq!(Direction::North.right(), Direction::East);
        assert_eq!(Direction::North.left(), Direction::West);
    }

    #[test]
    fn test_neighbors_order_and_walls() {
        let grid = fixtures::enclosed_start();
        assert_eq!(walkable_neighbors(&grid, grid.start()).count(), 0);

        let grid = fixtures::open_3x3();
        let center: Vec<_> = walkable_neighbors(&grid, Coordinate::new(1, 1)).collect();
        assert_eq!(
            center,
            vec![
                Coordinate::new(0, 1),
                Coordinate::new(1, 2),
                Coordinate::new(2, 1),
                Coordinate::new(1, 0),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "is a wall")]
    fn test_step_cost_on_wall_panics() {
        let grid = fixtures::blocked_1x3();
        step_cost(&grid, Coordinate::new(0, 1));
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn test_step_cost_out_of_bounds_panics() {
        let grid = fixtures::open_3x3();
        step_cost(&grid, Coordinate::new(3, 0));
    }

    #[test]
    fn test_path_validation() {
        let grid = fixtures::open_3x3();
        let good = [(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)].map(Coordinate::from);
        assert!(is_valid_path(&grid, &good));
        assert!(reaches_goal(&grid, &good));
        assert_eq!(path_cost(&grid, &good), 5);

        let gap = [(0, 0), (1, 1), (2, 2)].map(Coordinate::from);
        assert!(!is_valid_path(&grid, &gap));

        let wrong_start = [(0, 1), (0, 2)].map(Coordinate::from);
        assert!(!is_valid_path(&grid, &wrong_start));

        let partial = [(0, 0), (0, 1)].map(Coordinate::from);
        assert!(is_valid_path(&grid, &partial));
        assert!(!reaches_goal(&grid, &partial));
        assert!(!is_valid_path(&grid, &[]));
    }

    #[test]
    fn test_reconstruct_path() {
        let grid = fixtures::open_3x3();
        let mut parents = vec![NO_PARENT; grid.cell_count()];
        parents[1] = 0;
        parents[4] = 1;
        let path = reconstruct_path(&grid, &parents, 4);
        assert_eq!(path, [(0, 0), (0, 1), (1, 1)].map(Coordinate::from));
    }

    #[test]
    fn test_min_queue_orders_by_key_then_insertion() {
        let mut q = MinQueue::new();
        q.push(3.0, 30);
        q.push(1.0, 10);
        q.push(1.0, 11);
        q.push(2.0, 20);
        let order: Vec<usize> = std::iter::from_fn(|| q.pop().map(|f| f.index)).collect();
        assert_eq!(order, vec![10, 11, 20, 30]);
        assert!(q.is_empty());
    }
}
