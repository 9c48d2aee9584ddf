//! Coordinates and cells.

use std::fmt;

/// A `(row, col)` grid position.
///
/// Signed so that unrepaired chromosomes and neighbor probes can hold
/// positions outside the grid without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Row index (0 = top).
    pub row: i32,
    /// Column index (0 = left).
    pub col: i32,
}

impl Coordinate {
    /// Creates a coordinate.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the coordinate shifted by `(d_row, d_col)`.
    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Manhattan (L1) distance.
    pub fn manhattan(self, other: Coordinate) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when `other` is one of the four orthogonal neighbors.
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One grid cell.
///
/// Only [`Cell::Weighted`] carries an explicit weight; every other walkable
/// cell costs 1 to enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Impassable.
    Wall,
    /// The start marker.
    Start,
    /// The goal marker.
    Goal,
    /// Plain floor.
    Open,
    /// Floor with a positive traversal weight.
    Weighted(u32),
}

impl Cell {
    /// Everything except [`Cell::Wall`] is walkable.
    pub fn is_walkable(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Cost of stepping onto this cell.
    pub fn step_cost(self) -> u32 {
        match self {
            Cell::Weighted(w) => w,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_and_adjacency() {
        let a = Coordinate::new(2, 3);
        assert_eq!(a.manhattan(Coordinate::new(0, 0)), 5);
        assert_eq!(a.manhattan(Coordinate::new(-1, 3)), 3);
        assert!(a.is_adjacent(Coordinate::new(1, 3)));
        assert!(a.is_adjacent(Coordinate::new(2, 4)));
        assert!(!a.is_adjacent(Coordinate::new(3, 4)));
        assert!(!a.is_adjacent(a));
    }

    #[test]
    fn test_cell_costs() {
        assert_eq!(Cell::Open.step_cost(), 1);
        assert_eq!(Cell::Start.step_cost(), 1);
        assert_eq!(Cell::Goal.step_cost(), 1);
        assert_eq!(Cell::Weighted(7).step_cost(), 7);
        assert!(!Cell::Wall.is_walkable());
        assert!(Cell::Weighted(3).is_walkable());
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new(4, -1).to_string(), "(4, -1)");
    }
}
