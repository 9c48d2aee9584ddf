//! The immutable grid model.

use super::types::{Cell, Coordinate};

/// Grid construction failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// No rows, or a row with no cells.
    #[error("grid must have at least one row and one column")]
    Empty,

    /// Rows of differing length.
    #[error("row {row} has {actual} cells, expected {expected}")]
    Ragged {
        /// Offending row.
        row: usize,
        /// Its length.
        actual: usize,
        /// Length of the first row.
        expected: usize,
    },

    /// Start or goal outside the grid.
    #[error("{which} {at} is outside the grid")]
    OutOfBounds {
        /// `"start"` or `"goal"`.
        which: &'static str,
        /// The offending position.
        at: Coordinate,
    },

    /// Start or goal placed on a wall.
    #[error("{which} {at} is not walkable")]
    NotWalkable {
        /// `"start"` or `"goal"`.
        which: &'static str,
        /// The offending position.
        at: Coordinate,
    },

    /// A weighted cell with weight zero.
    #[error("weighted cell at {0} must have a positive weight")]
    InvalidWeight(Coordinate),

    /// Unrecognized character in ASCII input.
    #[error("unknown symbol {symbol:?} at {at}")]
    UnknownSymbol {
        /// The character.
        symbol: char,
        /// Where it appeared.
        at: Coordinate,
    },

    /// ASCII input without exactly one `S` or `G`.
    #[error("expected exactly one {0} marker")]
    Marker(&'static str),
}

/// A rectangular, read-only grid with a start and a goal.
///
/// Cells are stored row-major; [`Grid::index`] maps a coordinate into the
/// flattened `row * width + col` space every deterministic search works in.
///
/// # Examples
///
/// ```
/// use u_pathfind::grid::{Coordinate, Grid};
///
/// let grid = Grid::from_ascii("corridor", "S.#\n..G").unwrap();
/// assert_eq!(grid.width(), 3);
/// assert_eq!(grid.goal(), Coordinate::new(1, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    name: String,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Coordinate,
    goal: Coordinate,
}

impl Grid {
    /// Builds a grid from rows of cells and explicit endpoints.
    pub fn new(
        name: impl Into<String>,
        rows: Vec<Vec<Cell>>,
        start: Coordinate,
        goal: Coordinate,
    ) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: r,
                    actual: row.len(),
                    expected: width,
                });
            }
            for (c, cell) in row.into_iter().enumerate() {
                if cell == Cell::Weighted(0) {
                    return Err(GridError::InvalidWeight(Coordinate::new(r as i32, c as i32)));
                }
                cells.push(cell);
            }
        }

        let grid = Self {
            name: name.into(),
            width,
            height,
            cells,
            start,
            goal,
        };
        grid.check_endpoint("start", start)?;
        grid.check_endpoint("goal", goal)?;
        Ok(grid)
    }

    /// Parses a compact ASCII layout, one line per row.
    ///
    /// | Symbol | Cell |
    /// |---|---|
    /// | `#` | wall |
    /// | `.` | open |
    /// | `S` | start |
    /// | `G` | goal |
    /// | `1`–`9` | weighted |
    ///
    /// Leading/trailing whitespace and blank lines are ignored.
    pub fn from_ascii(name: impl Into<String>, text: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        let mut start = None;
        let mut goal = None;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let r = rows.len() as i32;
            let mut row = Vec::with_capacity(line.len());
            for (c, symbol) in line.chars().enumerate() {
                let at = Coordinate::new(r, c as i32);
                let cell = match symbol {
                    '#' => Cell::Wall,
                    '.' => Cell::Open,
                    'S' => {
                        if start.replace(at).is_some() {
                            return Err(GridError::Marker("S"));
                        }
                        Cell::Start
                    }
                    'G' => {
                        if goal.replace(at).is_some() {
                            return Err(GridError::Marker("G"));
                        }
                        Cell::Goal
                    }
                    '1'..='9' => Cell::Weighted(symbol as u32 - '0' as u32),
                    _ => return Err(GridError::UnknownSymbol { symbol, at }),
                };
                row.push(cell);
            }
            rows.push(row);
        }

        let start = start.ok_or(GridError::Marker("S"))?;
        let goal = goal.ok_or(GridError::Marker("G"))?;
        Self::new(name, rows, start, goal)
    }

    fn check_endpoint(&self, which: &'static str, at: Coordinate) -> Result<(), GridError> {
        match self.cell(at) {
            None => Err(GridError::OutOfBounds { which, at }),
            Some(cell) if !cell.is_walkable() => Err(GridError::NotWalkable { which, at }),
            Some(_) => Ok(()),
        }
    }

    /// Grid name; also the key for GA persistence.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Start position.
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Goal position.
    pub fn goal(&self) -> Coordinate {
        self.goal
    }

    /// True when `at` lies inside the grid.
    pub fn in_bounds(&self, at: Coordinate) -> bool {
        at.row >= 0
            && at.col >= 0
            && (at.row as usize) < self.height
            && (at.col as usize) < self.width
    }

    /// The cell at `at`, or `None` outside the grid.
    pub fn cell(&self, at: Coordinate) -> Option<Cell> {
        if self.in_bounds(at) {
            Some(self.cells[self.index(at)])
        } else {
            None
        }
    }

    /// True when `at` is inside the grid and not a wall.
    pub fn is_walkable(&self, at: Coordinate) -> bool {
        self.cell(at).is_some_and(Cell::is_walkable)
    }

    /// Flattened index of an in-bounds coordinate.
    pub fn index(&self, at: Coordinate) -> usize {
        debug_assert!(self.in_bounds(at), "coordinate {at} outside grid");
        at.row as usize * self.width + at.col as usize
    }

    /// Inverse of [`index`](Self::index).
    pub fn coordinate(&self, index: usize) -> Coordinate {
        Coordinate::new((index / self.width) as i32, (index % self.width) as i32)
    }

    /// The cell at a flattened index.
    pub fn cell_at(&self, index: usize) -> Cell {
        self.cells[index]
    }
}
