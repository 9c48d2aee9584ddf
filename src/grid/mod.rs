//! Grid model consumed by every solver.
//!
//! A [`Grid`] is built once per maze name and shared read-only by all
//! solver invocations against it.
//!
//! # Key Types
//!
//! - [`Coordinate`]: `(row, col)` position with Manhattan distance helpers
//! - [`Cell`]: wall, start, goal, open, or weighted floor
//! - [`Grid`]: validated rectangular cell array with start and goal
//! - [`GridError`]: construction failure

mod model;
mod types;

pub use model::{Grid, GridError};
pub use types::{Cell, Coordinate};

/// Shared test grids.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::Grid;

    fn build(name: &str, text: &str) -> Grid {
        Grid::from_ascii(name, text).expect("fixture grid must parse")
    }

    /// 3x3, all open, start (0,0), goal (2,2).
    pub fn open_3x3() -> Grid {
        build("open_3x3", "S..\n...\n..G")
    }

    /// `[START, WALL, GOAL]`: goal unreachable.
    pub fn blocked_1x3() -> Grid {
        build("blocked_1x3", "S#G")
    }

    /// Start and goal on the same cell.
    pub fn start_is_goal() -> Grid {
        use super::{Cell, Coordinate};
        let rows = vec![
            vec![Cell::Weighted(3), Cell::Open],
            vec![Cell::Open, Cell::Open],
        ];
        let at = Coordinate::new(0, 0);
        Grid::new("start_is_goal", rows, at, at).expect("fixture grid must build")
    }

    /// Start with no walkable neighbor.
    pub fn enclosed_start() -> Grid {
        build("enclosed_start", "S#.\n#..\n..G")
    }

    /// A corridor maze with dead ends and a weighted shortcut.
    ///
    /// The straight route through the `9` costs more than the detour.
    pub fn weighted_maze() -> Grid {
        build(
            "weighted_maze",
            "\
S...#....
.##.#.##.
.#..9..#.
.#.###.#.
...#...#G
.#.#.#.#.
.#...#...",
        )
    }

    /// Open 12x12 room with a few pillars; many equal-length routes.
    pub fn open_room() -> Grid {
        build(
            "open_room",
            "\
S...........
............
...##...##..
...##...##..
............
.....22.....
.....22.....
............
...##...##..
...##...##..
............
...........G",
        )
    }

    /// Serpentine corridor that forces a long detour.
    pub fn serpentine() -> Grid {
        build(
            "serpentine",
            "\
S.........
#########.
..........
.#########
..........
#########.
G.........",
        )
    }
}
