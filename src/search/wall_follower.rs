//! Wall following.

use std::fmt;

use log::debug;

use crate::error::SolveError;
use crate::grid::{Coordinate, Grid};
use crate::solver::{Direction, Solver, DIRECTIONS};

/// Step budget per grid cell.
const STEP_MULTIPLIER: usize = 10;

/// Which hand stays on the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    /// Keep the wall on the left.
    Left,
    /// Keep the wall on the right.
    Right,
}

impl fmt::Display for WallSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WallSide::Left => f.write_str("LEFT"),
            WallSide::Right => f.write_str("RIGHT"),
        }
    }
}

/// Local-rule maze walker.
///
/// At each step it turns toward its wall side if possible, else goes
/// straight, else turns away, else reverses. The path records every move,
/// revisits included. Not a shortest-path method and not guaranteed to
/// reach goals that are not on the wall it follows; the walk is capped at
/// `width * height * 10` steps.
#[derive(Debug, Clone)]
pub struct WallFollower {
    side: WallSide,
    name: String,
}

impl WallFollower {
    /// Creates a follower for `side`.
    pub fn new(side: WallSide) -> Self {
        Self {
            side,
            name: format!("Wall Follower ({side})"),
        }
    }

    /// The followed side.
    pub fn side(&self) -> WallSide {
        self.side
    }

    fn preferred(&self, heading: Direction) -> Direction {
        match self.side {
            WallSide::Left => heading.left(),
            WallSide::Right => heading.right(),
        }
    }

    fn averted(&self, heading: Direction) -> Direction {
        match self.side {
            WallSide::Left => heading.right(),
            WallSide::Right => heading.left(),
        }
    }
}

impl Solver for WallFollower {
    fn algorithm_name(&self) -> &str {
        &self.name
    }

    fn search(&self, grid: &Grid) -> Result<Vec<Coordinate>, SolveError> {
        let mut current = grid.start();
        let mut path = vec![current];
        if current == grid.goal() {
            return Ok(path);
        }

        let mut heading = DIRECTIONS
            .into_iter()
            .find(|d| grid.is_walkable(d.step(current)))
            .ok_or_else(|| SolveError::Trapped("starting position is enclosed by walls".into()))?;

        let max_steps = (grid.width() * grid.height() * STEP_MULTIPLIER).max(1);
        for _ in 0..max_steps {
            let choice = [
                self.preferred(heading),
                heading,
                self.averted(heading),
                heading.opposite(),
            ]
            .into_iter()
            .find(|d| grid.is_walkable(d.step(current)))
            .ok_or_else(|| SolveError::Trapped("solver is trapped and cannot move".into()))?;

            heading = choice;
            current = choice.step(current);
            path.push(current);
            if current == grid.goal() {
                debug!("{} reached goal in {} moves", self.name, path.len() - 1);
                return Ok(path);
            }
        }

        Err(SolveError::BudgetExhausted(format!(
            "wall follower did not reach the goal within {max_steps} steps"
        )))
    }
}
