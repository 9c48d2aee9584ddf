//! Grid pathfinding engine.
//!
//! Solves start-to-goal routing on 4-connected grids of walls, open floor,
//! and weighted floor:
//!
//! - **Grid model**: [`grid::Grid`] with coordinates, cell kinds, and an
//!   ASCII loader.
//! - **Solver contract**: the [`solver::Solver`] trait with timing and cost
//!   accounting, shared neighbor/cost utilities, and a registry of every
//!   algorithm.
//! - **Deterministic searches**: BFS, DFS, IDDFS, Dijkstra, Bellman-Ford,
//!   SPFA, A*, Weighted A*, Theta*, bidirectional BFS and Dijkstra, greedy
//!   best-first, dead-end filling, and wall following (see [`search`]).
//! - **Genetic Algorithm**: a path-evolving GA with repair, crossover,
//!   mutation, elitism, checkpoints, and a best-solution cache
//!   (see [`ga`]).
//!
//! # Example
//!
//! ```
//! use u_pathfind::grid::Grid;
//! use u_pathfind::search::AStar;
//! use u_pathfind::solver::Solver;
//!
//! let grid = Grid::from_ascii("demo", "S..\n.#.\n..G").unwrap();
//! let result = AStar.solve(&grid).unwrap();
//! assert_eq!(result.path.first(), Some(&grid.start()));
//! assert_eq!(result.path.last(), Some(&grid.goal()));
//! assert_eq!(result.total_cost, 5);
//! ```
//!
//! # Errors
//!
//! Search failures are values of [`SolveError`]. Precondition violations
//! (querying the cost of a wall, an invalid GA configuration) panic.

pub mod error;
pub mod ga;
pub mod grid;
pub mod random;
pub mod search;
pub mod solver;

pub use error::SolveError;
