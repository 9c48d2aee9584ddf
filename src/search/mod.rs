//! Deterministic search family.
//!
//! Every algorithm works in the flattened `row * width + col` index space
//! and reconstructs its path from a parent array, except [`Iddfs`] (which
//! builds the path on its recursion stack) and [`WallFollower`] (which
//! records its walk).
//!
//! | Solver | Frontier | Weights | Result |
//! |---|---|---|---|
//! | [`Bfs`] | FIFO | unit | fewest cells |
//! | [`Dfs`] | LIFO | unit | any path |
//! | [`Iddfs`] | recursive, deepening | unit | fewest cells |
//! | [`Dijkstra`] | binary heap | weighted | minimum cost |
//! | [`BellmanFord`] | full sweeps | weighted | minimum cost |
//! | [`Spfa`] | FIFO + in-queue flag | weighted | minimum cost |
//! | [`AStar`] | heap on `g + h` | weighted | minimum cost |
//! | [`WeightedAStar`] | heap on `g + w*h` | weighted | bounded suboptimal |
//! | [`ThetaStar`] | heap on `g + h` | weighted | any-angle |
//! | [`BidirectionalBfs`] | two FIFOs | unit | fewest cells |
//! | [`BidirectionalDijkstra`] | two heaps | weighted | minimum cost |
//! | [`BestFirst`] | heap on `h` | ignored | any path |
//! | [`DeadEndFill`] | pruning + FIFO | unit | fewest cells |
//! | [`WallFollower`] | local rule | unit | any path, bounded |

mod astar;
mod bellman_ford;
mod bfs;
mod bidirectional;
mod dead_end_fill;
mod dfs;
mod dijkstra;
mod iddfs;
mod theta_star;
mod wall_follower;

pub use astar::{AStar, BestFirst, WeightedAStar};
pub use bellman_ford::{BellmanFord, Spfa};
pub use bfs::Bfs;
pub use bidirectional::{BidirectionalBfs, BidirectionalDijkstra};
pub use dead_end_fill::DeadEndFill;
pub use dfs::Dfs;
pub use dijkstra::Dijkstra;
pub use iddfs::Iddfs;
pub use theta_star::ThetaStar;
pub use wall_follower::{WallFollower, WallSide};
