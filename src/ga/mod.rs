//! Genetic path optimizer.
//!
//! Evolves variable-length waypoint sequences toward the goal. Every
//! chromosome handed to fitness evaluation has been repaired into a valid
//! start-first path, so operators are free to produce broken geometry.
//!
//! # Key Types
//!
//! - [`PathChromosome`]: waypoint sequence with repair and greedy extension
//! - [`GaConfig`]: population, operator rates, termination, persistence
//! - [`GaRunner`]: the evolutionary state machine
//! - [`GaResult`]: best path, termination reason, fitness history
//! - [`GeneticSolver`]: plugs the GA into the [`Solver`](crate::solver::Solver)
//!   registry
//!
//! # Submodules
//!
//! - [`fitness`]: goal-dominant path scoring
//! - [`operators`]: intersection crossover and the three path mutations
//! - [`persistence`]: best-solution cache and population checkpoints
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Ahn & Ramakrishna (2002), "A Genetic Algorithm for Shortest Path Routing
//!   Problem and the Sizing of Populations"

mod bridge;
mod chromosome;
mod config;
pub mod fitness;
mod init;
pub mod operators;
pub mod persistence;
mod runner;
mod selection;
mod solver;
mod types;

pub use chromosome::PathChromosome;
pub use config::GaConfig;
pub use init::{initial_population, random_chromosome};
pub use persistence::{CacheStore, Checkpoint, CheckpointEntry};
pub use runner::{GaResult, GaRunner, GenerationStats, Termination};
pub use selection::Selection;
pub use solver::GeneticSolver;
pub use types::{Individual, Population};
