//! Every solver in display order.

use super::Solver;
use crate::ga::GeneticSolver;
use crate::search::{
    AStar, BellmanFord, BestFirst, BidirectionalBfs, BidirectionalDijkstra, Bfs, DeadEndFill,
    Dfs, Dijkstra, Iddfs, Spfa, ThetaStar, WallFollower, WallSide, WeightedAStar,
};

/// One instance of each solver, default configuration.
pub fn available_solvers() -> Vec<Box<dyn Solver>> {
    vec![
        Box::new(WallFollower::new(WallSide::Left)),
        Box::new(WallFollower::new(WallSide::Right)),
        Box::new(DeadEndFill),
        Box::new(GeneticSolver::default()),
        Box::new(AStar),
        Box::new(Dijkstra),
        Box::new(Bfs),
        Box::new(BidirectionalBfs),
        Box::new(BestFirst),
        Box::new(Dfs),
        Box::new(Iddfs),
        Box::new(BidirectionalDijkstra),
        Box::new(WeightedAStar::default()),
        Box::new(BellmanFord),
        Box::new(Spfa),
        Box::new(ThetaStar),
    ]
}

/// Looks up a solver by [`algorithm_name`](Solver::algorithm_name),
/// ignoring ASCII case.
pub fn find_solver(name: &str) -> Option<Box<dyn Solver>> {
    available_solvers()
        .into_iter()
        .find(|s| s.algorithm_name().eq_ignore_ascii_case(name))
}
