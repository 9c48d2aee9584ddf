//! Criterion benchmarks for u-pathfind solvers.
//!
//! Uses generated square grids with a fixed comb of walls and a band of
//! weighted floor so every algorithm sees the same detours.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_pathfind::ga::{GaConfig, GaRunner};
use u_pathfind::grid::Grid;
use u_pathfind::search::{AStar, Bfs, BidirectionalDijkstra, DeadEndFill, Dijkstra, Spfa, ThetaStar};
use u_pathfind::solver::Solver;

// ===========================================================================
// Grid generator
// ===========================================================================

/// `n x n` grid: every fourth column is a wall with one gap, alternating
/// top and bottom, and the middle rows cost 3.
fn comb_grid(n: usize) -> Grid {
    let mut text = String::with_capacity(n * (n + 1));
    for row in 0..n {
        for col in 0..n {
            let ch = if row == 0 && col == 0 {
                'S'
            } else if row == n - 1 && col == n - 1 {
                'G'
            } else if col % 4 == 2 {
                let gap_at_top = (col / 4) % 2 == 0;
                let gap = if gap_at_top { row == 0 } else { row == n - 1 };
                if gap {
                    '.'
                } else {
                    '#'
                }
            } else if row > n / 3 && row < 2 * n / 3 {
                '3'
            } else {
                '.'
            };
            text.push(ch);
        }
        text.push('\n');
    }
    Grid::from_ascii(format!("comb_{n}"), &text).expect("generated grid is well formed")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_deterministic(c: &mut Criterion) {
    let solvers: Vec<Box<dyn Solver>> = vec![
        Box::new(Bfs),
        Box::new(Dijkstra),
        Box::new(AStar),
        Box::new(BidirectionalDijkstra),
        Box::new(Spfa),
        Box::new(ThetaStar),
        Box::new(DeadEndFill),
    ];

    for solver in &solvers {
        let mut group = c.benchmark_group(solver.algorithm_name());
        group.sample_size(10);
        for n in [32usize, 64, 128] {
            let grid = comb_grid(n);
            group.bench_with_input(BenchmarkId::from_parameter(n), &grid, |b, g| {
                b.iter(|| {
                    let result = solver.solve(black_box(g));
                    black_box(result)
                })
            });
        }
        group.finish();
    }
}

fn bench_ga(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_comb");
    group.sample_size(10);

    for (n, pop, gen) in [(16usize, 50usize, 30usize), (32, 100, 30)] {
        let grid = comb_grid(n);
        let config = GaConfig {
            population_size: pop,
            max_generations: gen,
            use_cache: false,
            seed: Some(42),
            ..GaConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::new(format!("n{n}_p{pop}_g{gen}"), n),
            &(grid, config),
            |b, (g, c)| {
                b.iter(|| {
                    let result = GaRunner::run(black_box(g), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_deterministic, bench_ga);
criterion_main!(benches);
