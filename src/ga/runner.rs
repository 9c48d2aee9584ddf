//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives a small state machine:
//!
//! ```text
//! Initializing ─▶ Evaluating ─▶ Breeding ─┐
//!                     ▲                   │
//!                     └───────────────────┘
//!       Evaluating ─▶ TerminatedSuccess | TerminatedExhausted
//! ```
//!
//! Initializing loads a checkpoint or builds a fresh population.
//! Evaluating sorts the population, updates the best-ever individual and
//! the stagnation counter, then decides whether to stop. Breeding keeps the
//! elites and fills the rest from selected, crossed, mutated offspring.

use log::{debug, info, trace, warn};
use rand::Rng;

use super::chromosome::PathChromosome;
use super::config::GaConfig;
use super::init::{initial_population, random_chromosome};
use super::operators::{intersection_crossover, mutate, MutationRates};
use super::persistence::{CacheStore, Checkpoint};
use super::types::{Individual, Population};
use crate::grid::Grid;
use crate::random::create_rng;
use crate::solver::reaches_goal;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An individual reached the goal.
    Success,
    /// A valid cached path was reused; no evolution ran.
    Cached,
    /// The best fitness stopped improving.
    Stagnated,
    /// The generation cap was hit.
    GenerationLimit,
}

/// Per-generation statistics passed to the observer callback.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    /// Best fitness in this generation.
    pub best_fitness: f64,
    /// Mean over finite fitness values.
    pub mean_fitness: f64,
    /// Waypoint count of this generation's best.
    pub best_len: usize,
    /// Generations since the last significant improvement.
    pub stagnation: usize,
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best individual found during the entire run.
    pub best: PathChromosome,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Breeding rounds executed.
    pub generations: usize,

    /// Why the run stopped.
    pub termination: Termination,

    /// Whether `best` is a valid start-to-goal path.
    pub reached_goal: bool,

    /// Best-ever fitness after each evaluated generation.
    pub fitness_history: Vec<f64>,

    /// Generation stored in the checkpoint the run resumed from.
    pub resumed_from_generation: Option<usize>,
}

impl GaResult {
    /// Whether the run stopped on stagnation.
    pub fn stagnated(&self) -> bool {
        self.termination == Termination::Stagnated
    }
}

enum State {
    Initializing,
    Evaluating,
    Breeding,
    TerminatedSuccess(Individual),
    TerminatedExhausted(Termination),
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```no_run
/// use u_pathfind::ga::{GaConfig, GaRunner};
/// use u_pathfind::grid::Grid;
///
/// let grid = Grid::from_ascii("demo", "S..\n.#.\n..G").unwrap();
/// let config = GaConfig::fast().with_use_cache(false).with_seed(42);
/// let result = GaRunner::run(&grid, &config);
/// println!("best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA on `grid`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`] first
    /// to get a descriptive error).
    pub fn run(grid: &Grid, config: &GaConfig) -> GaResult {
        Self::run_with_callback(grid, config, |_| {})
    }

    /// Runs the GA, reporting every evaluated generation to `on_generation`.
    pub fn run_with_callback<F>(grid: &Grid, config: &GaConfig, on_generation: F) -> GaResult
    where
        F: FnMut(&GenerationStats),
    {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(grid, config, &mut rng, on_generation)
    }

    /// Runs the GA with an explicit generator, ignoring `config.seed`.
    pub fn run_with_rng<R, F>(
        grid: &Grid,
        config: &GaConfig,
        rng: &mut R,
        mut on_generation: F,
    ) -> GaResult
    where
        R: Rng,
        F: FnMut(&GenerationStats),
    {
        config.validate().expect("invalid GaConfig");

        let store = config.use_cache.then(|| CacheStore::new(&config.cache_dir));
        if let Some(result) = store.as_ref().and_then(|s| cached_result(grid, s)) {
            return result;
        }

        let rates = MutationRates {
            perturbation: config.perturbation_rate,
            smoothing: config.smoothing_rate,
            regrowth: config.regrowth_rate,
        };

        let mut state = State::Initializing;
        let mut population = Population::default();
        let mut generation = 0usize;
        let mut best: Option<Individual> = None;
        let mut stagnation = 0usize;
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        let mut resumed_from_generation = None;

        loop {
            state = match state {
                State::Initializing => {
                    let checkpoint = store.as_ref().and_then(|s| s.load_checkpoint(grid.name()));
                    let chromosomes = match checkpoint {
                        Some(checkpoint) => {
                            info!(
                                "resuming '{}' from checkpoint at generation {} ({} individuals)",
                                grid.name(),
                                checkpoint.generation,
                                checkpoint.individuals.len()
                            );
                            resumed_from_generation = Some(checkpoint.generation);
                            checkpoint
                                .chromosomes()
                                .iter()
                                .map(|c| c.repair(grid))
                                .collect()
                        }
                        None => initial_population(grid, config.population_size, rng),
                    };
                    population = Population::evaluate(grid, chromosomes);
                    State::Evaluating
                }

                State::Evaluating => {
                    population.sort_by_fitness();
                    let Some(gen_best) = population.individuals().first().cloned() else {
                        break finish(
                            best,
                            generation,
                            Termination::GenerationLimit,
                            grid,
                            fitness_history,
                            resumed_from_generation,
                        );
                    };

                    let improved = match &best {
                        None => true,
                        Some(b) => significant(b.fitness, gen_best.fitness, config),
                    };
                    if best.as_ref().map_or(true, |b| gen_best.fitness > b.fitness) {
                        best = Some(gen_best.clone());
                    }
                    if improved {
                        stagnation = 0;
                    } else {
                        stagnation += 1;
                    }

                    let best_fitness = best.as_ref().map_or(f64::NEG_INFINITY, |b| b.fitness);
                    fitness_history.push(best_fitness);
                    let stats = GenerationStats {
                        generation,
                        best_fitness: gen_best.fitness,
                        mean_fitness: population.mean_fitness(),
                        best_len: gen_best.chromosome.len(),
                        stagnation,
                    };
                    trace!(
                        "generation {}: best {:.3}, mean {:.3}, stagnation {}",
                        stats.generation,
                        stats.best_fitness,
                        stats.mean_fitness,
                        stats.stagnation
                    );
                    on_generation(&stats);

                    if let Some(winner) = population
                        .individuals()
                        .iter()
                        .find(|ind| ind.chromosome.reaches_goal(grid))
                    {
                        State::TerminatedSuccess(winner.clone())
                    } else if config.stagnation_limit > 0 && stagnation >= config.stagnation_limit {
                        State::TerminatedExhausted(Termination::Stagnated)
                    } else if generation >= config.max_generations {
                        State::TerminatedExhausted(Termination::GenerationLimit)
                    } else {
                        State::Breeding
                    }
                }

                State::Breeding => {
                    if let Some(store) = &store {
                        if config.checkpoint_interval > 0
                            && generation % config.checkpoint_interval == 0
                        {
                            let checkpoint = Checkpoint::capture(grid.name(), generation, &population);
                            if let Err(e) = store.save_checkpoint(&checkpoint) {
                                warn!("failed to save checkpoint for '{}': {e}", grid.name());
                            }
                        }
                    }
                    population = breed(grid, config, &rates, &population, rng);
                    generation += 1;
                    State::Evaluating
                }

                State::TerminatedSuccess(winner) => {
                    info!(
                        "GA reached the goal of '{}' at generation {generation} ({} cells)",
                        grid.name(),
                        winner.chromosome.len()
                    );
                    persist_best(store.as_ref(), grid, &winner.chromosome);
                    break GaResult {
                        best_fitness: winner.fitness,
                        best: winner.chromosome,
                        generations: generation,
                        termination: Termination::Success,
                        reached_goal: true,
                        fitness_history,
                        resumed_from_generation,
                    };
                }

                State::TerminatedExhausted(reason) => {
                    info!(
                        "GA stopped on '{}' after {generation} generations ({reason:?})",
                        grid.name()
                    );
                    if let Some(b) = &best {
                        persist_best(store.as_ref(), grid, &b.chromosome);
                    }
                    break finish(
                        best,
                        generation,
                        reason,
                        grid,
                        fitness_history,
                        resumed_from_generation,
                    );
                }
            };
        }
    }
}

/// Whether `new` beats `old` by at least the configured relative margin.
fn significant(old: f64, new: f64, config: &GaConfig) -> bool {
    if new <= old {
        return false;
    }
    if config.convergence_threshold <= 0.0 || !old.is_finite() {
        return true;
    }
    (new - old) / old.abs().max(f64::EPSILON) >= config.convergence_threshold
}

fn finish(
    best: Option<Individual>,
    generations: usize,
    termination: Termination,
    grid: &Grid,
    fitness_history: Vec<f64>,
    resumed_from_generation: Option<usize>,
) -> GaResult {
    let best = best.unwrap_or_else(|| Individual::evaluated(grid, PathChromosome::default()));
    GaResult {
        reached_goal: best.chromosome.reaches_goal(grid),
        best_fitness: best.fitness,
        best: best.chromosome,
        generations,
        termination,
        fitness_history,
        resumed_from_generation,
    }
}

/// Returns a finished result when the cache holds a valid path to the goal.
fn cached_result(grid: &Grid, store: &CacheStore) -> Option<GaResult> {
    let path = store.load_best(grid.name())?;
    if !reaches_goal(grid, &path) {
        debug!("cached path for '{}' does not solve it, ignoring", grid.name());
        return None;
    }
    info!("using cached {}-cell path for '{}'", path.len(), grid.name());
    let best = Individual::evaluated(grid, PathChromosome::new(path));
    Some(GaResult {
        best_fitness: best.fitness,
        best: best.chromosome,
        generations: 0,
        termination: Termination::Cached,
        reached_goal: true,
        fitness_history: vec![best.fitness],
        resumed_from_generation: None,
    })
}

fn persist_best(store: Option<&CacheStore>, grid: &Grid, chromosome: &PathChromosome) {
    let Some(store) = store else {
        return;
    };
    if chromosome.len() <= 1 {
        return;
    }
    if let Err(e) = store.save_best(grid.name(), chromosome.genes()) {
        warn!("failed to cache best path for '{}': {e}", grid.name());
    }
}

/// Produces the next generation from a population sorted best first.
fn breed<R: Rng>(
    grid: &Grid,
    config: &GaConfig,
    rates: &MutationRates,
    population: &Population,
    rng: &mut R,
) -> Population {
    let target = config.population_size;
    let parents = population.individuals();
    let mut next = population.elite(config.elite_count());

    let budget = target * config.max_attempts_factor;
    let mut attempts = 0usize;
    while next.len() < target && attempts < budget {
        attempts += 1;
        let p1 = &parents[config.selection.select(parents, rng)].chromosome;
        let p2 = &parents[config.selection.select(parents, rng)].chromosome;

        let children = if rng.random_range(0.0..1.0) < config.crossover_rate {
            let (c1, c2) = intersection_crossover(grid, p1, p2);
            vec![c1, c2]
        } else {
            vec![p1.clone()]
        };

        for child in children {
            if next.len() >= target {
                break;
            }
            let mut child = mutate(grid, &child, rates, rng).repair(grid);
            if child.is_empty() && attempts > budget / 2 {
                child = random_chromosome(grid, rng);
            }
            if child.is_empty() {
                trace!("discarding empty offspring");
                continue;
            }
            next.push(Individual::evaluated(grid, child));
        }
    }

    if next.len() < target {
        debug!(
            "breeding budget exhausted with {} of {target} individuals, filling with fresh walks",
            next.len()
        );
        while next.len() < target {
            next.push(Individual::evaluated(grid, random_chromosome(grid, rng)));
        }
    }

    Population::new(next)
}

// ============================================================================
// Tests
// ============================================================================
