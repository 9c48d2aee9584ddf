//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop,
//! operator rates, and persistence.

use std::path::PathBuf;

use super::selection::Selection;

/// Configuration for the path-evolving genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_pathfind::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 500);
/// assert_eq!(config.max_generations, 200);
/// assert!(config.use_cache);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_pathfind::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(120)
///     .with_selection(Selection::Tournament(5))
///     .with_elite_ratio(0.1)
///     .with_use_cache(false)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of individuals per generation.
    pub population_size: usize,

    /// Maximum number of breeding rounds.
    pub max_generations: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Fraction of the population carried over unchanged (0.0–1.0).
    ///
    /// At least one elite is always kept.
    pub elite_ratio: f64,

    /// Probability of crossing two parents (0.0–1.0).
    ///
    /// Otherwise the first parent is cloned.
    pub crossover_rate: f64,

    /// Probability of replacing one waypoint with a neighbor.
    pub perturbation_rate: f64,

    /// Probability of cutting a straight shortcut.
    pub smoothing_rate: f64,

    /// Probability of re-routing a segment through a bridge search.
    pub regrowth_rate: f64,

    /// Generations without significant improvement before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Minimum relative improvement to reset the stagnation counter.
    ///
    /// Set to 0.0 to count any improvement (the default).
    pub convergence_threshold: f64,

    /// Generations between population checkpoints (0 disables).
    pub checkpoint_interval: usize,

    /// Whether to read and write the best-solution cache and checkpoints.
    pub use_cache: bool,

    /// Directory holding cache and checkpoint files.
    pub cache_dir: PathBuf,

    /// Whether [`GeneticSolver`](super::GeneticSolver) returns a best path
    /// that stops short of the goal instead of failing.
    pub accept_partial: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Breeding attempts allowed per population slot before the remainder
    /// is filled with fresh chromosomes.
    pub max_attempts_factor: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            max_generations: 200,
            selection: Selection::default(),
            elite_ratio: 0.05,
            crossover_rate: 1.0,
            perturbation_rate: 0.10,
            smoothing_rate: 0.20,
            regrowth_rate: 0.05,
            stagnation_limit: 20,
            convergence_threshold: 0.0,
            checkpoint_interval: 10,
            use_cache: true,
            cache_dir: PathBuf::from("ga_checkpoints"),
            accept_partial: false,
            seed: None,
            max_attempts_factor: 10,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for tournament selection of size `k`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the three mutation rates at once.
    ///
    /// Each is clamped to `[0, 1]`; their sum must not exceed 1
    /// (checked by [`validate`](Self::validate)).
    pub fn with_mutation_rates(mut self, perturbation: f64, smoothing: f64, regrowth: f64) -> Self {
        self.perturbation_rate = perturbation.clamp(0.0, 1.0);
        self.smoothing_rate = smoothing.clamp(0.0, 1.0);
        self.regrowth_rate = regrowth.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the convergence threshold.
    ///
    /// The stagnation counter is only reset when the relative improvement
    /// reaches this threshold: `(new - old) / |old| >= threshold`.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold.max(0.0);
        self
    }

    /// Sets the checkpoint interval (0 to disable).
    pub fn with_checkpoint_interval(mut self, generations: usize) -> Self {
        self.checkpoint_interval = generations;
        self
    }

    /// Enables or disables cache and checkpoint persistence.
    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Sets the persistence directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Accepts best-effort paths that do not reach the goal.
    pub fn with_accept_partial(mut self, accept: bool) -> Self {
        self.accept_partial = accept;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the breeding attempt budget per population slot.
    pub fn with_max_attempts_factor(mut self, factor: usize) -> Self {
        self.max_attempts_factor = factor;
        self
    }

    /// Preset for small grids or interactive use.
    ///
    /// - Population: 60, Generations: 60, Stagnation limit: 10
    pub fn fast() -> Self {
        Self {
            population_size: 60,
            max_generations: 60,
            stagnation_limit: 10,
            ..Self::default()
        }
    }

    /// Preset for medium grids.
    ///
    /// - Population: 200, Generations: 150, Stagnation limit: 20
    pub fn balanced() -> Self {
        Self {
            population_size: 200,
            max_generations: 150,
            stagnation_limit: 20,
            ..Self::default()
        }
    }

    /// Preset for large grids where solution quality matters most.
    ///
    /// - Population: 500, Generations: 400, Stagnation limit: 40
    pub fn quality() -> Self {
        Self {
            population_size: 500,
            max_generations: 400,
            stagnation_limit: 40,
            ..Self::default()
        }
    }

    /// Selects a preset from the grid's cell count.
    ///
    /// - `cell_count < 400` → [`fast()`](Self::fast)
    /// - `400 ≤ cell_count < 2500` → [`balanced()`](Self::balanced)
    /// - `cell_count ≥ 2500` → [`quality()`](Self::quality)
    pub fn auto_select(cell_count: usize) -> Self {
        if cell_count < 400 {
            Self::fast()
        } else if cell_count < 2500 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Number of individuals carried over each generation.
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64 * self.elite_ratio) as usize).max(1)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.elite_count() >= self.population_size {
            return Err("elite_ratio too high: elites fill entire population".into());
        }
        if let Selection::Tournament(0) = self.selection {
            return Err("tournament size must be at least 1".into());
        }
        let mutation_total = self.perturbation_rate + self.smoothing_rate + self.regrowth_rate;
        if mutation_total > 1.0 + 1e-12 {
            return Err(format!(
                "mutation rates sum to {mutation_total}, must not exceed 1"
            ));
        }
        if self.convergence_threshold < 0.0 {
            return Err("convergence_threshold must be non-negative".into());
        }
        if self.max_attempts_factor == 0 {
            return Err("max_attempts_factor must be at least 1".into());
        }
        Ok(())
    }
}
