//! Best-solution cache and population checkpoints.
//!
//! Both live under one directory and are keyed by a sanitized grid name:
//!
//! - `<name>_ga_best.txt`: one `row,col` pair per line
//! - `<name>_ga_checkpoint.json`: generation, population size, and every
//!   individual's fitness and path
//!
//! Loading is best-effort. A missing or unreadable file is a cache miss,
//! never an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::chromosome::PathChromosome;
use super::types::Population;
use crate::grid::Coordinate;

const CHECKPOINT_SUFFIX: &str = "_ga_checkpoint.json";
const BEST_SUFFIX: &str = "_ga_best.txt";

/// A saved population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    /// Grid the population was evolved on.
    pub maze_name: String,
    /// Generation at which it was saved.
    pub generation: usize,
    /// Configured population size at save time.
    pub population_size: usize,
    /// The individuals, best first.
    pub individuals: Vec<CheckpointEntry>,
}

/// One saved individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointEntry {
    /// Stored score; `None` when it was not finite. Ignored on load.
    pub fitness: Option<f64>,
    /// Waypoints as `[row, col]` pairs.
    pub path: Vec<[i32; 2]>,
}

impl Checkpoint {
    /// Snapshots a population.
    pub fn capture(maze_name: &str, generation: usize, population: &Population) -> Self {
        Self {
            maze_name: maze_name.to_string(),
            generation,
            population_size: population.len(),
            individuals: population
                .individuals()
                .iter()
                .map(|ind| CheckpointEntry {
                    fitness: ind.fitness.is_finite().then_some(ind.fitness),
                    path: ind
                        .chromosome
                        .genes()
                        .iter()
                        .map(|c| [c.row, c.col])
                        .collect(),
                })
                .collect(),
        }
    }

    /// The stored paths as chromosomes, without their fitness.
    pub fn chromosomes(&self) -> Vec<PathChromosome> {
        self.individuals
            .iter()
            .map(|entry| {
                PathChromosome::new(
                    entry
                        .path
                        .iter()
                        .map(|&[row, col]| Coordinate::new(row, col))
                        .collect(),
                )
            })
            .collect()
    }
}

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// File-backed store for checkpoints and cached solutions.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// A store rooted at `dir`; the directory is created on first save.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the checkpoint for `name` lives.
    pub fn checkpoint_path(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}{CHECKPOINT_SUFFIX}", sanitize_name(name)))
    }

    /// Where the cached best path for `name` lives.
    pub fn best_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{BEST_SUFFIX}", sanitize_name(name)))
    }

    /// Whether a checkpoint file exists for `name`.
    pub fn has_checkpoint(&self, name: &str) -> bool {
        self.checkpoint_path(name).is_file()
    }

    /// Whether a cached solution file exists for `name`.
    pub fn has_cached_solution(&self, name: &str) -> bool {
        self.best_path(name).is_file()
    }

    /// Writes a checkpoint as pretty JSON.
    pub fn save_checkpoint(&self, checkpoint: &Checkpoint) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.checkpoint_path(&checkpoint.maze_name);
        let json = serde_json::to_string_pretty(checkpoint)?;
        fs::write(&path, json)?;
        debug!(
            "saved checkpoint for '{}' at generation {} to {}",
            checkpoint.maze_name,
            checkpoint.generation,
            path.display()
        );
        Ok(path)
    }

    /// Reads the checkpoint for `name`.
    ///
    /// Returns `None` if it is missing, unparsable, or empty.
    pub fn load_checkpoint(&self, name: &str) -> Option<Checkpoint> {
        let path = self.checkpoint_path(name);
        match read_checkpoint(&path) {
            Ok(checkpoint) if !checkpoint.individuals.is_empty() => Some(checkpoint),
            Ok(_) => {
                debug!("ignoring empty checkpoint {}", path.display());
                None
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("ignoring unreadable checkpoint {}: {e}", path.display());
                None
            }
        }
    }

    /// Writes `path` as `row,col` lines.
    pub fn save_best(&self, name: &str, path: &[Coordinate]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let file = self.best_path(name);
        let mut text = String::new();
        for c in path {
            text.push_str(&format!("{},{}\n", c.row, c.col));
        }
        fs::write(&file, text)?;
        debug!("cached {}-cell path for '{name}' in {}", path.len(), file.display());
        Ok(file)
    }

    /// Reads the cached path for `name`.
    ///
    /// Returns `None` if it is missing, malformed, or empty.
    pub fn load_best(&self, name: &str) -> Option<Vec<Coordinate>> {
        let file = self.best_path(name);
        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("ignoring unreadable cache {}: {e}", file.display());
                return None;
            }
        };
        match parse_coordinates(&content) {
            Some(path) if !path.is_empty() => Some(path),
            _ => {
                warn!("ignoring malformed cache {}", file.display());
                None
            }
        }
    }
}

fn read_checkpoint(path: &Path) -> io::Result<Checkpoint> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn parse_coordinates(content: &str) -> Option<Vec<Coordinate>> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (row, col) = line.split_once(',')?;
            Some(Coordinate::new(
                row.trim().parse().ok()?,
                col.trim().parse().ok()?,
            ))
        })
        .collect()
}
