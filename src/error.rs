//! Domain error for every search failure.
//!
//! All solvers, deterministic or evolutionary, surface failure through the
//! single [`SolveError`] type. Callers (GUI, batch profiler, training loop)
//! match on it, report the message, and move on to the next algorithm or grid.
//!
//! Precondition violations (out-of-bounds or wall coordinates handed to
//! [`step_cost`](crate::solver::step_cost), an invalid [`GaConfig`]) are
//! programming errors and panic instead.
//!
//! [`GaConfig`]: crate::ga::GaConfig

/// Recoverable search failure.
///
/// Each variant carries a human-readable message only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The goal is unreachable from the start.
    #[error("no path: {0}")]
    NoPath(String),

    /// The agent cannot move at all (start enclosed by walls).
    #[error("trapped: {0}")]
    Trapped(String),

    /// A bounded step or depth budget ran out before reaching the goal.
    #[error("budget exhausted: {0}")]
    BudgetExhausted(String),

    /// The genetic algorithm terminated without a path that reaches the goal.
    #[error("genetic algorithm exhausted: {0}")]
    GaExhausted(String),
}

impl SolveError {
    /// Returns the message payload without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            SolveError::NoPath(m)
            | SolveError::Trapped(m)
            | SolveError::BudgetExhausted(m)
            | SolveError::GaExhausted(m) => m,
        }
    }

    pub(crate) fn no_path() -> Self {
        SolveError::NoPath("no path found from start to goal".into())
    }
}
