//! Streak error types.

use thiserror::Error;

/// Errors from streak tracking and leaderboard ranking.
#[derive(Debug, Error)]
pub enum StreakError {
    /// No streak record exists for the user. Distinct from a record with a
    /// zero streak.
    #[error("no streak recorded for user {0}")]
    NotFound(String),

    /// Input rejected before any state was touched.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The underlying store failed. Retryable by the caller; no retries
    /// happen here.
    #[error("streak store error: {0}")]
    Store(#[from] database::DatabaseError),
}

/// Result type for streak operations.
pub type Result<T> = std::result::Result<T, StreakError>;
