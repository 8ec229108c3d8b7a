//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use streaks::{SqliteStreakStore, StreakTracker};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Streak tracker, serialized per user.
    pub streaks: Arc<StreakTracker<SqliteStreakStore>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, streaks: StreakTracker<SqliteStreakStore>) -> Self {
        Self {
            db,
            streaks: Arc::new(streaks),
        }
    }
}
