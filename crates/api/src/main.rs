//! Mixer API server.
//!
//! JSON API for the event-networking app: accounts, rooms, offer/ask
//! profiles, the action log, streaks, and the leaderboard.

mod config;
mod error;
mod routes;
mod state;

use database::Database;
use streaks::{SqliteStreakStore, StreakTracker};
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting Mixer API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    if config.seed_demo {
        database::seed::seed_demo(db.pool()).await?;
    }

    // Streak updates go through a tracker serialized per user
    let streaks = StreakTracker::new(SqliteStreakStore::new(db.clone()));

    // Build application state
    let state = AppState::new(db, streaks);

    // Build router
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "Mixer API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
