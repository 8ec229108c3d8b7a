//! Leaderboard route.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use streaks::leaderboard::{parse_limit, rank, LeaderboardEntry};

use crate::error::Result;
use crate::state::AppState;

/// Default number of leaderboard entries.
const DEFAULT_LIMIT: i64 = 10;

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

/// Rank users by current streak, tie-broken by activity this week.
///
/// Only users who have logged at least one action appear. The snapshot is
/// read without locks, so it may trail a concurrent action submission by a
/// moment.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
    let limit = parse_limit(query.limit.unwrap_or(DEFAULT_LIMIT))?;

    let candidates = database::leaderboard::rank_candidates(state.db.pool(), Utc::now()).await?;
    Ok(Json(rank(candidates, limit)))
}
