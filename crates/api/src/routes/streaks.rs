//! Streak routes.

use axum::extract::{Path, State};
use axum::Json;

use database::models::StreakRecord;

use crate::error::Result;
use crate::state::AppState;

/// Get a user's streak record.
///
/// 404 when the user has never logged an action; a user with a record but a
/// broken streak still gets their record back.
pub async fn get_streak(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<StreakRecord>> {
    let record = state.streaks.current(&user_id).await?;
    Ok(Json(record))
}
