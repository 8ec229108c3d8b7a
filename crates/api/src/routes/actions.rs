//! Action log routes.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

use database::models::{Action, NewAction};
use database::validation;

use crate::error::Result;
use crate::state::AppState;

/// Default number of entries for the recent-actions feed.
const DEFAULT_FEED_LIMIT: i64 = 50;

#[derive(Deserialize)]
pub struct ListActionsQuery {
    pub room_id: Option<String>,
    pub user_id: Option<String>,
    pub limit: Option<i64>,
}

/// List actions: a room's feed with `?room_id=`, a user's history with
/// `?user_id=`, otherwise the most recent actions across all rooms.
pub async fn list_actions(
    State(state): State<AppState>,
    Query(query): Query<ListActionsQuery>,
) -> Result<Response> {
    let pool = state.db.pool();

    if let Some(room_id) = query.room_id {
        let actions = database::action::list_actions_by_room(pool, &room_id).await?;
        return Ok(Json(actions).into_response());
    }

    if let Some(user_id) = query.user_id {
        let actions = database::action::list_actions_by_user(pool, &user_id).await?;
        return Ok(Json(actions).into_response());
    }

    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT).max(0);
    let actions = database::action::list_recent_actions(pool, limit).await?;
    Ok(Json(actions).into_response())
}

/// Log an action, then fold it into the user's streak.
///
/// The action is stored first. If the streak write fails afterwards the
/// action stays recorded and the request still succeeds; the streak catches
/// up on the user's next action that day.
pub async fn create_action(
    State(state): State<AppState>,
    Json(req): Json<NewAction>,
) -> Result<(StatusCode, Json<Action>)> {
    validation::validate_text_field("content", &req.content)?;
    validation::validate_text_field("action type", &req.action_type)?;

    database::user::get_user(state.db.pool(), &req.user_id).await?;

    let now = Utc::now();
    let action = database::action::create_action(state.db.pool(), req, now).await?;

    match state.streaks.record_action(&action.user_id, now).await {
        Ok(record) => debug!(
            user_id = %action.user_id,
            current = record.current_streak,
            "Streak up to date"
        ),
        Err(err) => warn!(
            user_id = %action.user_id,
            error = %err,
            "Streak update failed; action remains recorded"
        ),
    }

    Ok((StatusCode::CREATED, Json(action)))
}
