//! Room membership routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use database::models::{Membership, NewMembership};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Join a room.
pub async fn join_room(
    State(state): State<AppState>,
    Json(req): Json<NewMembership>,
) -> Result<(StatusCode, Json<Membership>)> {
    let pool = state.db.pool();

    database::user::get_user(pool, &req.user_id).await?;
    database::room::get_room(pool, &req.room_id).await?;

    if database::membership::get_membership_for_room(pool, &req.user_id, &req.room_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("already a member of this room".to_string()));
    }

    let membership = database::membership::create_membership(pool, req).await?;
    info!(
        user_id = %membership.user_id,
        room_id = %membership.room_id,
        "User joined room"
    );
    Ok((StatusCode::CREATED, Json(membership)))
}

/// Leave a room (delete a membership by ID).
pub async fn leave_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    database::membership::delete_membership(state.db.pool(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a user's memberships.
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Membership>>> {
    let memberships =
        database::membership::list_memberships_by_user(state.db.pool(), &user_id).await?;
    Ok(Json(memberships))
}

/// List a room's memberships.
pub async fn list_by_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<Membership>>> {
    let memberships =
        database::membership::list_memberships_by_room(state.db.pool(), &room_id).await?;
    Ok(Json(memberships))
}
