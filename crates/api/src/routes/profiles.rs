//! Profile routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use database::models::{NewProfile, Profile, ProfileUpdate, ProfileWithUser};
use database::validation;

use crate::error::Result;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListProfilesQuery {
    pub room_id: Option<String>,
}

/// Get a profile (with its owning user) by ID.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileWithUser>> {
    let profile = database::profile::get_profile_with_user(state.db.pool(), &id).await?;
    Ok(Json(profile))
}

/// Get a user's profile.
pub async fn get_profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile>> {
    let profile = database::profile::get_profile_by_user(state.db.pool(), &user_id).await?;
    Ok(Json(profile))
}

/// List all profiles, or a room's member profiles with `?room_id=`.
pub async fn list_profiles(
    State(state): State<AppState>,
    Query(query): Query<ListProfilesQuery>,
) -> Result<Json<Vec<ProfileWithUser>>> {
    let pool = state.db.pool();
    let profiles = match query.room_id {
        Some(room_id) => database::profile::list_profiles_by_room(pool, &room_id).await?,
        None => database::profile::list_profiles(pool).await?,
    };
    Ok(Json(profiles))
}

/// Publish a profile.
pub async fn create_profile(
    State(state): State<AppState>,
    Json(req): Json<NewProfile>,
) -> Result<(StatusCode, Json<Profile>)> {
    validation::validate_text_field("offer", &req.offer)?;
    validation::validate_text_field("ask", &req.ask)?;

    // Surface a 404 rather than a foreign key failure for unknown users.
    database::user::get_user(state.db.pool(), &req.user_id).await?;

    let profile = database::profile::create_profile(state.db.pool(), req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Apply a partial update to a profile.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>> {
    if let Some(offer) = &update.offer {
        validation::validate_text_field("offer", offer)?;
    }
    if let Some(ask) = &update.ask {
        validation::validate_text_field("ask", ask)?;
    }

    let profile = database::profile::update_profile(state.db.pool(), &id, update).await?;
    Ok(Json(profile))
}
