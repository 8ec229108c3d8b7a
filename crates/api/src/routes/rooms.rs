//! Room routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use database::models::{NewRoom, Room, RoomUpdate, RoomWithOrganizer};
use database::validation;

use crate::error::Result;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListRoomsQuery {
    pub active: Option<bool>,
}

/// List rooms with organizers and member counts. `?active=true` filters to
/// active rooms.
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<ListRoomsQuery>,
) -> Result<Json<Vec<RoomWithOrganizer>>> {
    let pool = state.db.pool();
    let rooms = if query.active.unwrap_or(false) {
        database::room::list_active_rooms(pool).await?
    } else {
        database::room::list_rooms(pool).await?
    };
    Ok(Json(rooms))
}

/// Get a room (with organizer and member count) by ID.
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoomWithOrganizer>> {
    let room = database::room::get_room_with_organizer(state.db.pool(), &id).await?;
    Ok(Json(room))
}

/// Get a room by its invite slug.
pub async fn get_room_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Room>> {
    let room = database::room::get_room_by_slug(state.db.pool(), &slug).await?;
    Ok(Json(room))
}

/// Create a room.
pub async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<NewRoom>,
) -> Result<(StatusCode, Json<Room>)> {
    validation::validate_text_field("name", &req.name)?;
    validation::validate_text_field("slug", &req.slug)?;

    database::user::get_user(state.db.pool(), &req.organizer_id).await?;

    let room = database::room::create_room(state.db.pool(), req).await?;
    info!(room_id = %room.id, slug = %room.slug, "Room created");
    Ok((StatusCode::CREATED, Json(room)))
}

/// Apply a partial update to a room.
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<RoomUpdate>,
) -> Result<Json<Room>> {
    if let Some(name) = &update.name {
        validation::validate_text_field("name", name)?;
    }

    let room = database::room::update_room(state.db.pool(), &id, update).await?;
    Ok(Json(room))
}
