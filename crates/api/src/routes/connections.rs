//! Connection routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use database::models::{Connection, NewConnection};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// List a user's connections, in either direction.
pub async fn list_connections(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Connection>>> {
    let connections =
        database::connection::list_connections_by_user(state.db.pool(), &user_id).await?;
    Ok(Json(connections))
}

/// Connect two users. Rejected if they are already connected in either
/// direction.
pub async fn create_connection(
    State(state): State<AppState>,
    Json(req): Json<NewConnection>,
) -> Result<(StatusCode, Json<Connection>)> {
    let pool = state.db.pool();

    database::user::get_user(pool, &req.user_id).await?;
    database::user::get_user(pool, &req.connected_user_id).await?;

    if database::connection::connection_exists(pool, &req.user_id, &req.connected_user_id).await? {
        return Err(ApiError::Conflict("connection already exists".to_string()));
    }

    let connection = database::connection::create_connection(pool, req).await?;
    info!(
        user_id = %connection.user_id,
        connected_user_id = %connection.connected_user_id,
        "Connection created"
    );
    Ok((StatusCode::CREATED, Json(connection)))
}
