//! User routes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use database::models::{NewUser, User, UserUpdate};
use database::validation;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Registration payload. The raw password is hashed before it reaches the
/// database layer.
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub photo_url: Option<String>,
}

/// Get a user by ID.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let user = database::user::get_user(state.db.pool(), &id).await?;
    Ok(Json(user))
}

/// Register a new user.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    validation::validate_email(&req.email)?;
    validation::validate_display_name(&req.display_name)?;
    if req.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let password = hash_password(&req.password)?;
    let user = database::user::create_user(
        state.db.pool(),
        NewUser {
            email: req.email,
            password,
            display_name: req.display_name,
            photo_url: req.photo_url,
        },
    )
    .await?;

    info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Apply a partial update to a user.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>> {
    if let Some(name) = &update.display_name {
        validation::validate_display_name(name)?;
    }

    let user = database::user::update_user(state.db.pool(), &id, update).await?;
    Ok(Json(user))
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}
