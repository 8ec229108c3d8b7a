//! Route handlers for the API server.

pub mod actions;
pub mod connections;
pub mod health;
pub mod leaderboard;
pub mod memberships;
pub mod profiles;
pub mod rooms;
pub mod streaks;
pub mod users;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Users
        .route("/api/users", post(users::create_user))
        .route(
            "/api/users/:id",
            get(users::get_user).patch(users::update_user),
        )
        // Profiles
        .route(
            "/api/profiles",
            get(profiles::list_profiles).post(profiles::create_profile),
        )
        .route(
            "/api/profiles/:id",
            get(profiles::get_profile).patch(profiles::update_profile),
        )
        .route("/api/profiles/user/:user_id", get(profiles::get_profile_by_user))
        // Rooms
        .route("/api/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/api/rooms/:id",
            get(rooms::get_room).patch(rooms::update_room),
        )
        .route("/api/rooms/slug/:slug", get(rooms::get_room_by_slug))
        // Actions
        .route(
            "/api/actions",
            get(actions::list_actions).post(actions::create_action),
        )
        // Connections
        .route("/api/connections", post(connections::create_connection))
        .route("/api/connections/:user_id", get(connections::list_connections))
        // Memberships
        .route("/api/memberships", post(memberships::join_room))
        .route("/api/memberships/:id", delete(memberships::leave_room))
        .route("/api/memberships/user/:user_id", get(memberships::list_by_user))
        .route("/api/memberships/room/:room_id", get(memberships::list_by_room))
        // Streaks and leaderboard
        .route("/api/streaks/:user_id", get(streaks::get_streak))
        .route("/api/leaderboard", get(leaderboard::get_leaderboard))
}
