//! Database models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A registered attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// UUID assigned at registration.
    pub id: String,
    /// Unique login email.
    pub email: String,
    /// Argon2 password hash. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password: String,
    /// Name shown on profiles and the leaderboard.
    pub display_name: String,
    /// Optional avatar URL.
    pub photo_url: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// A user's offer/ask networking profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// What the user can offer to others.
    pub offer: String,
    /// What the user is looking for.
    pub ask: String,
    /// External links (portfolio, LinkedIn, ...), stored as a JSON array.
    pub links: Json<Vec<String>>,
    /// Room the profile is currently published in, if any.
    pub room_id: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile joined with its owning user, for listing views.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileWithUser {
    #[serde(flatten)]
    pub profile: Profile,
    pub user: User,
}

/// An event room ("circle") that users join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub id: String,
    pub name: String,
    /// URL-friendly unique identifier, used for invite links.
    pub slug: String,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// User who created the room.
    pub organizer_id: String,
    pub is_active: bool,
    pub capacity: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Room joined with its organizer and member count, for listing views.
#[derive(Debug, Clone, Serialize)]
pub struct RoomWithOrganizer {
    #[serde(flatten)]
    pub room: Room,
    pub organizer: User,
    pub participant_count: i64,
}

/// A logged networking action (e.g. "made a connection").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Action {
    pub id: String,
    pub user_id: String,
    /// Room the action happened in, if any.
    pub room_id: Option<String>,
    /// Free-form description of what happened.
    pub content: String,
    /// Category tag, e.g. "connection" or "contribution".
    pub action_type: String,
    pub created_at: DateTime<Utc>,
}

/// Action joined with the acting user, for feed views.
#[derive(Debug, Clone, Serialize)]
pub struct ActionWithUser {
    #[serde(flatten)]
    pub action: Action,
    pub user: User,
}

/// A directed connection between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Connection {
    pub id: String,
    pub user_id: String,
    pub connected_user_id: String,
    pub room_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user's membership in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Membership {
    pub id: String,
    pub user_id: String,
    pub room_id: String,
    pub joined_at: DateTime<Utc>,
}

/// Per-user streak state. At most one row per user, created lazily on the
/// first logged action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StreakRecord {
    pub user_id: String,
    /// Consecutive-day count of activity.
    pub current_streak: i64,
    /// Historical maximum of `current_streak`.
    pub longest_streak: i64,
    /// Calendar day of the most recent action that affected the streak.
    pub last_action_date: Option<NaiveDate>,
}

/// One user's raw leaderboard inputs, gathered per request. Ordering and
/// rank assignment happen in the streaks crate, not in SQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct RankCandidate {
    pub user_id: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub current_streak: i64,
    pub actions_this_week: i64,
}

/// Payload for creating a user. `password` is the already-hashed value;
/// hashing happens at the API edge.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub photo_url: Option<String>,
}

/// Partial user update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Payload for creating a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfile {
    pub user_id: String,
    pub offer: String,
    pub ask: String,
    #[serde(default)]
    pub links: Vec<String>,
    pub room_id: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
}

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub offer: Option<String>,
    pub ask: Option<String>,
    pub links: Option<Vec<String>>,
    pub room_id: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
}

/// Payload for creating a room.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRoom {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub organizer_id: String,
    pub capacity: Option<i64>,
}

/// Partial room update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
    pub capacity: Option<i64>,
}

/// Payload for logging an action.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAction {
    pub user_id: String,
    pub room_id: Option<String>,
    pub content: String,
    pub action_type: String,
}

/// Payload for creating a connection.
#[derive(Debug, Clone, Deserialize)]
pub struct NewConnection {
    pub user_id: String,
    pub connected_user_id: String,
    pub room_id: Option<String>,
}

/// Payload for joining a room.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMembership {
    pub user_id: String,
    pub room_id: String,
}
