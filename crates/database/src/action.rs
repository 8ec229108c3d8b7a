//! Action log CRUD operations.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{Action, ActionWithUser, NewAction, User};

const ACTION_COLUMNS: &str = "a.id, a.user_id, a.room_id, a.content, a.action_type, a.created_at";

const USER_COLUMNS: &str =
    "u.id AS u_id, u.email AS u_email, u.password AS u_password, \
     u.display_name AS u_display_name, u.photo_url AS u_photo_url, u.created_at AS u_created_at";

fn action_with_user_from_row(row: &SqliteRow) -> std::result::Result<ActionWithUser, sqlx::Error> {
    Ok(ActionWithUser {
        action: Action {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            room_id: row.try_get("room_id")?,
            content: row.try_get("content")?,
            action_type: row.try_get("action_type")?,
            created_at: row.try_get("created_at")?,
        },
        user: User {
            id: row.try_get("u_id")?,
            email: row.try_get("u_email")?,
            password: row.try_get("u_password")?,
            display_name: row.try_get("u_display_name")?,
            photo_url: row.try_get("u_photo_url")?,
            created_at: row.try_get("u_created_at")?,
        },
    })
}

/// Record a new action at the given timestamp.
pub async fn create_action(
    pool: &SqlitePool,
    new_action: NewAction,
    created_at: DateTime<Utc>,
) -> Result<Action> {
    let action = Action {
        id: Uuid::new_v4().to_string(),
        user_id: new_action.user_id,
        room_id: new_action.room_id,
        content: new_action.content,
        action_type: new_action.action_type,
        created_at,
    };

    sqlx::query(
        r#"
        INSERT INTO actions (id, user_id, room_id, content, action_type, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&action.id)
    .bind(&action.user_id)
    .bind(&action.room_id)
    .bind(&action.content)
    .bind(&action.action_type)
    .bind(action.created_at)
    .execute(pool)
    .await?;

    Ok(action)
}

/// Get an action by ID.
pub async fn get_action(pool: &SqlitePool, id: &str) -> Result<Action> {
    sqlx::query_as::<_, Action>(
        r#"
        SELECT id, user_id, room_id, content, action_type, created_at
        FROM actions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Action",
        id: id.to_string(),
    })
}

/// List a room's actions, newest first, with acting users.
pub async fn list_actions_by_room(pool: &SqlitePool, room_id: &str) -> Result<Vec<ActionWithUser>> {
    let query = format!(
        r#"
        SELECT {ACTION_COLUMNS}, {USER_COLUMNS}
        FROM actions a
        INNER JOIN users u ON u.id = a.user_id
        WHERE a.room_id = ?
        ORDER BY a.created_at DESC
        "#
    );

    let rows = sqlx::query(&query).bind(room_id).fetch_all(pool).await?;

    let mut actions = Vec::with_capacity(rows.len());
    for row in &rows {
        actions.push(action_with_user_from_row(row)?);
    }

    Ok(actions)
}

/// List a user's actions, newest first.
pub async fn list_actions_by_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Action>> {
    let actions = sqlx::query_as::<_, Action>(
        r#"
        SELECT id, user_id, room_id, content, action_type, created_at
        FROM actions
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(actions)
}

/// List the most recent actions across all rooms, with acting users.
pub async fn list_recent_actions(pool: &SqlitePool, limit: i64) -> Result<Vec<ActionWithUser>> {
    let query = format!(
        r#"
        SELECT {ACTION_COLUMNS}, {USER_COLUMNS}
        FROM actions a
        INNER JOIN users u ON u.id = a.user_id
        ORDER BY a.created_at DESC
        LIMIT ?
        "#
    );

    let rows = sqlx::query(&query).bind(limit).fetch_all(pool).await?;

    let mut actions = Vec::with_capacity(rows.len());
    for row in &rows {
        actions.push(action_with_user_from_row(row)?);
    }

    Ok(actions)
}

/// Count a user's actions recorded at or after `since`. The leaderboard uses
/// this with a rolling seven-day window.
pub async fn count_actions_since(
    pool: &SqlitePool,
    user_id: &str,
    since: DateTime<Utc>,
) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM actions
        WHERE user_id = ? AND created_at >= ?
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
