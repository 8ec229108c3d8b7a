//! Room membership CRUD operations.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{Membership, NewMembership};

/// Join a user to a room.
pub async fn create_membership(pool: &SqlitePool, new_membership: NewMembership) -> Result<Membership> {
    let membership = Membership {
        id: Uuid::new_v4().to_string(),
        user_id: new_membership.user_id,
        room_id: new_membership.room_id,
        joined_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO memberships (id, user_id, room_id, joined_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&membership.id)
    .bind(&membership.user_id)
    .bind(&membership.room_id)
    .bind(membership.joined_at)
    .execute(pool)
    .await?;

    Ok(membership)
}

/// List a user's memberships.
pub async fn list_memberships_by_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Membership>> {
    let memberships = sqlx::query_as::<_, Membership>(
        r#"
        SELECT id, user_id, room_id, joined_at
        FROM memberships
        WHERE user_id = ?
        ORDER BY joined_at
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(memberships)
}

/// List a room's memberships.
pub async fn list_memberships_by_room(pool: &SqlitePool, room_id: &str) -> Result<Vec<Membership>> {
    let memberships = sqlx::query_as::<_, Membership>(
        r#"
        SELECT id, user_id, room_id, joined_at
        FROM memberships
        WHERE room_id = ?
        ORDER BY joined_at
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(memberships)
}

/// Get a user's membership in a specific room, if any.
pub async fn get_membership_for_room(
    pool: &SqlitePool,
    user_id: &str,
    room_id: &str,
) -> Result<Option<Membership>> {
    let membership = sqlx::query_as::<_, Membership>(
        r#"
        SELECT id, user_id, room_id, joined_at
        FROM memberships
        WHERE user_id = ? AND room_id = ?
        "#,
    )
    .bind(user_id)
    .bind(room_id)
    .fetch_optional(pool)
    .await?;

    Ok(membership)
}

/// Remove a membership by ID.
pub async fn delete_membership(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM memberships
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Membership",
            id: id.to_string(),
        });
    }

    Ok(())
}
