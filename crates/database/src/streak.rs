//! Streak record storage.
//!
//! One row per user, keyed by `user_id`. The transition logic that decides
//! how a streak evolves lives in the `streaks` crate; this module only loads
//! and upserts the persisted state.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::StreakRecord;

/// Load a user's streak record, if one exists.
pub async fn get_streak_by_user(pool: &SqlitePool, user_id: &str) -> Result<Option<StreakRecord>> {
    let record = sqlx::query_as::<_, StreakRecord>(
        r#"
        SELECT user_id, current_streak, longest_streak, last_action_date
        FROM streaks
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Load a user's streak record, surfacing `NotFound` when none exists.
/// Direct streak lookups distinguish "no record" from "zero streak".
pub async fn require_streak_by_user(pool: &SqlitePool, user_id: &str) -> Result<StreakRecord> {
    get_streak_by_user(pool, user_id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Streak",
            id: user_id.to_string(),
        })
}

/// Write a user's streak record, replacing any previous one. A single
/// statement, so the update is all-or-nothing.
pub async fn upsert_streak(pool: &SqlitePool, record: &StreakRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO streaks (id, user_id, current_streak, longest_streak, last_action_date)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            current_streak = excluded.current_streak,
            longest_streak = excluded.longest_streak,
            last_action_date = excluded.last_action_date
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&record.user_id)
    .bind(record.current_streak)
    .bind(record.longest_streak)
    .bind(record.last_action_date)
    .execute(pool)
    .await?;

    Ok(())
}
