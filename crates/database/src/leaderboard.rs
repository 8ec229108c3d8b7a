//! Leaderboard input gathering.
//!
//! Collects one `RankCandidate` per user with a streak record: current
//! streak plus the count of actions inside the trailing seven-day window.
//! Deliberately unordered; sorting and rank assignment are done by the pure
//! ranker in the `streaks` crate so the ordering never depends on storage
//! iteration order.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::RankCandidate;

/// Gather leaderboard candidates as of `now`. Users without a streak record
/// are excluded entirely.
pub async fn rank_candidates(pool: &SqlitePool, now: DateTime<Utc>) -> Result<Vec<RankCandidate>> {
    let week_ago = now - Duration::days(7);

    let candidates = sqlx::query_as::<_, RankCandidate>(
        r#"
        SELECT u.id AS user_id,
               u.display_name,
               u.photo_url,
               s.current_streak,
               (SELECT COUNT(*) FROM actions a
                WHERE a.user_id = u.id AND a.created_at >= ?) AS actions_this_week
        FROM streaks s
        INNER JOIN users u ON u.id = s.user_id
        "#,
    )
    .bind(week_ago)
    .fetch_all(pool)
    .await?;

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::models::{NewAction, StreakRecord};
    use crate::test_util::{insert_user, test_db};

    #[tokio::test]
    async fn test_candidates_require_streak_record() {
        let db = test_db().await;
        let with_streak = insert_user(&db, "Has Streak").await;
        let _without = insert_user(&db, "No Streak").await;

        crate::streak::upsert_streak(
            db.pool(),
            &StreakRecord {
                user_id: with_streak.id.clone(),
                current_streak: 3,
                longest_streak: 5,
                last_action_date: NaiveDate::from_ymd_opt(2025, 3, 15),
            },
        )
        .await
        .unwrap();

        let candidates = rank_candidates(db.pool(), Utc::now()).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].user_id, with_streak.id);
        assert_eq!(candidates[0].current_streak, 3);
        assert_eq!(candidates[0].display_name, "Has Streak");
    }

    #[tokio::test]
    async fn test_weekly_count_uses_rolling_window() {
        let db = test_db().await;
        let user = insert_user(&db, "Window User").await;
        let now = Utc::now();

        crate::streak::upsert_streak(
            db.pool(),
            &StreakRecord {
                user_id: user.id.clone(),
                current_streak: 1,
                longest_streak: 1,
                last_action_date: Some(now.date_naive()),
            },
        )
        .await
        .unwrap();

        let action = |content: &str| NewAction {
            user_id: user.id.clone(),
            room_id: None,
            content: content.to_string(),
            action_type: "connection".to_string(),
        };
        crate::action::create_action(db.pool(), action("in"), now - Duration::days(2))
            .await
            .unwrap();
        crate::action::create_action(db.pool(), action("edge"), now - Duration::days(7))
            .await
            .unwrap();
        crate::action::create_action(db.pool(), action("out"), now - Duration::days(9))
            .await
            .unwrap();

        let candidates = rank_candidates(db.pool(), now).await.unwrap();
        assert_eq!(candidates.len(), 1);
        // Inclusive lower bound: the action exactly seven days old counts.
        assert_eq!(candidates[0].actions_this_week, 2);
    }
}
