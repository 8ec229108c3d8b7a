//! Streak tracking and leaderboard ranking for Mixer.
//!
//! Users keep a streak going by logging at least one networking action per
//! calendar day. This crate owns the rules for how a streak evolves and how
//! users are ordered on the leaderboard:
//!
//! - [`StreakState`] is the pure day-based transition: same day leaves the
//!   counters alone, the next day increments, a gap of two or more days
//!   resets the current streak to 1 without touching the longest.
//! - [`StreakTracker`] applies the transition behind a [`StreakStore`],
//!   serializing updates per user so a rapid double-submit nets at most one
//!   increment per day.
//! - [`leaderboard::rank`] produces the deterministic ordering (current
//!   streak, then weekly activity, then display name).
//!
//! Storage is pluggable: [`SqliteStreakStore`] persists through the
//! `database` crate, [`MemoryStreakStore`] backs tests and demos.

pub mod error;
pub mod leaderboard;
pub mod state;
pub mod store;
pub mod tracker;

pub use database::models::StreakRecord;
pub use error::{Result, StreakError};
pub use leaderboard::{rank, LeaderboardEntry, RankCandidate};
pub use state::{day_of, StreakState};
pub use store::{MemoryStreakStore, SqliteStreakStore, StreakStore};
pub use tracker::StreakTracker;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    use database::models::{NewAction, NewUser};
    use database::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn insert_user(db: &Database, display_name: &str) -> database::models::User {
        database::user::create_user(
            db.pool(),
            NewUser {
                email: format!(
                    "{}@example.com",
                    display_name.to_lowercase().replace(' ', ".")
                ),
                password: "hash".to_string(),
                display_name: display_name.to_string(),
                photo_url: None,
            },
        )
        .await
        .unwrap()
    }

    fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        now - Duration::days(days)
    }

    async fn log_action(db: &Database, tracker: &StreakTracker<SqliteStreakStore>, user_id: &str, at: DateTime<Utc>) {
        database::action::create_action(
            db.pool(),
            NewAction {
                user_id: user_id.to_string(),
                room_id: None,
                content: "met someone new".to_string(),
                action_type: "connection".to_string(),
            },
            at,
        )
        .await
        .unwrap();
        tracker.record_action(user_id, at).await.unwrap();
    }

    #[tokio::test]
    async fn streaks_feed_the_leaderboard_end_to_end() {
        let db = test_db().await;
        let tracker = StreakTracker::new(SqliteStreakStore::new(db.clone()));
        let now = Utc::now();

        // Ana: three consecutive days ending today.
        let ana = insert_user(&db, "Ana Streaker").await;
        for d in (0..3).rev() {
            log_action(&db, &tracker, &ana.id, days_ago(now, d)).await;
        }

        // Ben: three consecutive days, then a two-day gap, then today.
        let ben = insert_user(&db, "Ben Gapped").await;
        for d in (3..6).rev() {
            log_action(&db, &tracker, &ben.id, days_ago(now, d)).await;
        }
        log_action(&db, &tracker, &ben.id, now).await;

        // Cara: registered, never logged anything.
        let _cara = insert_user(&db, "Cara Quiet").await;

        let ana_streak = tracker.current(&ana.id).await.unwrap();
        assert_eq!(ana_streak.current_streak, 3);
        assert_eq!(ana_streak.longest_streak, 3);

        let ben_streak = tracker.current(&ben.id).await.unwrap();
        assert_eq!(ben_streak.current_streak, 1);
        assert_eq!(ben_streak.longest_streak, 3);

        let candidates = database::leaderboard::rank_candidates(db.pool(), now)
            .await
            .unwrap();
        // Cara has no streak record and is not a candidate.
        assert_eq!(candidates.len(), 2);

        let entries = rank(candidates.clone(), 10);
        assert_eq!(entries[0].user_id, ana.id);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].user_id, ben.id);
        assert_eq!(entries[1].rank, 2);

        // Truncation keeps the top of the same ordering.
        let top_one = rank(candidates, 1);
        assert_eq!(top_one.len(), 1);
        assert_eq!(top_one[0].user_id, ana.id);
    }
}
