//! Streak tracking over a storage backend.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use database::models::StreakRecord;

use crate::error::{Result, StreakError};
use crate::state::{day_of, StreakState};
use crate::store::StreakStore;

/// Applies the streak transition for logged actions, serialized per user.
///
/// Two concurrent submissions for the same user would otherwise both read
/// the same stale record and each write an increment; the per-user lock
/// guarantees at most one net increment per calendar day. Different users
/// never contend with each other.
pub struct StreakTracker<S> {
    store: S,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: StreakStore> StreakTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Apply one logged action to the user's streak and return the stored
    /// record.
    ///
    /// The caller has already durably stored the action itself; this update
    /// is separate, all-or-nothing, and not retried here. When the
    /// transition leaves the state unchanged (same-day repeat, backdated
    /// timestamp) no write is issued at all.
    pub async fn record_action(
        &self,
        user_id: &str,
        occurred_at: DateTime<Utc>,
    ) -> Result<StreakRecord> {
        // Tolerate a day of clock skew before rejecting future timestamps.
        if occurred_at > Utc::now() + Duration::hours(24) {
            return Err(StreakError::InvalidInput(format!(
                "action timestamp {} is in the future",
                occurred_at
            )));
        }

        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let day = day_of(occurred_at);
        let existing = self.store.load(user_id).await?;
        let previous = existing.as_ref().map(StreakState::from_record);

        let next = match previous {
            None => StreakState::start(day),
            Some(state) => state.advance(day),
        };

        if let Some(record) = existing {
            if previous == Some(next) {
                debug!(user_id, %day, "Streak unchanged, skipping write");
                return Ok(record);
            }
        }

        let record = next.into_record(user_id.to_string());
        self.store.upsert(&record).await?;
        debug!(
            user_id,
            current = record.current_streak,
            longest = record.longest_streak,
            "Streak updated"
        );

        Ok(record)
    }

    /// Load a user's streak record. `NotFound` when the user has never
    /// logged an action, distinct from a record with a zero streak.
    pub async fn current(&self, user_id: &str) -> Result<StreakRecord> {
        self.store
            .load(user_id)
            .await?
            .ok_or_else(|| StreakError::NotFound(user_id.to_string()))
    }

    async fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::store::MemoryStreakStore;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&format!("2025-03-{day:02}T{hour:02}:00:00Z"))
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn first_action_creates_record() {
        let tracker = StreakTracker::new(MemoryStreakStore::new());

        let record = tracker.record_action("u1", at(1, 9)).await.unwrap();
        assert_eq!(record.current_streak, 1);
        assert_eq!(record.longest_streak, 1);
        assert_eq!(record.last_action_date, Some(at(1, 9).date_naive()));
    }

    #[tokio::test]
    async fn consecutive_days_increment() {
        let tracker = StreakTracker::new(MemoryStreakStore::new());

        for day in 1..=5 {
            tracker.record_action("u1", at(day, 12)).await.unwrap();
        }

        let record = tracker.current("u1").await.unwrap();
        assert_eq!(record.current_streak, 5);
        assert_eq!(record.longest_streak, 5);
    }

    #[tokio::test]
    async fn same_day_repeats_do_not_increment() {
        let tracker = StreakTracker::new(MemoryStreakStore::new());

        tracker.record_action("u1", at(1, 8)).await.unwrap();
        tracker.record_action("u1", at(1, 13)).await.unwrap();
        let record = tracker.record_action("u1", at(1, 22)).await.unwrap();

        assert_eq!(record.current_streak, 1);
        assert_eq!(record.longest_streak, 1);
    }

    #[tokio::test]
    async fn gap_resets_current_and_keeps_longest() {
        let tracker = StreakTracker::new(MemoryStreakStore::new());

        for day in 1..=3 {
            tracker.record_action("u1", at(day, 10)).await.unwrap();
        }
        let record = tracker.record_action("u1", at(6, 10)).await.unwrap();

        assert_eq!(record.current_streak, 1);
        assert_eq!(record.longest_streak, 3);
    }

    #[tokio::test]
    async fn backdated_action_leaves_record_untouched() {
        let tracker = StreakTracker::new(MemoryStreakStore::new());

        tracker.record_action("u1", at(5, 10)).await.unwrap();
        tracker.record_action("u1", at(6, 10)).await.unwrap();
        let record = tracker.record_action("u1", at(2, 10)).await.unwrap();

        assert_eq!(record.current_streak, 2);
        assert_eq!(record.last_action_date, Some(at(6, 10).date_naive()));
    }

    #[tokio::test]
    async fn future_timestamp_rejected_before_any_write() {
        let tracker = StreakTracker::new(MemoryStreakStore::new());

        let result = tracker
            .record_action("u1", Utc::now() + Duration::days(3))
            .await;
        assert!(matches!(result, Err(StreakError::InvalidInput(_))));
        assert!(matches!(
            tracker.current("u1").await,
            Err(StreakError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn current_distinguishes_missing_from_zero() {
        let tracker = StreakTracker::new(MemoryStreakStore::new());
        assert!(matches!(
            tracker.current("nobody").await,
            Err(StreakError::NotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_double_submit_nets_one_increment() {
        let tracker = Arc::new(StreakTracker::new(MemoryStreakStore::new()));

        // Day one baseline.
        tracker.record_action("u1", at(1, 10)).await.unwrap();

        // A burst of submissions on day two, all racing.
        let mut handles = Vec::new();
        for i in 0..16u32 {
            let tracker = Arc::clone(&tracker);
            handles.push(tokio::spawn(async move {
                tracker.record_action("u1", at(2, i % 24)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let record = tracker.current("u1").await.unwrap();
        assert_eq!(record.current_streak, 2);
        assert_eq!(record.longest_streak, 2);
    }

    /// Store that fails every write, for testing failure propagation.
    struct FailingStore {
        inner: MemoryStreakStore,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl StreakStore for FailingStore {
        async fn load(&self, user_id: &str) -> crate::Result<Option<StreakRecord>> {
            self.inner.load(user_id).await
        }

        async fn upsert(&self, record: &StreakRecord) -> crate::Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StreakError::Store(database::DatabaseError::Sqlx(
                    sqlx::Error::PoolClosed,
                )));
            }
            self.inner.upsert(record).await
        }
    }

    #[tokio::test]
    async fn store_failure_surfaces_and_leaves_previous_state() {
        let store = FailingStore {
            inner: MemoryStreakStore::new(),
            fail_writes: AtomicBool::new(false),
        };
        let tracker = StreakTracker::new(store);

        tracker.record_action("u1", at(1, 10)).await.unwrap();

        tracker.store.fail_writes.store(true, Ordering::SeqCst);
        let result = tracker.record_action("u1", at(2, 10)).await;
        assert!(matches!(result, Err(StreakError::Store(_))));

        // The previous record is intact; nothing was partially applied.
        tracker.store.fail_writes.store(false, Ordering::SeqCst);
        let record = tracker.current("u1").await.unwrap();
        assert_eq!(record.current_streak, 1);
        assert_eq!(record.last_action_date, Some(at(1, 10).date_naive()));
    }
}
