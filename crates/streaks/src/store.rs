//! Streak storage backends.
//!
//! The tracker and ranker only ever see the [`StreakStore`] capability
//! (`load` + `upsert`), so they run unchanged against SQLite in production
//! and a plain map in tests and demos.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use database::models::StreakRecord;
use database::Database;

use crate::error::Result;

/// Load/upsert capability over per-user streak records.
#[async_trait]
pub trait StreakStore: Send + Sync {
    /// Load a user's record, if any.
    async fn load(&self, user_id: &str) -> Result<Option<StreakRecord>>;

    /// Write a record, replacing any previous one for the same user.
    async fn upsert(&self, record: &StreakRecord) -> Result<()>;
}

/// SQLite-backed store.
#[derive(Debug, Clone)]
pub struct SqliteStreakStore {
    db: Database,
}

impl SqliteStreakStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StreakStore for SqliteStreakStore {
    async fn load(&self, user_id: &str) -> Result<Option<StreakRecord>> {
        Ok(database::streak::get_streak_by_user(self.db.pool(), user_id).await?)
    }

    async fn upsert(&self, record: &StreakRecord) -> Result<()> {
        Ok(database::streak::upsert_streak(self.db.pool(), record).await?)
    }
}

/// In-memory store for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStreakStore {
    records: RwLock<HashMap<String, StreakRecord>>,
}

impl MemoryStreakStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StreakStore for MemoryStreakStore {
    async fn load(&self, user_id: &str) -> Result<Option<StreakRecord>> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, record: &StreakRecord) -> Result<()> {
        self.records
            .write()
            .await
            .insert(record.user_id.clone(), record.clone());
        Ok(())
    }
}
