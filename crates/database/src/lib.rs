//! SQLite persistence layer for Mixer.
//!
//! This crate provides async database operations for users, profiles, rooms,
//! actions, connections, memberships, and streaks using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, models::NewUser, user};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:mixer.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let created = user::create_user(
//!         db.pool(),
//!         NewUser {
//!             email: "sarah@techcorp.com".to_string(),
//!             password: "argon2-hash".to_string(),
//!             display_name: "Sarah Chen".to_string(),
//!             photo_url: None,
//!         },
//!     )
//!     .await?;
//!     println!("created user {}", created.id);
//!
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod connection;
pub mod error;
pub mod leaderboard;
pub mod membership;
pub mod models;
pub mod profile;
pub mod room;
pub mod seed;
pub mod streak;
pub mod user;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{
    Action, ActionWithUser, Connection, Membership, NewAction, NewConnection, NewMembership,
    NewProfile, NewRoom, NewUser, Profile, ProfileUpdate, ProfileWithUser, RankCandidate, Room,
    RoomUpdate, RoomWithOrganizer, StreakRecord, User, UserUpdate,
};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/mixer.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}


#[cfg(test)]
mod tests {
    use super::test_util::{insert_user, test_db};
    use super::*;
    use crate::models::UserUpdate;

    #[tokio::test]
    async fn test_user_crud() {
        let db = test_db().await;

        // Create
        let user = insert_user(&db, "Alice Example").await;
        assert_eq!(user.display_name, "Alice Example");

        // Read
        let fetched = user::get_user(db.pool(), &user.id).await.unwrap();
        assert_eq!(fetched.email, "alice.example@example.com");

        // Read by email
        let by_email = user::get_user_by_email(db.pool(), &user.email)
            .await
            .unwrap()
            .expect("user should exist");
        assert_eq!(by_email.id, user.id);

        // Update
        user::update_user(
            db.pool(),
            &user.id,
            UserUpdate {
                display_name: Some("Alice E.".to_string()),
                photo_url: None,
            },
        )
        .await
        .unwrap();
        let fetched = user::get_user(db.pool(), &user.id).await.unwrap();
        assert_eq!(fetched.display_name, "Alice E.");
        // Untouched fields survive a partial update.
        assert_eq!(fetched.email, user.email);

        // Missing user surfaces NotFound
        let result = user::get_user(db.pool(), "missing").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = test_db().await;
        insert_user(&db, "Bob Example").await;

        let result = user::create_user(
            db.pool(),
            models::NewUser {
                email: "bob.example@example.com".to_string(),
                password: "hash".to_string(),
                display_name: "Bob Clone".to_string(),
                photo_url: None,
            },
        )
        .await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));
    }
}
