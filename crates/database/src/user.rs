//! User CRUD operations.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{NewUser, User, UserUpdate};

/// Create a new user. The id and creation timestamp are assigned here.
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User> {
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: new_user.email,
        password: new_user.password,
        display_name: new_user.display_name,
        photo_url: new_user.photo_url,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO users (id, email, password, display_name, photo_url, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.password)
    .bind(&user.display_name)
    .bind(&user.photo_url)
    .bind(user.created_at)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "User",
                    id: user.email.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(user)
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password, display_name, photo_url, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Get a user by email, if one exists. Used for duplicate checks at
/// registration, so absence is not an error here.
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password, display_name, photo_url, created_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Apply a partial update to a user. Fields left as `None` keep their
/// stored values.
pub async fn update_user(pool: &SqlitePool, id: &str, update: UserUpdate) -> Result<User> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET display_name = COALESCE(?, display_name),
            photo_url = COALESCE(?, photo_url)
        WHERE id = ?
        "#,
    )
    .bind(&update.display_name)
    .bind(&update.photo_url)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        });
    }

    get_user(pool, id).await
}

/// Delete a user by ID. Profiles, actions, connections, memberships and the
/// streak record cascade.
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
