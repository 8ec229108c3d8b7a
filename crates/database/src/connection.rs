//! Connection CRUD operations.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{Connection, NewConnection};

/// Create a connection between two users.
pub async fn create_connection(pool: &SqlitePool, new_connection: NewConnection) -> Result<Connection> {
    let connection = Connection {
        id: Uuid::new_v4().to_string(),
        user_id: new_connection.user_id,
        connected_user_id: new_connection.connected_user_id,
        room_id: new_connection.room_id,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO connections (id, user_id, connected_user_id, room_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&connection.id)
    .bind(&connection.user_id)
    .bind(&connection.connected_user_id)
    .bind(&connection.room_id)
    .bind(connection.created_at)
    .execute(pool)
    .await?;

    Ok(connection)
}

/// Get a connection by ID.
pub async fn get_connection(pool: &SqlitePool, id: &str) -> Result<Connection> {
    sqlx::query_as::<_, Connection>(
        r#"
        SELECT id, user_id, connected_user_id, room_id, created_at
        FROM connections
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Connection",
        id: id.to_string(),
    })
}

/// List connections involving a user, in either direction.
pub async fn list_connections_by_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Connection>> {
    let connections = sqlx::query_as::<_, Connection>(
        r#"
        SELECT id, user_id, connected_user_id, room_id, created_at
        FROM connections
        WHERE user_id = ? OR connected_user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(connections)
}

/// Check whether two users are already connected, in either direction.
pub async fn connection_exists(
    pool: &SqlitePool,
    user_id: &str,
    connected_user_id: &str,
) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM connections
        WHERE (user_id = ? AND connected_user_id = ?)
           OR (user_id = ? AND connected_user_id = ?)
        "#,
    )
    .bind(user_id)
    .bind(connected_user_id)
    .bind(connected_user_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{insert_user, test_db};

    #[tokio::test]
    async fn test_connection_exists_either_direction() {
        let db = test_db().await;
        let alice = insert_user(&db, "Alice A").await;
        let bob = insert_user(&db, "Bob B").await;

        assert!(!connection_exists(db.pool(), &alice.id, &bob.id).await.unwrap());

        create_connection(
            db.pool(),
            NewConnection {
                user_id: alice.id.clone(),
                connected_user_id: bob.id.clone(),
                room_id: None,
            },
        )
        .await
        .unwrap();

        assert!(connection_exists(db.pool(), &alice.id, &bob.id).await.unwrap());
        // Reverse direction also counts as connected.
        assert!(connection_exists(db.pool(), &bob.id, &alice.id).await.unwrap());

        let for_bob = list_connections_by_user(db.pool(), &bob.id).await.unwrap();
        assert_eq!(for_bob.len(), 1);
    }
}
