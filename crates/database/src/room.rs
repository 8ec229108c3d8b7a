//! Event room CRUD operations.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{NewRoom, Room, RoomUpdate, RoomWithOrganizer, User};

const ROOM_COLUMNS: &str =
    "r.id, r.name, r.slug, r.description, r.event_date, r.location, r.organizer_id, \
     r.is_active, r.capacity, r.created_at";

const ORGANIZER_COLUMNS: &str =
    "u.id AS u_id, u.email AS u_email, u.password AS u_password, \
     u.display_name AS u_display_name, u.photo_url AS u_photo_url, u.created_at AS u_created_at";

fn room_with_organizer_from_row(row: &SqliteRow) -> std::result::Result<RoomWithOrganizer, sqlx::Error> {
    Ok(RoomWithOrganizer {
        room: Room {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            event_date: row.try_get("event_date")?,
            location: row.try_get("location")?,
            organizer_id: row.try_get("organizer_id")?,
            is_active: row.try_get("is_active")?,
            capacity: row.try_get("capacity")?,
            created_at: row.try_get("created_at")?,
        },
        organizer: User {
            id: row.try_get("u_id")?,
            email: row.try_get("u_email")?,
            password: row.try_get("u_password")?,
            display_name: row.try_get("u_display_name")?,
            photo_url: row.try_get("u_photo_url")?,
            created_at: row.try_get("u_created_at")?,
        },
        participant_count: row.try_get("participant_count")?,
    })
}

/// Create a new room. New rooms start active.
pub async fn create_room(pool: &SqlitePool, new_room: NewRoom) -> Result<Room> {
    let room = Room {
        id: Uuid::new_v4().to_string(),
        name: new_room.name,
        slug: new_room.slug,
        description: new_room.description,
        event_date: new_room.event_date,
        location: new_room.location,
        organizer_id: new_room.organizer_id,
        is_active: true,
        capacity: new_room.capacity,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO rooms (id, name, slug, description, event_date, location, organizer_id,
                           is_active, capacity, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&room.id)
    .bind(&room.name)
    .bind(&room.slug)
    .bind(&room.description)
    .bind(room.event_date)
    .bind(&room.location)
    .bind(&room.organizer_id)
    .bind(room.is_active)
    .bind(room.capacity)
    .bind(room.created_at)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Room",
                    id: room.slug.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(room)
}

/// Get a room by ID.
pub async fn get_room(pool: &SqlitePool, id: &str) -> Result<Room> {
    sqlx::query_as::<_, Room>(
        r#"
        SELECT id, name, slug, description, event_date, location, organizer_id,
               is_active, capacity, created_at
        FROM rooms
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Room",
        id: id.to_string(),
    })
}

/// Get a room by its invite slug.
pub async fn get_room_by_slug(pool: &SqlitePool, slug: &str) -> Result<Room> {
    sqlx::query_as::<_, Room>(
        r#"
        SELECT id, name, slug, description, event_date, location, organizer_id,
               is_active, capacity, created_at
        FROM rooms
        WHERE slug = ?
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Room",
        id: slug.to_string(),
    })
}

/// Get a room joined with its organizer and member count.
pub async fn get_room_with_organizer(pool: &SqlitePool, id: &str) -> Result<RoomWithOrganizer> {
    let query = format!(
        r#"
        SELECT {ROOM_COLUMNS}, {ORGANIZER_COLUMNS},
               (SELECT COUNT(*) FROM memberships m WHERE m.room_id = r.id) AS participant_count
        FROM rooms r
        INNER JOIN users u ON u.id = r.organizer_id
        WHERE r.id = ?
        "#
    );

    let row = sqlx::query(&query).bind(id).fetch_optional(pool).await?;

    match row {
        Some(row) => Ok(room_with_organizer_from_row(&row)?),
        None => Err(DatabaseError::NotFound {
            entity: "Room",
            id: id.to_string(),
        }),
    }
}

/// Apply a partial update to a room. Fields left as `None` keep their
/// stored values.
pub async fn update_room(pool: &SqlitePool, id: &str, update: RoomUpdate) -> Result<Room> {
    let result = sqlx::query(
        r#"
        UPDATE rooms
        SET name = COALESCE(?, name),
            description = COALESCE(?, description),
            event_date = COALESCE(?, event_date),
            location = COALESCE(?, location),
            is_active = COALESCE(?, is_active),
            capacity = COALESCE(?, capacity)
        WHERE id = ?
        "#,
    )
    .bind(&update.name)
    .bind(&update.description)
    .bind(update.event_date)
    .bind(&update.location)
    .bind(update.is_active)
    .bind(update.capacity)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Room",
            id: id.to_string(),
        });
    }

    get_room(pool, id).await
}

/// List all rooms with organizers and member counts.
pub async fn list_rooms(pool: &SqlitePool) -> Result<Vec<RoomWithOrganizer>> {
    list_rooms_filtered(pool, false).await
}

/// List active rooms with organizers and member counts.
pub async fn list_active_rooms(pool: &SqlitePool) -> Result<Vec<RoomWithOrganizer>> {
    list_rooms_filtered(pool, true).await
}

async fn list_rooms_filtered(pool: &SqlitePool, active_only: bool) -> Result<Vec<RoomWithOrganizer>> {
    let filter = if active_only { "WHERE r.is_active = 1" } else { "" };
    let query = format!(
        r#"
        SELECT {ROOM_COLUMNS}, {ORGANIZER_COLUMNS},
               (SELECT COUNT(*) FROM memberships m WHERE m.room_id = r.id) AS participant_count
        FROM rooms r
        INNER JOIN users u ON u.id = r.organizer_id
        {filter}
        ORDER BY r.created_at DESC
        "#
    );

    let rows = sqlx::query(&query).fetch_all(pool).await?;

    let mut rooms = Vec::with_capacity(rows.len());
    for row in &rows {
        rooms.push(room_with_organizer_from_row(row)?);
    }

    Ok(rooms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewMembership;
    use crate::test_util::{insert_user, test_db};

    #[tokio::test]
    async fn test_room_crud() {
        let db = test_db().await;
        let organizer = insert_user(&db, "Org User").await;

        let room = create_room(
            db.pool(),
            NewRoom {
                name: "Tech Summit 2025".to_string(),
                slug: "tech-summit-2025".to_string(),
                description: Some("Annual technology conference".to_string()),
                event_date: None,
                location: Some("San Francisco, CA".to_string()),
                organizer_id: organizer.id.clone(),
                capacity: Some(200),
            },
        )
        .await
        .unwrap();
        assert!(room.is_active);

        let by_slug = get_room_by_slug(db.pool(), "tech-summit-2025").await.unwrap();
        assert_eq!(by_slug.id, room.id);

        let updated = update_room(
            db.pool(),
            &room.id,
            RoomUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(!updated.is_active);
        assert_eq!(updated.name, "Tech Summit 2025");
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let db = test_db().await;
        let organizer = insert_user(&db, "Org User").await;

        let new_room = |slug: &str| NewRoom {
            name: "Room".to_string(),
            slug: slug.to_string(),
            description: None,
            event_date: None,
            location: None,
            organizer_id: organizer.id.clone(),
            capacity: None,
        };

        create_room(db.pool(), new_room("same-slug")).await.unwrap();
        let result = create_room(db.pool(), new_room("same-slug")).await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_active_filter_and_participant_count() {
        let db = test_db().await;
        let organizer = insert_user(&db, "Org User").await;
        let member = insert_user(&db, "Member User").await;

        let active = create_room(
            db.pool(),
            NewRoom {
                name: "Active Room".to_string(),
                slug: "active-room".to_string(),
                description: None,
                event_date: None,
                location: None,
                organizer_id: organizer.id.clone(),
                capacity: None,
            },
        )
        .await
        .unwrap();

        let inactive = create_room(
            db.pool(),
            NewRoom {
                name: "Closed Room".to_string(),
                slug: "closed-room".to_string(),
                description: None,
                event_date: None,
                location: None,
                organizer_id: organizer.id.clone(),
                capacity: None,
            },
        )
        .await
        .unwrap();
        update_room(
            db.pool(),
            &inactive.id,
            RoomUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        crate::membership::create_membership(
            db.pool(),
            NewMembership {
                user_id: member.id.clone(),
                room_id: active.id.clone(),
            },
        )
        .await
        .unwrap();

        let all = list_rooms(db.pool()).await.unwrap();
        assert_eq!(all.len(), 2);

        let active_rooms = list_active_rooms(db.pool()).await.unwrap();
        assert_eq!(active_rooms.len(), 1);
        assert_eq!(active_rooms[0].room.id, active.id);
        assert_eq!(active_rooms[0].participant_count, 1);
        assert_eq!(active_rooms[0].organizer.id, organizer.id);
    }
}
