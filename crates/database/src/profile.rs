//! Offer/ask profile CRUD operations.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{NewProfile, Profile, ProfileUpdate, ProfileWithUser, User};

const PROFILE_COLUMNS: &str =
    "p.id, p.user_id, p.offer, p.ask, p.links, p.room_id, p.bio, p.role, p.company, \
     p.created_at, p.updated_at";

const USER_COLUMNS: &str =
    "u.id AS u_id, u.email AS u_email, u.password AS u_password, \
     u.display_name AS u_display_name, u.photo_url AS u_photo_url, u.created_at AS u_created_at";

fn profile_with_user_from_row(row: &SqliteRow) -> std::result::Result<ProfileWithUser, sqlx::Error> {
    Ok(ProfileWithUser {
        profile: Profile {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            offer: row.try_get("offer")?,
            ask: row.try_get("ask")?,
            links: row.try_get("links")?,
            room_id: row.try_get("room_id")?,
            bio: row.try_get("bio")?,
            role: row.try_get("role")?,
            company: row.try_get("company")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        },
        user: User {
            id: row.try_get("u_id")?,
            email: row.try_get("u_email")?,
            password: row.try_get("u_password")?,
            display_name: row.try_get("u_display_name")?,
            photo_url: row.try_get("u_photo_url")?,
            created_at: row.try_get("u_created_at")?,
        },
    })
}

/// Create a profile for a user.
pub async fn create_profile(pool: &SqlitePool, new_profile: NewProfile) -> Result<Profile> {
    let now = Utc::now();
    let profile = Profile {
        id: Uuid::new_v4().to_string(),
        user_id: new_profile.user_id,
        offer: new_profile.offer,
        ask: new_profile.ask,
        links: Json(new_profile.links),
        room_id: new_profile.room_id,
        bio: new_profile.bio,
        role: new_profile.role,
        company: new_profile.company,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO profiles (id, user_id, offer, ask, links, room_id, bio, role, company,
                              created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&profile.id)
    .bind(&profile.user_id)
    .bind(&profile.offer)
    .bind(&profile.ask)
    .bind(&profile.links)
    .bind(&profile.room_id)
    .bind(&profile.bio)
    .bind(&profile.role)
    .bind(&profile.company)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .execute(pool)
    .await?;

    Ok(profile)
}

/// Get a profile by ID.
pub async fn get_profile(pool: &SqlitePool, id: &str) -> Result<Profile> {
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, user_id, offer, ask, links, room_id, bio, role, company,
               created_at, updated_at
        FROM profiles
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Profile",
        id: id.to_string(),
    })
}

/// Get a user's profile.
pub async fn get_profile_by_user(pool: &SqlitePool, user_id: &str) -> Result<Profile> {
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, user_id, offer, ask, links, room_id, bio, role, company,
               created_at, updated_at
        FROM profiles
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Profile",
        id: user_id.to_string(),
    })
}

/// Get a profile joined with its owning user.
pub async fn get_profile_with_user(pool: &SqlitePool, id: &str) -> Result<ProfileWithUser> {
    let query = format!(
        r#"
        SELECT {PROFILE_COLUMNS}, {USER_COLUMNS}
        FROM profiles p
        INNER JOIN users u ON u.id = p.user_id
        WHERE p.id = ?
        "#
    );

    let row = sqlx::query(&query).bind(id).fetch_optional(pool).await?;

    match row {
        Some(row) => Ok(profile_with_user_from_row(&row)?),
        None => Err(DatabaseError::NotFound {
            entity: "Profile",
            id: id.to_string(),
        }),
    }
}

/// Apply a partial update to a profile. Fields left as `None` keep their
/// stored values; `updated_at` is always refreshed.
pub async fn update_profile(pool: &SqlitePool, id: &str, update: ProfileUpdate) -> Result<Profile> {
    let links = update.links.map(Json);

    let result = sqlx::query(
        r#"
        UPDATE profiles
        SET offer = COALESCE(?, offer),
            ask = COALESCE(?, ask),
            links = COALESCE(?, links),
            room_id = COALESCE(?, room_id),
            bio = COALESCE(?, bio),
            role = COALESCE(?, role),
            company = COALESCE(?, company),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&update.offer)
    .bind(&update.ask)
    .bind(links)
    .bind(&update.room_id)
    .bind(&update.bio)
    .bind(&update.role)
    .bind(&update.company)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Profile",
            id: id.to_string(),
        });
    }

    get_profile(pool, id).await
}

/// List all profiles with their owning users.
pub async fn list_profiles(pool: &SqlitePool) -> Result<Vec<ProfileWithUser>> {
    let query = format!(
        r#"
        SELECT {PROFILE_COLUMNS}, {USER_COLUMNS}
        FROM profiles p
        INNER JOIN users u ON u.id = p.user_id
        ORDER BY p.created_at DESC
        "#
    );

    let rows = sqlx::query(&query).fetch_all(pool).await?;

    let mut profiles = Vec::with_capacity(rows.len());
    for row in &rows {
        profiles.push(profile_with_user_from_row(row)?);
    }

    Ok(profiles)
}

/// List the profiles of a room's members.
pub async fn list_profiles_by_room(pool: &SqlitePool, room_id: &str) -> Result<Vec<ProfileWithUser>> {
    let query = format!(
        r#"
        SELECT {PROFILE_COLUMNS}, {USER_COLUMNS}
        FROM memberships m
        INNER JOIN profiles p ON p.user_id = m.user_id
        INNER JOIN users u ON u.id = m.user_id
        WHERE m.room_id = ?
        ORDER BY m.joined_at
        "#
    );

    let rows = sqlx::query(&query).bind(room_id).fetch_all(pool).await?;

    let mut profiles = Vec::with_capacity(rows.len());
    for row in &rows {
        profiles.push(profile_with_user_from_row(row)?);
    }

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{insert_user, test_db};

    #[tokio::test]
    async fn test_profile_crud() {
        let db = test_db().await;
        let user = insert_user(&db, "Sarah Chen").await;

        let profile = create_profile(
            db.pool(),
            NewProfile {
                user_id: user.id.clone(),
                offer: "Product strategy advice".to_string(),
                ask: "Looking for mobile developers".to_string(),
                links: vec!["https://linkedin.com/in/sarahchen".to_string()],
                room_id: None,
                bio: Some("Building products".to_string()),
                role: Some("Product Manager".to_string()),
                company: Some("TechCorp".to_string()),
            },
        )
        .await
        .unwrap();

        let fetched = get_profile(db.pool(), &profile.id).await.unwrap();
        assert_eq!(fetched.offer, "Product strategy advice");
        assert_eq!(fetched.links.0.len(), 1);

        let by_user = get_profile_by_user(db.pool(), &user.id).await.unwrap();
        assert_eq!(by_user.id, profile.id);

        let with_user = get_profile_with_user(db.pool(), &profile.id).await.unwrap();
        assert_eq!(with_user.user.display_name, "Sarah Chen");

        let updated = update_profile(
            db.pool(),
            &profile.id,
            ProfileUpdate {
                ask: Some("Seeking beta users".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.ask, "Seeking beta users");
        // Untouched fields survive a partial update.
        assert_eq!(updated.offer, "Product strategy advice");
        assert!(updated.updated_at >= profile.updated_at);
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let db = test_db().await;
        let result = get_profile(db.pool(), "missing").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_profiles_by_room_requires_membership() {
        let db = test_db().await;
        let organizer = insert_user(&db, "Org User").await;
        let member = insert_user(&db, "Member User").await;
        let outsider = insert_user(&db, "Outside User").await;

        let room = crate::room::create_room(
            db.pool(),
            crate::models::NewRoom {
                name: "Tech Summit".to_string(),
                slug: "tech-summit".to_string(),
                description: None,
                event_date: None,
                location: None,
                organizer_id: organizer.id.clone(),
                capacity: None,
            },
        )
        .await
        .unwrap();

        for user in [&member, &outsider] {
            create_profile(
                db.pool(),
                NewProfile {
                    user_id: user.id.clone(),
                    offer: "offer".to_string(),
                    ask: "ask".to_string(),
                    links: vec![],
                    room_id: None,
                    bio: None,
                    role: None,
                    company: None,
                },
            )
            .await
            .unwrap();
        }

        crate::membership::create_membership(
            db.pool(),
            crate::models::NewMembership {
                user_id: member.id.clone(),
                room_id: room.id.clone(),
            },
        )
        .await
        .unwrap();

        let profiles = list_profiles_by_room(db.pool(), &room.id).await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].user.id, member.id);
    }
}
