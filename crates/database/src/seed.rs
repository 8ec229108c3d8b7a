//! Demo data seeding.
//!
//! Populates a fresh database with a small set of demo users, one room,
//! their profiles, a few actions and streaks. Intended for local
//! development; skipped when users already exist.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{NewAction, NewMembership, NewProfile, NewRoom, NewUser, StreakRecord};

/// Seed demo data. Returns true if seeding ran, false if the database
/// already had users.
pub async fn seed_demo(pool: &SqlitePool) -> Result<bool> {
    if crate::user::count_users(pool).await? > 0 {
        tracing::info!("Database already populated, skipping demo seed");
        return Ok(false);
    }

    tracing::info!("Seeding demo data...");

    let sarah = crate::user::create_user(
        pool,
        NewUser {
            email: "sarah@techcorp.com".to_string(),
            password: "demo-not-a-real-hash".to_string(),
            display_name: "Sarah Chen".to_string(),
            photo_url: None,
        },
    )
    .await?;
    let alex = crate::user::create_user(
        pool,
        NewUser {
            email: "alex@startupxyz.com".to_string(),
            password: "demo-not-a-real-hash".to_string(),
            display_name: "Alex Rivera".to_string(),
            photo_url: None,
        },
    )
    .await?;
    let jordan = crate::user::create_user(
        pool,
        NewUser {
            email: "jordan@designco.com".to_string(),
            password: "demo-not-a-real-hash".to_string(),
            display_name: "Jordan Kim".to_string(),
            photo_url: None,
        },
    )
    .await?;

    let room = crate::room::create_room(
        pool,
        NewRoom {
            name: "Tech Summit 2025".to_string(),
            slug: "tech-summit-2025".to_string(),
            description: Some(
                "Annual technology conference bringing together innovators and builders"
                    .to_string(),
            ),
            event_date: None,
            location: Some("San Francisco, CA".to_string()),
            organizer_id: sarah.id.clone(),
            capacity: None,
        },
    )
    .await?;

    let profiles = [
        NewProfile {
            user_id: sarah.id.clone(),
            offer: "Product strategy advice, intro to Silicon Valley VCs".to_string(),
            ask: "Looking for experienced mobile developers".to_string(),
            links: vec!["https://linkedin.com/in/sarahchen".to_string()],
            room_id: Some(room.id.clone()),
            bio: Some("Building products that make a difference".to_string()),
            role: Some("Product Manager".to_string()),
            company: Some("TechCorp".to_string()),
        },
        NewProfile {
            user_id: alex.id.clone(),
            offer: "Technical architecture advice, code reviews".to_string(),
            ask: "Seeking co-founder for AI startup".to_string(),
            links: vec!["https://github.com/alexrivera".to_string()],
            room_id: Some(room.id.clone()),
            bio: Some("Full-stack developer passionate about AI and ML".to_string()),
            role: Some("Software Engineer".to_string()),
            company: Some("StartupXYZ".to_string()),
        },
        NewProfile {
            user_id: jordan.id.clone(),
            offer: "UI/UX design feedback, portfolio reviews".to_string(),
            ask: "Looking for front-end developers to collaborate with".to_string(),
            links: vec!["https://dribbble.com/jordankim".to_string()],
            room_id: Some(room.id.clone()),
            bio: Some("Crafting beautiful user experiences".to_string()),
            role: Some("Designer".to_string()),
            company: Some("DesignCo".to_string()),
        },
    ];
    for profile in profiles {
        crate::profile::create_profile(pool, profile).await?;
    }

    for user in [&sarah, &alex, &jordan] {
        crate::membership::create_membership(
            pool,
            NewMembership {
                user_id: user.id.clone(),
                room_id: room.id.clone(),
            },
        )
        .await?;
    }

    let now = Utc::now();
    crate::action::create_action(
        pool,
        NewAction {
            user_id: sarah.id.clone(),
            room_id: Some(room.id.clone()),
            content: "Just connected with 5 amazing founders!".to_string(),
            action_type: "connection".to_string(),
        },
        now - Duration::minutes(30),
    )
    .await?;
    crate::action::create_action(
        pool,
        NewAction {
            user_id: alex.id.clone(),
            room_id: Some(room.id.clone()),
            content: "Gave a talk on scaling microservices".to_string(),
            action_type: "contribution".to_string(),
        },
        now - Duration::minutes(90),
    )
    .await?;

    let streaks = [
        (&sarah, 15, 20),
        (&alex, 12, 15),
        (&jordan, 10, 12),
    ];
    for (user, current, longest) in streaks {
        crate::streak::upsert_streak(
            pool,
            &StreakRecord {
                user_id: user.id.clone(),
                current_streak: current,
                longest_streak: longest,
                last_action_date: Some(now.date_naive()),
            },
        )
        .await?;
    }

    tracing::info!("Demo seed complete");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::test_db;

    #[tokio::test]
    async fn test_seed_runs_once() {
        let db = test_db().await;

        assert!(seed_demo(db.pool()).await.unwrap());
        assert_eq!(crate::user::count_users(db.pool()).await.unwrap(), 3);

        // Second run is a no-op.
        assert!(!seed_demo(db.pool()).await.unwrap());
        assert_eq!(crate::user::count_users(db.pool()).await.unwrap(), 3);
    }
}
