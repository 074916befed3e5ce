//! Demo dataset loaded at startup when `SEED_DEMO_DATA` is enabled
//!
//! Every demo account uses the password `123456`.

use chrono::{DateTime, Utc};

use super::InMemoryStore;
use crate::error::{ApiError, ApiResult};
use crate::models::{Post, User};
use crate::services::AuthService;

/// Password shared by all demo accounts
pub const DEMO_PASSWORD: &str = "123456";

/// Build a store holding the demo users and posts
pub async fn demo_store(auth: &AuthService) -> ApiResult<InMemoryStore> {
    let users = demo_users(auth).await?;
    let posts = demo_posts()?;

    tracing::info!(
        users = users.len(),
        posts = posts.len(),
        "Seeded demo dataset"
    );

    Ok(InMemoryStore::with_records(users, posts))
}

async fn demo_users(auth: &AuthService) -> ApiResult<Vec<User>> {
    let profiles = [
        (1, "fong@test.com", "Fong", 23, Some(175.0), Some(70.0), vec![2, 3]),
        (2, "kevin@test.com", "Kevin", 40, Some(185.0), Some(90.0), vec![1]),
        (3, "mary@test.com", "Mary", 18, Some(162.0), None, vec![1]),
    ];

    let mut users = Vec::with_capacity(profiles.len());
    for (id, email, name, age, height, weight, friend_ids) in profiles {
        users.push(User {
            id,
            email: email.to_string(),
            password_hash: auth.hash_password(DEMO_PASSWORD).await?,
            name: Some(name.to_string()),
            age: Some(age),
            height,
            weight,
            friend_ids,
        });
    }

    Ok(users)
}

fn demo_posts() -> ApiResult<Vec<Post>> {
    Ok(vec![
        Post {
            id: 1,
            author_id: 1,
            title: "Hello World!".to_string(),
            body: Some("This is my first post.".to_string()),
            like_giver_ids: vec![2],
            created_at: timestamp("2018-10-22T01:40:14.941Z")?,
        },
        Post {
            id: 2,
            author_id: 2,
            title: "Good Night".to_string(),
            body: Some("Have a Nice Dream =)".to_string()),
            like_giver_ids: vec![2, 3],
            created_at: timestamp("2018-10-24T01:40:14.941Z")?,
        },
    ])
}

fn timestamp(value: &str) -> ApiResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApiError::Internal(format!("bad seed timestamp {}: {}", value, e)))
}
