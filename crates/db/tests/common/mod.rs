//! Seed helpers for favorites integration tests.
//!
//! Catalog tables are owned by another subsystem, so tests insert rows with
//! plain SQL rather than through repositories.

#![allow(dead_code)]

use favorites_core::types::DbId;
use favorites_db::models::profile::Profile;
use sqlx::PgPool;

pub async fn insert_profile(pool: &PgPool, id: &str, username: &str) -> Profile {
    sqlx::query_as::<_, Profile>(
        "INSERT INTO profiles (id, username) VALUES ($1, $2) RETURNING id, username",
    )
    .bind(id)
    .bind(username)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_category(pool: &PgPool, title: &str, slug: &str) -> DbId {
    let row: (DbId,) =
        sqlx::query_as("INSERT INTO categories (title, slug) VALUES ($1, $2) RETURNING id")
            .bind(title)
            .bind(slug)
            .fetch_one(pool)
            .await
            .unwrap();
    row.0
}

/// Model fields that vary between tests.
pub struct NewModel<'a> {
    pub id: &'a str,
    pub owner_id: &'a str,
    pub category_id: Option<DbId>,
    pub tags: &'a [&'a str],
    pub active: bool,
    pub deleted: bool,
}

impl<'a> NewModel<'a> {
    pub fn new(id: &'a str, owner_id: &'a str) -> Self {
        Self {
            id,
            owner_id,
            category_id: None,
            tags: &[],
            active: true,
            deleted: false,
        }
    }
}

pub async fn insert_model(pool: &PgPool, model: NewModel<'_>) -> String {
    let tags: Vec<String> = model.tags.iter().map(|t| t.to_string()).collect();
    sqlx::query(
        "INSERT INTO models (id, profile_id, category_id, title, description, tags, filename, active, deleted)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(model.id)
    .bind(model.owner_id)
    .bind(model.category_id)
    .bind(format!("Model {}", model.id))
    .bind(Some(format!("Description of {}", model.id)))
    .bind(tags)
    .bind(format!("{}.zip", model.id))
    .bind(model.active)
    .bind(model.deleted)
    .execute(pool)
    .await
    .unwrap();
    model.id.to_string()
}

pub async fn insert_download(pool: &PgPool, profile_id: &str, model_id: &str) {
    sqlx::query("INSERT INTO downloads (profile_id, model_id) VALUES ($1, $2)")
        .bind(profile_id)
        .bind(model_id)
        .execute(pool)
        .await
        .unwrap();
}

/// Pin a favorite's `created_at` to `minutes_ago` minutes in the past.
pub async fn backdate_favorite(pool: &PgPool, profile_id: &str, model_id: &str, minutes_ago: i32) {
    sqlx::query(
        "UPDATE favorites SET created_at = NOW() - make_interval(mins => $3)
         WHERE profile_id = $1 AND model_id = $2",
    )
    .bind(profile_id)
    .bind(model_id)
    .bind(minutes_ago)
    .execute(pool)
    .await
    .unwrap();
}
