//! PostgreSQL persistence and services for catalog favorites.
//!
//! The pool is created by the process entry point and handed to each
//! service at construction; nothing in this crate holds a global handle.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::DbConfig;
pub use error::FavoritesError;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from the loaded configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
