//! PostgreSQL persistence for the fundflow platform.
//!
//! Row models live in [`models`], query methods in [`repositories`]. All
//! tables written here are append-only: the event log and the activity feed
//! are audit surfaces, so no repository exposes update or delete methods.
//!
//! Schema management is owned by the deployment; each repository documents
//! the table shape it expects.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Connections held by the shared pool.
const POOL_MAX_CONNECTIONS: u32 = 20;

/// Open a PostgreSQL pool against `database_url`.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(POOL_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
