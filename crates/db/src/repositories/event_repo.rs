//! Repository for the `events` table.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE events (
//!     id            BIGSERIAL PRIMARY KEY,
//!     message_type  TEXT NOT NULL,
//!     actor_id      BIGINT NOT NULL,
//!     submission_id BIGINT NOT NULL,
//!     related_kind  TEXT,
//!     related_id    BIGINT,
//!     created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use sqlx::PgPool;

use fundflow_core::types::DbId;

use crate::models::event::Event;

/// Columns selected by every `events` query.
const COLUMNS: &str =
    "id, message_type, actor_id, submission_id, related_kind, related_id, created_at";

/// Append/read operations for the event log.
pub struct EventRepo;

impl EventRepo {
    /// Insert an event row, returning the stored row.
    pub async fn insert(
        pool: &PgPool,
        message_type: &str,
        actor_id: DbId,
        submission_id: DbId,
        related_kind: Option<&str>,
        related_id: Option<DbId>,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events \
                (message_type, actor_id, submission_id, related_kind, related_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(message_type)
            .bind(actor_id)
            .bind(submission_id)
            .bind(related_kind)
            .bind(related_id)
            .fetch_one(pool)
            .await
    }

    /// Most recent events first, capped at `limit`.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY id DESC LIMIT $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List every event recorded against one submission, newest-first.
    pub async fn list_for_submission(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM events WHERE submission_id = $1 ORDER BY id DESC");
        sqlx::query_as::<_, Event>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }
}
