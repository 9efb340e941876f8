//! Repository for the `messages` delivery log table.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE messages (
//!     id         BIGSERIAL PRIMARY KEY,
//!     adapter    TEXT NOT NULL,
//!     recipient  TEXT NOT NULL,
//!     content    TEXT NOT NULL,
//!     event_id   BIGINT NOT NULL REFERENCES events (id),
//!     status     TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use sqlx::PgPool;

use fundflow_core::types::DbId;

use crate::models::message::Message;

/// Column list for `messages` queries.
const COLUMNS: &str = "id, adapter, recipient, content, event_id, status, created_at";

/// Append/read operations for the delivery log.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a delivery log row, returning the stored row.
    pub async fn insert(
        pool: &PgPool,
        adapter: &str,
        recipient: &str,
        content: &str,
        event_id: DbId,
        status: &str,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (adapter, recipient, content, event_id, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(adapter)
            .bind(recipient)
            .bind(content)
            .bind(event_id)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// List every delivery attempt for one event, oldest-first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE event_id = $1 ORDER BY id");
        sqlx::query_as::<_, Message>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }
}
