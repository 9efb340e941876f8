//! Repository for the `activities` table.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE activities (
//!     id            BIGSERIAL PRIMARY KEY,
//!     kind          TEXT NOT NULL,
//!     actor_id      BIGINT NOT NULL,
//!     submission_id BIGINT NOT NULL,
//!     message       TEXT NOT NULL,
//!     visibility    TEXT NOT NULL,
//!     related_kind  TEXT,
//!     related_id    BIGINT,
//!     created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use sqlx::PgPool;

use fundflow_core::types::DbId;

use crate::models::activity::Activity;

/// Column list for `activities` queries.
const COLUMNS: &str =
    "id, kind, actor_id, submission_id, message, visibility, related_kind, related_id, created_at";

/// Append/read operations for the submission activity feed.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a feed entry, returning the stored row.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        pool: &PgPool,
        kind: &str,
        actor_id: DbId,
        submission_id: DbId,
        message: &str,
        visibility: &str,
        related_kind: Option<&str>,
        related_id: Option<DbId>,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities \
                (kind, actor_id, submission_id, message, visibility, related_kind, related_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(kind)
            .bind(actor_id)
            .bind(submission_id)
            .bind(message)
            .bind(visibility)
            .bind(related_kind)
            .bind(related_id)
            .fetch_one(pool)
            .await
    }

    /// List the feed for one submission, oldest-first.
    pub async fn list_for_submission(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM activities WHERE submission_id = $1 ORDER BY id");
        sqlx::query_as::<_, Activity>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }
}
