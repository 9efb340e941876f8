//! Activity feed entity model.

use fundflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `activities` table: one feed entry on a submission.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    /// `"comment"` or `"action"`.
    pub kind: String,
    pub actor_id: DbId,
    pub submission_id: DbId,
    pub message: String,
    /// `"internal"` or `"public"`.
    pub visibility: String,
    pub related_kind: Option<String>,
    pub related_id: Option<DbId>,
    pub created_at: Timestamp,
}
