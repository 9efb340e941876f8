//! Event log entity model.

use fundflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `events` table: one messenger dispatch.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    /// snake_case message type name.
    pub message_type: String,
    pub actor_id: DbId,
    pub submission_id: DbId,
    /// Kind of the related object, when the event points at one.
    pub related_kind: Option<String>,
    pub related_id: Option<DbId>,
    pub created_at: Timestamp,
}
