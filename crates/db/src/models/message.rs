//! Delivery log entity model.

use fundflow_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `messages` table: one attempted delivery by one adapter.
///
/// Rows are written for every attempt, successful or not, so the table is a
/// faithful trail of what each channel tried to do for an event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    /// Adapter label, e.g. `"Email"`.
    pub adapter: String,
    /// Human-readable recipient (address, room or `"activity feed"`).
    pub recipient: String,
    /// The rendered message content.
    pub content: String,
    pub event_id: DbId,
    /// Delivery outcome as recorded by the adapter.
    pub status: String,
    pub created_at: Timestamp,
}
