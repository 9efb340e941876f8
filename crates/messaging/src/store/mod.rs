//! Persistence seams for the messaging core.
//!
//! The dispatch pipeline only ever appends: an event row on every dispatch,
//! an activity row when the feed adapter delivers. Both surfaces are traits
//! so the pipeline runs against [`memory`] stores in tests and [`pg`] stores
//! in production.

pub mod memory;
pub mod pg;

use async_trait::async_trait;

use fundflow_core::activity::{Activity, NewActivity};
use fundflow_core::event::{Event, RelatedRef};
use fundflow_core::message_type::MessageType;
use fundflow_core::types::DbId;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row no longer maps onto the domain, e.g. a retired message
    /// type name.
    #[error("stored data is invalid: {0}")]
    Data(String),
}

/// Append-only audit log of messenger dispatches.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Record that something happened. Called exactly once per dispatch.
    async fn record(
        &self,
        message_type: MessageType,
        actor_id: DbId,
        submission_id: DbId,
        related: Option<RelatedRef>,
    ) -> Result<Event, StoreError>;

    /// Most recent events, newest-first.
    async fn recent(&self, limit: i64) -> Result<Vec<Event>, StoreError>;
}

/// Append-only submission activity feed.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Append a feed entry.
    async fn append(&self, activity: NewActivity) -> Result<Activity, StoreError>;

    /// The feed for one submission, oldest-first.
    async fn for_submission(&self, submission_id: DbId) -> Result<Vec<Activity>, StoreError>;
}
