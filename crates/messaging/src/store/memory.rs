//! In-memory stores for tests and local development.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use fundflow_core::activity::{Activity, NewActivity};
use fundflow_core::event::{Event, RelatedRef};
use fundflow_core::message_type::MessageType;
use fundflow_core::types::DbId;

use super::{ActivityStore, EventStore, StoreError};

/// Event store backed by a vector, with sequential ids starting at 1.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<Event>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn record(
        &self,
        message_type: MessageType,
        actor_id: DbId,
        submission_id: DbId,
        related: Option<RelatedRef>,
    ) -> Result<Event, StoreError> {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let event = Event {
            id: events.len() as DbId + 1,
            message_type,
            actor_id,
            submission_id,
            related,
            created_at: Utc::now(),
        };
        events.push(event.clone());
        Ok(event)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Event>, StoreError> {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        Ok(events
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

/// Activity store backed by a vector, with sequential ids starting at 1.
#[derive(Debug, Default)]
pub struct MemoryActivityStore {
    activities: Mutex<Vec<Activity>>,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn append(&self, activity: NewActivity) -> Result<Activity, StoreError> {
        let mut activities = self.activities.lock().unwrap_or_else(|e| e.into_inner());
        let stored = Activity {
            id: activities.len() as DbId + 1,
            kind: activity.kind,
            actor_id: activity.actor_id,
            submission_id: activity.submission_id,
            message: activity.message,
            visibility: activity.visibility,
            related: activity.related,
            created_at: Utc::now(),
        };
        activities.push(stored.clone());
        Ok(stored)
    }

    async fn for_submission(&self, submission_id: DbId) -> Result<Vec<Activity>, StoreError> {
        let activities = self.activities.lock().unwrap_or_else(|e| e.into_inner());
        Ok(activities
            .iter()
            .filter(|a| a.submission_id == submission_id)
            .cloned()
            .collect())
    }
}
