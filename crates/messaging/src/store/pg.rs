//! PostgreSQL store implementations.
//!
//! Thin wrappers over the `fundflow-db` repositories that convert row
//! structs into domain records. Text columns written by this crate always
//! parse back; a failure here means the table was touched by something
//! else and surfaces as [`StoreError::Data`].

use std::str::FromStr;

use async_trait::async_trait;

use fundflow_core::activity::{Activity, ActivityKind, NewActivity, Visibility};
use fundflow_core::event::{Event, RelatedKind, RelatedRef};
use fundflow_core::message_type::MessageType;
use fundflow_core::types::DbId;
use fundflow_db::models;
use fundflow_db::repositories::{ActivityRepo, EventRepo};
use fundflow_db::DbPool;

use super::{ActivityStore, EventStore, StoreError};

/// Event log backed by the `events` table.
pub struct PgEventStore {
    pool: DbPool,
}

impl PgEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn record(
        &self,
        message_type: MessageType,
        actor_id: DbId,
        submission_id: DbId,
        related: Option<RelatedRef>,
    ) -> Result<Event, StoreError> {
        let row = EventRepo::insert(
            &self.pool,
            message_type.as_str(),
            actor_id,
            submission_id,
            related.map(|r| r.kind.as_str()),
            related.map(|r| r.id),
        )
        .await?;
        event_from_row(row)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Event>, StoreError> {
        let rows = EventRepo::list_recent(&self.pool, limit).await?;
        rows.into_iter().map(event_from_row).collect()
    }
}

/// Activity feed backed by the `activities` table.
pub struct PgActivityStore {
    pool: DbPool,
}

impl PgActivityStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for PgActivityStore {
    async fn append(&self, activity: NewActivity) -> Result<Activity, StoreError> {
        let row = ActivityRepo::insert(
            &self.pool,
            activity.kind.as_str(),
            activity.actor_id,
            activity.submission_id,
            &activity.message,
            activity.visibility.as_str(),
            activity.related.map(|r| r.kind.as_str()),
            activity.related.map(|r| r.id),
        )
        .await?;
        activity_from_row(row)
    }

    async fn for_submission(&self, submission_id: DbId) -> Result<Vec<Activity>, StoreError> {
        let rows = ActivityRepo::list_for_submission(&self.pool, submission_id).await?;
        rows.into_iter().map(activity_from_row).collect()
    }
}

// ---------------------------------------------------------------------------
// Row conversions
// ---------------------------------------------------------------------------

fn event_from_row(row: models::event::Event) -> Result<Event, StoreError> {
    let message_type =
        MessageType::from_str(&row.message_type).map_err(|e| StoreError::Data(e.to_string()))?;
    let related = related_from_columns(row.related_kind.as_deref(), row.related_id)?;
    Ok(Event {
        id: row.id,
        message_type,
        actor_id: row.actor_id,
        submission_id: row.submission_id,
        related,
        created_at: row.created_at,
    })
}

fn activity_from_row(row: models::activity::Activity) -> Result<Activity, StoreError> {
    let kind = ActivityKind::parse(&row.kind)
        .ok_or_else(|| StoreError::Data(format!("unknown activity kind: {}", row.kind)))?;
    let visibility = Visibility::parse(&row.visibility)
        .ok_or_else(|| StoreError::Data(format!("unknown visibility: {}", row.visibility)))?;
    let related = related_from_columns(row.related_kind.as_deref(), row.related_id)?;
    Ok(Activity {
        id: row.id,
        kind,
        actor_id: row.actor_id,
        submission_id: row.submission_id,
        message: row.message,
        visibility,
        related,
        created_at: row.created_at,
    })
}

fn related_from_columns(
    kind: Option<&str>,
    id: Option<DbId>,
) -> Result<Option<RelatedRef>, StoreError> {
    match (kind, id) {
        (Some(kind), Some(id)) => {
            let kind = RelatedKind::parse(kind)
                .ok_or_else(|| StoreError::Data(format!("unknown related kind: {kind}")))?;
            Ok(Some(RelatedRef::new(kind, id)))
        }
        (None, None) => Ok(None),
        _ => Err(StoreError::Data(
            "related reference needs both kind and id".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn event_row(message_type: &str) -> models::event::Event {
        models::event::Event {
            id: 10,
            message_type: message_type.to_string(),
            actor_id: 2,
            submission_id: 5,
            related_kind: None,
            related_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn event_rows_convert() {
        let event = event_from_row(event_row("update_lead")).unwrap();
        assert_eq!(event.message_type, MessageType::UpdateLead);
        assert_eq!(event.related, None);
    }

    #[test]
    fn retired_message_types_surface_as_data_errors() {
        let err = event_from_row(event_row("telegraphed")).unwrap_err();
        assert_matches!(err, StoreError::Data(_));
    }

    #[test]
    fn related_columns_must_come_in_pairs() {
        assert_matches!(
            related_from_columns(Some("project"), None),
            Err(StoreError::Data(_))
        );
        assert_matches!(related_from_columns(None, Some(4)), Err(StoreError::Data(_)));
        let related = related_from_columns(Some("determination"), Some(4)).unwrap();
        assert_eq!(related, Some(RelatedRef::new(RelatedKind::Determination, 4)));
    }

    #[test]
    fn activity_rows_convert() {
        let row = models::activity::Activity {
            id: 3,
            kind: "action".to_string(),
            actor_id: 2,
            submission_id: 5,
            message: "Progressed from Screening to Review".to_string(),
            visibility: "public".to_string(),
            related_kind: None,
            related_id: None,
            created_at: Utc::now(),
        };

        let activity = activity_from_row(row).unwrap();
        assert_eq!(activity.kind, ActivityKind::Action);
        assert_eq!(activity.visibility, Visibility::Public);
    }
}
