//! The event log record.

use serde::Serialize;

use crate::message_type::MessageType;
use crate::types::{DbId, Timestamp};

/// What kind of object an event or activity points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedKind {
    Determination,
    Project,
    Comment,
}

impl RelatedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelatedKind::Determination => "determination",
            RelatedKind::Project => "project",
            RelatedKind::Comment => "comment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "determination" => Some(RelatedKind::Determination),
            "project" => Some(RelatedKind::Project),
            "comment" => Some(RelatedKind::Comment),
            _ => None,
        }
    }
}

/// A typed reference from an event to the object it is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelatedRef {
    pub kind: RelatedKind,
    pub id: DbId,
}

impl RelatedRef {
    pub fn new(kind: RelatedKind, id: DbId) -> Self {
        Self { kind, id }
    }
}

/// Audit record of one messenger dispatch.
///
/// Created exactly once per dispatch, never updated and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: DbId,
    pub message_type: MessageType,
    /// The user whose action triggered the dispatch.
    pub actor_id: DbId,
    pub submission_id: DbId,
    pub related: Option<RelatedRef>,
    pub created_at: Timestamp,
}
