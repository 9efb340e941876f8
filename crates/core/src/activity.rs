//! The submission activity feed.
//!
//! A feed entry is either a comment written by a person or an action note
//! generated by the messaging pipeline. The feed is append-only.

use serde::Serialize;

use crate::event::RelatedRef;
use crate::types::{DbId, Timestamp};

/// Who may see a feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Staff only.
    Internal,
    /// Staff and the applicant.
    Public,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Internal => "internal",
            Visibility::Public => "public",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "internal" => Some(Visibility::Internal),
            "public" => Some(Visibility::Public),
            _ => None,
        }
    }
}

/// Discriminates person-written comments from system-generated notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Comment,
    Action,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Comment => "comment",
            ActivityKind::Action => "action",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "comment" => Some(ActivityKind::Comment),
            "action" => Some(ActivityKind::Action),
            _ => None,
        }
    }
}

/// A stored feed entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub kind: ActivityKind,
    pub actor_id: DbId,
    pub submission_id: DbId,
    pub message: String,
    pub visibility: Visibility,
    pub related: Option<RelatedRef>,
    pub created_at: Timestamp,
}

/// Fields for appending a feed entry.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub kind: ActivityKind,
    pub actor_id: DbId,
    pub submission_id: DbId,
    pub message: String,
    pub visibility: Visibility,
    pub related: Option<RelatedRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_round_trips() {
        assert_eq!(Visibility::parse("internal"), Some(Visibility::Internal));
        assert_eq!(Visibility::parse("public"), Some(Visibility::Public));
        assert_eq!(Visibility::parse("secret"), None);
    }

    #[test]
    fn kind_round_trips() {
        assert_eq!(ActivityKind::parse("comment"), Some(ActivityKind::Comment));
        assert_eq!(ActivityKind::parse("action"), Some(ActivityKind::Action));
        assert_eq!(ActivityKind::parse(""), None);
    }
}
