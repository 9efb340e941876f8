//! Project snapshots for post-award messaging.

use crate::submission::UserRef;
use crate::types::DbId;

/// A project created from an approved submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRef {
    pub id: DbId,
    pub name: String,
    /// Projects can sit unassigned between lead changes.
    pub lead: Option<UserRef>,
}
