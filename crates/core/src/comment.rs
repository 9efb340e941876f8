//! Comment snapshots.

use crate::activity::Visibility;
use crate::submission::UserRef;
use crate::types::DbId;

/// A comment being notified about. The comment itself is already stored as
/// an activity row; this is the slice the adapters need.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRef {
    pub id: DbId,
    pub author: UserRef,
    pub body: String,
    pub visibility: Visibility,
}

impl CommentRef {
    /// Internal comments are staff-only and must never leave the platform.
    pub fn is_internal(&self) -> bool {
        self.visibility == Visibility::Internal
    }
}
