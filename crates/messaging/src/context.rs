//! Dispatch context.

use fundflow_core::comment::CommentRef;
use fundflow_core::determination::DeterminationRef;
use fundflow_core::event::{RelatedKind, RelatedRef};
use fundflow_core::project::ProjectRef;
use fundflow_core::submission::{SubmissionRef, UserRef};

use crate::notices::NoticeQueue;

/// Everything an adapter may need to render and address one message,
/// captured by the caller at the moment of dispatch.
///
/// Only `actor` and `submission` are always present; the rest is filled in
/// with the `with_*` builders by the call sites whose message types need
/// it. Adapters that reach for an absent field either skip the message or
/// fail that render, never the whole dispatch.
#[derive(Debug, Clone)]
pub struct MessageContext {
    /// The user whose action triggered the dispatch.
    pub actor: UserRef,
    /// The submission the message is about.
    pub submission: SubmissionRef,
    /// The comment being notified about (comment messages).
    pub comment: Option<CommentRef>,
    /// The determination being notified about (determination messages).
    pub determination: Option<DeterminationRef>,
    /// The project being notified about (approval and project lead
    /// messages).
    pub project: Option<ProjectRef>,
    /// The lead before a lead change. `None` means previously unassigned.
    pub old_lead: Option<UserRef>,
    /// Display name of the phase before a transition.
    pub old_phase: Option<String>,
    /// Reviewers added by a roster change.
    pub reviewers_added: Vec<UserRef>,
    /// Reviewers removed by a roster change.
    pub reviewers_removed: Vec<UserRef>,
    /// Notice queue of the active request, when dispatched inside one.
    pub notices: Option<NoticeQueue>,
}

impl MessageContext {
    pub fn new(actor: UserRef, submission: SubmissionRef) -> Self {
        Self {
            actor,
            submission,
            comment: None,
            determination: None,
            project: None,
            old_lead: None,
            old_phase: None,
            reviewers_added: Vec::new(),
            reviewers_removed: Vec::new(),
            notices: None,
        }
    }

    pub fn with_comment(mut self, comment: CommentRef) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn with_determination(mut self, determination: DeterminationRef) -> Self {
        self.determination = Some(determination);
        self
    }

    pub fn with_project(mut self, project: ProjectRef) -> Self {
        self.project = Some(project);
        self
    }

    pub fn with_old_lead(mut self, old_lead: UserRef) -> Self {
        self.old_lead = Some(old_lead);
        self
    }

    pub fn with_old_phase(mut self, old_phase: impl Into<String>) -> Self {
        self.old_phase = Some(old_phase.into());
        self
    }

    pub fn with_reviewer_changes(mut self, added: Vec<UserRef>, removed: Vec<UserRef>) -> Self {
        self.reviewers_added = added;
        self.reviewers_removed = removed;
        self
    }

    pub fn with_notices(mut self, notices: NoticeQueue) -> Self {
        self.notices = Some(notices);
        self
    }

    /// The related-object reference recorded on the event, when one
    /// applies. At most one of determination, project and comment is
    /// populated per dispatch; they are checked in that order.
    pub fn related_ref(&self) -> Option<RelatedRef> {
        if let Some(determination) = &self.determination {
            return Some(RelatedRef::new(RelatedKind::Determination, determination.id));
        }
        if let Some(project) = &self.project {
            return Some(RelatedRef::new(RelatedKind::Project, project.id));
        }
        if let Some(comment) = &self.comment {
            return Some(RelatedRef::new(RelatedKind::Comment, comment.id));
        }
        None
    }
}
