//! Point-in-time snapshots of users and submissions.
//!
//! The messaging core never loads application records itself; callers hand
//! it these snapshots, captured at the moment of dispatch.

use std::fmt;

use crate::types::DbId;

/// A platform user, reduced to what notifications need.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRef {
    pub id: DbId,
    /// Display name, used directly in rendered messages.
    pub name: String,
    pub email: String,
    /// Chat handle from the user's profile, when linked.
    pub slack: Option<String>,
}

impl UserRef {
    pub fn new(id: DbId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            slack: None,
        }
    }

    pub fn with_slack(mut self, handle: impl Into<String>) -> Self {
        self.slack = Some(handle.into());
        self
    }
}

/// The funding workflow stage a submission sits in.
///
/// Stages are coarser than phases: a stage groups the phases of one workflow
/// step and selects stage-specific configuration such as determination
/// texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundingStage {
    Request,
    Concept,
    Proposal,
}

impl FundingStage {
    pub fn as_str(self) -> &'static str {
        match self {
            FundingStage::Request => "Request",
            FundingStage::Concept => "Concept",
            FundingStage::Proposal => "Proposal",
        }
    }
}

impl fmt::Display for FundingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a submission at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRef {
    pub id: DbId,
    pub title: String,
    /// Display name of the current workflow phase.
    pub phase: String,
    pub stage: FundingStage,
    /// The applicant who owns the submission.
    pub owner: UserRef,
    /// The staff member leading the submission.
    pub lead: UserRef,
    /// Current reviewer roster.
    pub reviewers: Vec<UserRef>,
}
