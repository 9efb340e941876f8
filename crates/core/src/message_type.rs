//! The closed set of message types the messenger can dispatch.
//!
//! The snake_case form returned by [`MessageType::as_str`] is what the
//! event log persists, so renaming a variant is a data migration and not
//! just a refactor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A notable action in a submission's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// The lead responsible for a submission changed.
    UpdateLead,
    /// A new submission was received.
    NewSubmission,
    /// A submission moved to a different workflow phase.
    Transition,
    /// A comment was posted on a submission.
    Comment,
    /// A reviewer submitted a review.
    NewReview,
    /// The reviewer roster of a submission changed.
    ReviewersUpdated,
    /// A submission became ready for its reviewers to act on.
    ReadyForReview,
    /// A determination (outcome decision) was sent.
    DeterminationOutcome,
    /// A project derived from the submission was sent for approval.
    SendForApproval,
    /// The lead of a project changed.
    UpdateProjectLead,
}

/// Every message type, in declaration order.
pub const ALL_MESSAGE_TYPES: &[MessageType] = &[
    MessageType::UpdateLead,
    MessageType::NewSubmission,
    MessageType::Transition,
    MessageType::Comment,
    MessageType::NewReview,
    MessageType::ReviewersUpdated,
    MessageType::ReadyForReview,
    MessageType::DeterminationOutcome,
    MessageType::SendForApproval,
    MessageType::UpdateProjectLead,
];

impl MessageType {
    /// Stable snake_case name, as stored in the event log.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::UpdateLead => "update_lead",
            MessageType::NewSubmission => "new_submission",
            MessageType::Transition => "transition",
            MessageType::Comment => "comment",
            MessageType::NewReview => "new_review",
            MessageType::ReviewersUpdated => "reviewers_updated",
            MessageType::ReadyForReview => "ready_for_review",
            MessageType::DeterminationOutcome => "determination_outcome",
            MessageType::SendForApproval => "send_for_approval",
            MessageType::UpdateProjectLead => "update_project_lead",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known message type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown message type: {0}")]
pub struct UnknownMessageType(pub String);

impl FromStr for MessageType {
    type Err = UnknownMessageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_MESSAGE_TYPES
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownMessageType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for &message_type in ALL_MESSAGE_TYPES {
            let parsed: MessageType = message_type.as_str().parse().unwrap();
            assert_eq!(parsed, message_type);
        }
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "shipped_to_mars".parse::<MessageType>().unwrap_err();
        assert_eq!(err, UnknownMessageType("shipped_to_mars".to_string()));
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&MessageType::ReadyForReview).unwrap();
        assert_eq!(json, "\"ready_for_review\"");
    }

    #[test]
    fn display_uses_the_wire_name() {
        assert_eq!(MessageType::UpdateLead.to_string(), "update_lead");
    }
}
