//! Determination outcomes.

use std::fmt;

use crate::types::DbId;

/// The decision a determination assigns to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeterminationOutcome {
    Rejected,
    MoreInfoRequested,
    Accepted,
}

impl DeterminationOutcome {
    /// Applicant-facing wording; softer than the internal variant names.
    pub fn as_str(self) -> &'static str {
        match self {
            DeterminationOutcome::Rejected => "Dismissed",
            DeterminationOutcome::MoreInfoRequested => "More information requested",
            DeterminationOutcome::Accepted => "Approved",
        }
    }
}

impl fmt::Display for DeterminationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A determination attached to a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DeterminationRef {
    pub id: DbId,
    pub outcome: DeterminationOutcome,
    /// Free-form text written by the decision maker.
    pub message: String,
}
