//! Shared domain types for the fundflow grant platform.
//!
//! Everything here is a plain value type: snapshots the messaging and
//! persistence crates pass around without reaching back into application
//! state. This crate stays dependency-light on purpose.

pub mod activity;
pub mod comment;
pub mod determination;
pub mod event;
pub mod message_type;
pub mod project;
pub mod submission;
pub mod types;

pub use activity::{Activity, ActivityKind, NewActivity, Visibility};
pub use comment::CommentRef;
pub use determination::{DeterminationOutcome, DeterminationRef};
pub use event::{Event, RelatedKind, RelatedRef};
pub use message_type::MessageType;
pub use project::ProjectRef;
pub use submission::{FundingStage, SubmissionRef, UserRef};
