//! Database entity models.
//!
//! Each struct here maps one-to-one onto a table row via `sqlx::FromRow`.
//! Enum-like columns (message types, visibility, delivery status) are
//! stored as text; the messaging crate converts them back into domain
//! enums.

pub mod activity;
pub mod event;
pub mod message;
