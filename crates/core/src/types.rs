//! Core type aliases used across all crates.

/// Primary key type; every table keys on a BIGSERIAL column.
pub type DbId = i64;

/// UTC wall-clock timestamp.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
