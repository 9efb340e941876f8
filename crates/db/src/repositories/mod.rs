//! Data access layer.
//!
//! Repositories are stateless: every method takes a pool reference and
//! returns plain row models. Queries interpolate only compile-time column
//! lists; all values go through bind parameters.

pub mod activity_repo;
pub mod event_repo;
pub mod message_repo;

pub use activity_repo::ActivityRepo;
pub use event_repo::EventRepo;
pub use message_repo::MessageRepo;
