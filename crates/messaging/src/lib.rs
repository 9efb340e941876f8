//! Notification core for the fundflow grant platform.
//!
//! Every notable action on a submission goes through one entry point,
//! [`Messenger::dispatch`], which records an audit [`Event`] and then fans
//! the message out to a fixed set of channels:
//!
//! - [`ActivityAdapter`] appends a note to the submission's activity feed,
//! - [`EmailAdapter`] mails applicants and reviewers,
//! - [`SlackAdapter`] posts a one-line summary to a chat webhook.
//!
//! Channels share one processing contract, provided by
//! [`adapters::NotificationAdapter::process`]: look up a template in the
//! adapter's [`catalog`], render it against the [`MessageContext`], resolve
//! recipients, deliver, and record every attempt in the delivery log.
//! Failures stay inside the adapter that hit them; the event record is the
//! only write a dispatch cannot survive losing.
//!
//! Persistence and transports are seams: [`store`] and [`mail`] ship
//! in-memory implementations alongside the PostgreSQL and SMTP ones, so the
//! whole pipeline runs in tests without external services.
//!
//! [`Event`]: fundflow_core::event::Event

pub mod adapters;
pub mod catalog;
pub mod context;
pub mod delivery_log;
pub mod mail;
pub mod messenger;
pub mod notices;
pub mod settings;
pub mod store;

pub use adapters::activity::ActivityAdapter;
pub use adapters::email::EmailAdapter;
pub use adapters::slack::SlackAdapter;
pub use adapters::{NotificationAdapter, Recipient};
pub use context::MessageContext;
pub use messenger::Messenger;
pub use settings::MessagingSettings;
