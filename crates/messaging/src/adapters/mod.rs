//! Notification channels and the contract they share.
//!
//! Every channel implements [`NotificationAdapter`] and inherits the same
//! processing pipeline from [`NotificationAdapter::process`]:
//!
//! 1. look the message type up in the adapter's catalog; no entry means the
//!    adapter ignores the message,
//! 2. render the template against the dispatch context; a render failure is
//!    traced and the message skipped,
//! 3. resolve recipients from submission state,
//! 4. deliver to each recipient, or queue a request notice when external
//!    sending is disabled, and record every attempt in the delivery log.
//!
//! Nothing in this pipeline returns an error to the messenger: a channel
//! that cannot deliver records the failure and stays out of its siblings'
//! way.

pub mod activity;
pub mod email;
pub mod slack;

use std::fmt;

use async_trait::async_trait;

use fundflow_core::event::Event;
use fundflow_core::message_type::MessageType;

use crate::catalog::{context_values, render_str, Catalog, Template, TemplateValues};
use crate::context::MessageContext;
use crate::delivery_log::{DeliveryAttempt, DeliveryLog};
use crate::mail::MailError;
use crate::store::StoreError;

// ---------------------------------------------------------------------------
// Recipient / DeliveryStatus
// ---------------------------------------------------------------------------

/// Where a message is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// The submission's activity feed; no external address.
    Feed,
    /// An email address.
    Email(String),
    /// A chat room identifier. May be empty, in which case the configured
    /// default room applies at send time.
    Room(String),
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Feed => f.write_str("activity feed"),
            Recipient::Email(address) => f.write_str(address),
            Recipient::Room(room) if room.is_empty() => f.write_str("default room"),
            Recipient::Room(room) => f.write_str(room),
        }
    }
}

/// Outcome of one delivery attempt, as recorded in the delivery log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Delivered to the channel.
    Sent,
    /// External sending is disabled; surfaced as a request notice instead.
    NotSent,
    /// The adapter is missing configuration; nothing was attempted.
    NotConfigured,
    /// The delivery was attempted and failed.
    Failed(String),
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Sent => f.write_str("sent"),
            DeliveryStatus::NotSent => f.write_str("not sent"),
            DeliveryStatus::NotConfigured => f.write_str("not configured"),
            DeliveryStatus::Failed(error) => write!(f, "failed: {error}"),
        }
    }
}

// ---------------------------------------------------------------------------
// DeliveryError
// ---------------------------------------------------------------------------

/// Error raised by an adapter's [`NotificationAdapter::send_message`].
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The channel is missing deployment configuration. A no-op, not a
    /// failure.
    #[error("adapter not configured: {0}")]
    NotConfigured(&'static str),

    /// The webhook HTTP request failed (connect, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook endpoint answered with a non-success status.
    #[error("webhook returned HTTP {0}")]
    HttpStatus(u16),

    /// The mail transport refused or failed the send.
    #[error(transparent)]
    Mail(#[from] MailError),

    /// Persisting an activity row failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DeliveryError {
    /// Collapse into the status recorded in the delivery log.
    fn into_status(self) -> DeliveryStatus {
        match self {
            DeliveryError::NotConfigured(_) => DeliveryStatus::NotConfigured,
            other => DeliveryStatus::Failed(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationAdapter
// ---------------------------------------------------------------------------

/// A notification channel.
#[async_trait]
pub trait NotificationAdapter: Send + Sync {
    /// Label used in request notices and the delivery log.
    fn label(&self) -> &'static str;

    /// This adapter's message catalog.
    fn catalog(&self) -> &Catalog;

    /// Whether external sending is enabled for this deployment.
    fn send_enabled(&self) -> bool;

    /// Sink backing [`log_message`](Self::log_message).
    fn delivery_log(&self) -> &dyn DeliveryLog;

    /// Channels whose side effects stay inside the platform (the activity
    /// feed) deliver even when external sending is disabled.
    fn deliver_when_disabled(&self) -> bool {
        false
    }

    /// Recipients for a message, computed from submission state. An empty
    /// list means nothing is delivered or logged.
    fn recipients(&self, message_type: MessageType, ctx: &MessageContext) -> Vec<Recipient>;

    /// Adapter-specific template values, merged over the shared context
    /// values before rendering.
    fn extra_values(&self, _message_type: MessageType, _ctx: &MessageContext) -> TemplateValues {
        TemplateValues::new()
    }

    /// Deliver one rendered message to one recipient.
    async fn send_message(
        &self,
        message_type: MessageType,
        message: &str,
        recipient: &Recipient,
        ctx: &MessageContext,
    ) -> Result<(), DeliveryError>;

    /// Record one attempted delivery. Runs after every attempt, whatever
    /// the outcome.
    async fn log_message(
        &self,
        message: &str,
        recipient: &Recipient,
        event: &Event,
        status: DeliveryStatus,
    ) {
        self.delivery_log()
            .record(DeliveryAttempt {
                adapter: self.label(),
                recipient: recipient.clone(),
                message: message.to_string(),
                event_id: event.id,
                status,
            })
            .await;
    }

    /// Process one dispatched message end to end.
    async fn process(&self, message_type: MessageType, event: &Event, ctx: &MessageContext) {
        let message = match self.catalog().template_for(message_type) {
            Some(Template::Text(template)) => {
                let mut values = context_values(ctx);
                values.extend(self.extra_values(message_type, ctx));
                match render_str(template, &values) {
                    Ok(message) => message,
                    Err(e) => {
                        tracing::error!(
                            adapter = self.label(),
                            message_type = message_type.as_str(),
                            error = %e,
                            "Failed to render message template"
                        );
                        return;
                    }
                }
            }
            Some(Template::Render(render)) => match render(ctx) {
                Some(message) => message,
                None => return,
            },
            None => return,
        };

        for recipient in self.recipients(message_type, ctx) {
            let status = if self.send_enabled() || self.deliver_when_disabled() {
                match self.send_message(message_type, &message, &recipient, ctx).await {
                    Ok(()) => DeliveryStatus::Sent,
                    Err(e) => e.into_status(),
                }
            } else {
                if let Some(notices) = &ctx.notices {
                    notices.info(format!("{}: {}", self.label(), message));
                }
                DeliveryStatus::NotSent
            };
            self.log_message(&message, &recipient, event, status).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
