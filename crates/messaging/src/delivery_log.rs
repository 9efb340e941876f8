//! Delivery attempt logging.
//!
//! Adapters record one entry per attempted delivery, whatever the outcome,
//! so the trail reflects what each channel tried to do rather than only
//! what succeeded.

use std::sync::Mutex;

use async_trait::async_trait;

use fundflow_core::types::DbId;
use fundflow_db::repositories::MessageRepo;
use fundflow_db::DbPool;

use crate::adapters::{DeliveryStatus, Recipient};

/// One attempted delivery by one adapter.
#[derive(Debug, Clone)]
pub struct DeliveryAttempt {
    /// Adapter label, e.g. `"Email"`.
    pub adapter: &'static str,
    pub recipient: Recipient,
    /// The rendered message content.
    pub message: String,
    /// The event this delivery belongs to.
    pub event_id: DbId,
    pub status: DeliveryStatus,
}

/// Sink for delivery attempts.
#[async_trait]
pub trait DeliveryLog: Send + Sync {
    async fn record(&self, attempt: DeliveryAttempt);
}

fn trace_attempt(attempt: &DeliveryAttempt) {
    match &attempt.status {
        DeliveryStatus::Sent => tracing::info!(
            adapter = attempt.adapter,
            recipient = %attempt.recipient,
            event_id = attempt.event_id,
            "Notification delivered"
        ),
        DeliveryStatus::NotSent => tracing::debug!(
            adapter = attempt.adapter,
            recipient = %attempt.recipient,
            event_id = attempt.event_id,
            "Delivery disabled, notification surfaced as notice"
        ),
        DeliveryStatus::NotConfigured => tracing::debug!(
            adapter = attempt.adapter,
            event_id = attempt.event_id,
            "Adapter not configured, notification skipped"
        ),
        DeliveryStatus::Failed(error) => tracing::warn!(
            adapter = attempt.adapter,
            recipient = %attempt.recipient,
            event_id = attempt.event_id,
            error = %error,
            "Notification delivery failed"
        ),
    }
}

/// Default sink: structured tracing only.
#[derive(Debug, Default)]
pub struct TracingDeliveryLog;

#[async_trait]
impl DeliveryLog for TracingDeliveryLog {
    async fn record(&self, attempt: DeliveryAttempt) {
        trace_attempt(&attempt);
    }
}

/// Recording sink for tests.
#[derive(Debug, Default)]
pub struct MemoryDeliveryLog {
    entries: Mutex<Vec<DeliveryAttempt>>,
}

impl MemoryDeliveryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded attempt, in record order.
    pub fn entries(&self) -> Vec<DeliveryAttempt> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clone()
    }
}

#[async_trait]
impl DeliveryLog for MemoryDeliveryLog {
    async fn record(&self, attempt: DeliveryAttempt) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push(attempt);
    }
}

/// Sink persisting attempts to the `messages` table, with the same tracing
/// as [`TracingDeliveryLog`].
///
/// Persist failures are traced and swallowed: losing a log row must not
/// break the delivery that produced it.
pub struct PgDeliveryLog {
    pool: DbPool,
}

impl PgDeliveryLog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryLog for PgDeliveryLog {
    async fn record(&self, attempt: DeliveryAttempt) {
        trace_attempt(&attempt);
        let result = MessageRepo::insert(
            &self.pool,
            attempt.adapter,
            &attempt.recipient.to_string(),
            &attempt.message,
            attempt.event_id,
            &attempt.status.to_string(),
        )
        .await;
        if let Err(e) = result {
            tracing::error!(
                error = %e,
                adapter = attempt.adapter,
                event_id = attempt.event_id,
                "Failed to persist delivery log entry"
            );
        }
    }
}
