//! The dispatch façade.

use std::sync::Arc;

use fundflow_core::event::Event;
use fundflow_core::message_type::MessageType;

use crate::adapters::NotificationAdapter;
use crate::context::MessageContext;
use crate::store::{EventStore, StoreError};

/// Fan-out entry point for notifications.
///
/// One call to [`dispatch`](Messenger::dispatch) records exactly one
/// [`Event`] and then hands the message to every adapter, in configuration
/// order. Adapter failures never reach the caller; a failure to record the
/// event does, because without the audit row the action must not look like
/// it was announced.
pub struct Messenger {
    events: Arc<dyn EventStore>,
    adapters: Vec<Arc<dyn NotificationAdapter>>,
}

impl Messenger {
    /// Create a messenger over a fixed, ordered adapter list.
    pub fn new(events: Arc<dyn EventStore>, adapters: Vec<Arc<dyn NotificationAdapter>>) -> Self {
        Self { events, adapters }
    }

    /// Record the event, then notify every adapter.
    pub async fn dispatch(
        &self,
        message_type: MessageType,
        ctx: MessageContext,
    ) -> Result<Event, StoreError> {
        let event = self
            .events
            .record(
                message_type,
                ctx.actor.id,
                ctx.submission.id,
                ctx.related_ref(),
            )
            .await?;

        tracing::debug!(
            message_type = message_type.as_str(),
            event_id = event.id,
            submission_id = ctx.submission.id,
            "Dispatching notification"
        );

        for adapter in &self.adapters {
            adapter.process(message_type, &event, &ctx).await;
        }

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use fundflow_core::event::RelatedRef;
    use fundflow_core::submission::{FundingStage, SubmissionRef, UserRef};
    use fundflow_core::types::DbId;

    use crate::adapters::{DeliveryError, Recipient};
    use crate::catalog::{Catalog, Template};
    use crate::delivery_log::{DeliveryLog, MemoryDeliveryLog};
    use crate::store::memory::MemoryEventStore;

    use super::*;

    /// Adapter that counts how often the pipeline asks it to deliver.
    struct CountingAdapter {
        catalog: Catalog,
        log: MemoryDeliveryLog,
        deliveries: AtomicUsize,
    }

    impl CountingAdapter {
        fn new() -> Self {
            Self {
                catalog: Catalog::new()
                    .with(MessageType::UpdateLead, Template::Text("lead updated")),
                log: MemoryDeliveryLog::new(),
                deliveries: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl NotificationAdapter for CountingAdapter {
        fn label(&self) -> &'static str {
            "Counting"
        }

        fn catalog(&self) -> &Catalog {
            &self.catalog
        }

        fn send_enabled(&self) -> bool {
            true
        }

        fn delivery_log(&self) -> &dyn DeliveryLog {
            &self.log
        }

        fn recipients(&self, _message_type: MessageType, _ctx: &MessageContext) -> Vec<Recipient> {
            vec![Recipient::Feed]
        }

        async fn send_message(
            &self,
            _message_type: MessageType,
            _message: &str,
            _recipient: &Recipient,
            _ctx: &MessageContext,
        ) -> Result<(), DeliveryError> {
            self.deliveries.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingEventStore;

    #[async_trait]
    impl EventStore for FailingEventStore {
        async fn record(
            &self,
            _message_type: MessageType,
            _actor_id: DbId,
            _submission_id: DbId,
            _related: Option<RelatedRef>,
        ) -> Result<Event, StoreError> {
            Err(StoreError::Data("event table unavailable".to_string()))
        }

        async fn recent(&self, _limit: i64) -> Result<Vec<Event>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn ctx() -> MessageContext {
        let actor = UserRef::new(1, "Dana", "dana@example.com");
        MessageContext::new(
            actor.clone(),
            SubmissionRef {
                id: 42,
                title: "Mesh Radios".to_string(),
                phase: "Internal Review".to_string(),
                stage: FundingStage::Concept,
                owner: actor.clone(),
                lead: actor,
                reviewers: Vec::new(),
            },
        )
    }

    #[tokio::test]
    async fn records_one_event_and_reaches_every_adapter() {
        let events = Arc::new(MemoryEventStore::new());
        let first = Arc::new(CountingAdapter::new());
        let second = Arc::new(CountingAdapter::new());
        let messenger = Messenger::new(
            Arc::clone(&events) as Arc<dyn EventStore>,
            vec![
                Arc::clone(&first) as Arc<dyn NotificationAdapter>,
                Arc::clone(&second) as Arc<dyn NotificationAdapter>,
            ],
        );

        let event = messenger
            .dispatch(MessageType::UpdateLead, ctx())
            .await
            .unwrap();

        assert_eq!(event.message_type, MessageType::UpdateLead);
        assert_eq!(event.actor_id, 1);
        assert_eq!(event.submission_id, 42);

        let recorded = events.recent(10).await.unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].id, event.id);

        assert_eq!(first.deliveries.load(Ordering::SeqCst), 1);
        assert_eq!(second.deliveries.load(Ordering::SeqCst), 1);
        assert_eq!(first.log.entries()[0].event_id, event.id);
    }

    #[tokio::test]
    async fn event_store_failures_propagate_before_any_adapter_runs() {
        let adapter = Arc::new(CountingAdapter::new());
        let messenger = Messenger::new(
            Arc::new(FailingEventStore),
            vec![Arc::clone(&adapter) as Arc<dyn NotificationAdapter>],
        );

        let err = messenger
            .dispatch(MessageType::UpdateLead, ctx())
            .await
            .unwrap_err();

        assert_matches!(err, StoreError::Data(_));
        assert_eq!(adapter.deliveries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn adapters_without_a_template_stay_silent() {
        let events = Arc::new(MemoryEventStore::new());
        let adapter = Arc::new(CountingAdapter::new());
        let messenger = Messenger::new(
            Arc::clone(&events) as Arc<dyn EventStore>,
            vec![Arc::clone(&adapter) as Arc<dyn NotificationAdapter>],
        );

        // The event is still recorded even though no adapter cares.
        messenger
            .dispatch(MessageType::NewReview, ctx())
            .await
            .unwrap();

        assert_eq!(events.recent(10).await.unwrap().len(), 1);
        assert_eq!(adapter.deliveries.load(Ordering::SeqCst), 0);
    }
}
