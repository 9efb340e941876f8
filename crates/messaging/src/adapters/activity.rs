//! Activity feed adapter.
//!
//! "Delivery" here is appending an action note to the submission's activity
//! feed. The feed is internal to the platform, so this adapter delivers
//! even when external sending is disabled.

use std::sync::Arc;

use async_trait::async_trait;

use fundflow_core::activity::{ActivityKind, NewActivity, Visibility};
use fundflow_core::message_type::MessageType;
use fundflow_core::submission::UserRef;

use crate::adapters::{DeliveryError, NotificationAdapter, Recipient};
use crate::catalog::{Catalog, Template};
use crate::context::MessageContext;
use crate::delivery_log::DeliveryLog;
use crate::settings::MessagingSettings;
use crate::store::ActivityStore;

/// Writes system notes into the submission activity feed.
pub struct ActivityAdapter {
    activities: Arc<dyn ActivityStore>,
    settings: Arc<MessagingSettings>,
    log: Arc<dyn DeliveryLog>,
    catalog: Catalog,
}

impl ActivityAdapter {
    pub fn new(
        activities: Arc<dyn ActivityStore>,
        settings: Arc<MessagingSettings>,
        log: Arc<dyn DeliveryLog>,
    ) -> Self {
        Self {
            activities,
            settings,
            log,
            catalog: build_catalog(),
        }
    }
}

/// Feed wording is terse and past-tense; the feed renders the actor and
/// timestamp next to each entry. Comments get no entry (they already are
/// one) and ready-for-review stays email-only.
fn build_catalog() -> Catalog {
    Catalog::new()
        .with(
            MessageType::NewSubmission,
            Template::Text("Submitted {submission} for consideration"),
        )
        .with(
            MessageType::UpdateLead,
            Template::Text("Lead changed from {old_lead} to {lead}"),
        )
        .with(
            MessageType::Transition,
            Template::Text("Progressed from {old_phase} to {phase}"),
        )
        .with(MessageType::NewReview, Template::Text("Submitted a review"))
        .with(
            MessageType::ReviewersUpdated,
            Template::Render(Box::new(reviewers_updated)),
        )
        .with(
            MessageType::DeterminationOutcome,
            Template::Text("Sent a determination. Outcome: {outcome}"),
        )
        .with(
            MessageType::SendForApproval,
            Template::Text("Requested approval on project {project}"),
        )
        .with(
            MessageType::UpdateProjectLead,
            Template::Text("Project lead changed from {old_lead} to {project_lead}"),
        )
}

/// Summarise a reviewer roster change, mentioning only the sides that
/// actually changed.
fn reviewers_updated(ctx: &MessageContext) -> Option<String> {
    let mut message = vec!["Reviewers updated.".to_string()];
    if !ctx.reviewers_added.is_empty() {
        message.push(format!("Added: {}.", names(&ctx.reviewers_added)));
    }
    if !ctx.reviewers_removed.is_empty() {
        message.push(format!("Removed: {}.", names(&ctx.reviewers_removed)));
    }
    Some(message.join(" "))
}

fn names(users: &[UserRef]) -> String {
    users
        .iter()
        .map(|user| user.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl NotificationAdapter for ActivityAdapter {
    fn label(&self) -> &'static str {
        "Activity feed"
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn send_enabled(&self) -> bool {
        self.settings.send_messages
    }

    fn delivery_log(&self) -> &dyn DeliveryLog {
        self.log.as_ref()
    }

    fn deliver_when_disabled(&self) -> bool {
        true
    }

    fn recipients(&self, _message_type: MessageType, _ctx: &MessageContext) -> Vec<Recipient> {
        vec![Recipient::Feed]
    }

    async fn send_message(
        &self,
        _message_type: MessageType,
        message: &str,
        _recipient: &Recipient,
        ctx: &MessageContext,
    ) -> Result<(), DeliveryError> {
        self.activities
            .append(NewActivity {
                kind: ActivityKind::Action,
                actor_id: ctx.actor.id,
                submission_id: ctx.submission.id,
                message: message.to_string(),
                visibility: Visibility::Public,
                related: ctx.related_ref(),
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use fundflow_core::determination::{DeterminationOutcome, DeterminationRef};
    use fundflow_core::event::{Event, RelatedKind, RelatedRef};
    use fundflow_core::submission::{FundingStage, SubmissionRef};

    use crate::adapters::DeliveryStatus;
    use crate::delivery_log::MemoryDeliveryLog;
    use crate::store::memory::MemoryActivityStore;

    use super::*;

    struct Fixture {
        adapter: ActivityAdapter,
        store: Arc<MemoryActivityStore>,
        log: Arc<MemoryDeliveryLog>,
    }

    fn fixture(send_messages: bool) -> Fixture {
        let store = Arc::new(MemoryActivityStore::new());
        let log = Arc::new(MemoryDeliveryLog::new());
        let settings = Arc::new(MessagingSettings {
            send_messages,
            ..MessagingSettings::default()
        });
        let adapter = ActivityAdapter::new(
            Arc::clone(&store) as Arc<dyn ActivityStore>,
            settings,
            Arc::clone(&log) as Arc<dyn DeliveryLog>,
        );
        Fixture {
            adapter,
            store,
            log,
        }
    }

    fn ctx() -> MessageContext {
        let lead = UserRef::new(2, "Morgan", "morgan@example.com");
        MessageContext::new(
            UserRef::new(1, "Dana", "dana@example.com"),
            SubmissionRef {
                id: 42,
                title: "Mesh Radios".to_string(),
                phase: "Internal Review".to_string(),
                stage: FundingStage::Concept,
                owner: UserRef::new(3, "Pat", "pat@example.com"),
                lead,
                reviewers: Vec::new(),
            },
        )
    }

    fn event(message_type: MessageType) -> Event {
        Event {
            id: 5,
            message_type,
            actor_id: 1,
            submission_id: 42,
            related: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn writes_an_action_note() {
        let f = fixture(true);
        f.adapter
            .process(
                MessageType::NewSubmission,
                &event(MessageType::NewSubmission),
                &ctx(),
            )
            .await;

        let feed = f.store.for_submission(42).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].message, "Submitted Mesh Radios for consideration");
        assert_eq!(feed[0].kind, ActivityKind::Action);
        assert_eq!(feed[0].visibility, Visibility::Public);
        assert_eq!(feed[0].actor_id, 1);
    }

    #[tokio::test]
    async fn delivers_even_when_sending_is_disabled() {
        let f = fixture(false);
        f.adapter
            .process(
                MessageType::NewReview,
                &event(MessageType::NewReview),
                &ctx(),
            )
            .await;

        assert_eq!(f.store.for_submission(42).await.unwrap().len(), 1);
        assert_eq!(f.log.entries()[0].status, DeliveryStatus::Sent);
    }

    #[tokio::test]
    async fn lead_change_from_unassigned() {
        let f = fixture(true);
        f.adapter
            .process(
                MessageType::UpdateLead,
                &event(MessageType::UpdateLead),
                &ctx(),
            )
            .await;

        let feed = f.store.for_submission(42).await.unwrap();
        assert_eq!(feed[0].message, "Lead changed from Unassigned to Morgan");
    }

    #[tokio::test]
    async fn comments_do_not_echo_into_the_feed() {
        let f = fixture(true);
        f.adapter
            .process(MessageType::Comment, &event(MessageType::Comment), &ctx())
            .await;

        assert!(f.store.for_submission(42).await.unwrap().is_empty());
        assert!(f.log.entries().is_empty());
    }

    #[test]
    fn reviewers_added_only_mentions_added() {
        let message = reviewers_updated(
            &ctx().with_reviewer_changes(vec![UserRef::new(7, "1", "one@example.com")], vec![]),
        )
        .unwrap();

        assert!(message.contains("Added"));
        assert!(message.contains('1'));
        assert!(!message.contains("Removed"));
    }

    #[test]
    fn reviewers_removed_only_mentions_removed() {
        let message = reviewers_updated(
            &ctx().with_reviewer_changes(vec![], vec![UserRef::new(7, "1", "one@example.com")]),
        )
        .unwrap();

        assert!(message.contains("Removed"));
        assert!(message.contains('1'));
        assert!(!message.contains("Added"));
    }

    #[test]
    fn reviewers_added_and_removed_lists_both() {
        let message = reviewers_updated(&ctx().with_reviewer_changes(
            vec![UserRef::new(7, "1", "one@example.com")],
            vec![UserRef::new(8, "2", "two@example.com")],
        ))
        .unwrap();

        assert_eq!(message, "Reviewers updated. Added: 1. Removed: 2.");
    }

    #[tokio::test]
    async fn determination_notes_carry_a_related_ref() {
        let f = fixture(true);
        let ctx = ctx().with_determination(DeterminationRef {
            id: 77,
            outcome: DeterminationOutcome::Accepted,
            message: "Congratulations".to_string(),
        });

        f.adapter
            .process(
                MessageType::DeterminationOutcome,
                &event(MessageType::DeterminationOutcome),
                &ctx,
            )
            .await;

        let feed = f.store.for_submission(42).await.unwrap();
        assert_eq!(feed[0].message, "Sent a determination. Outcome: Approved");
        assert_eq!(
            feed[0].related,
            Some(RelatedRef::new(RelatedKind::Determination, 77))
        );
    }
}
