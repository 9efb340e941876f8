//! End-to-end dispatch tests over the full adapter set.
//!
//! Wires a [`Messenger`] with the real activity, email and slack adapters
//! against in-memory stores and transports, then checks the cross-channel
//! behaviour: who gets notified, what lands in the audit trail, and how
//! failures in one channel stay out of the others.

use std::sync::Arc;

use async_trait::async_trait;

use fundflow_core::activity::Visibility;
use fundflow_core::comment::CommentRef;
use fundflow_core::event::RelatedKind;
use fundflow_core::message_type::MessageType;
use fundflow_core::submission::{FundingStage, SubmissionRef, UserRef};

use fundflow_messaging::adapters::{DeliveryStatus, NotificationAdapter};
use fundflow_messaging::delivery_log::{DeliveryLog, MemoryDeliveryLog};
use fundflow_messaging::mail::{MailError, MailTransport, MemoryMailer};
use fundflow_messaging::notices::NoticeQueue;
use fundflow_messaging::store::memory::{MemoryActivityStore, MemoryEventStore};
use fundflow_messaging::store::{ActivityStore, EventStore};
use fundflow_messaging::{
    ActivityAdapter, EmailAdapter, MessageContext, Messenger, MessagingSettings, SlackAdapter,
};

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    messenger: Messenger,
    events: Arc<MemoryEventStore>,
    feed: Arc<MemoryActivityStore>,
    mailer: Arc<MemoryMailer>,
    log: Arc<MemoryDeliveryLog>,
}

/// Full adapter set over in-memory collaborators. The slack destination is
/// left unconfigured; its unit tests cover the HTTP path.
fn harness(settings: MessagingSettings) -> Harness {
    let settings = Arc::new(settings);
    let events = Arc::new(MemoryEventStore::new());
    let feed = Arc::new(MemoryActivityStore::new());
    let mailer = Arc::new(MemoryMailer::new());
    let log = Arc::new(MemoryDeliveryLog::new());

    let activity = ActivityAdapter::new(
        Arc::clone(&feed) as Arc<dyn ActivityStore>,
        Arc::clone(&settings),
        Arc::clone(&log) as Arc<dyn DeliveryLog>,
    );
    let email = EmailAdapter::new(
        Arc::clone(&mailer) as Arc<dyn MailTransport>,
        Arc::clone(&settings),
        Arc::clone(&log) as Arc<dyn DeliveryLog>,
    );
    let slack = SlackAdapter::new(
        Arc::clone(&settings),
        Arc::clone(&log) as Arc<dyn DeliveryLog>,
    );

    let messenger = Messenger::new(
        Arc::clone(&events) as Arc<dyn EventStore>,
        vec![
            Arc::new(activity) as Arc<dyn NotificationAdapter>,
            Arc::new(email) as Arc<dyn NotificationAdapter>,
            Arc::new(slack) as Arc<dyn NotificationAdapter>,
        ],
    );

    Harness {
        messenger,
        events,
        feed,
        mailer,
        log,
    }
}

fn sending_enabled() -> MessagingSettings {
    MessagingSettings {
        send_messages: true,
        ..MessagingSettings::default()
    }
}

fn owner() -> UserRef {
    UserRef::new(3, "Pat", "pat@example.com")
}

fn lead() -> UserRef {
    UserRef::new(2, "Morgan", "morgan@example.com")
}

fn submission() -> SubmissionRef {
    SubmissionRef {
        id: 42,
        title: "Mesh Radios".to_string(),
        phase: "Internal Review".to_string(),
        stage: FundingStage::Concept,
        owner: owner(),
        lead: lead(),
        reviewers: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// A lead change lands in the feed, stays out of email, and records one
/// event plus a delivery log entry per channel that acted.
#[tokio::test]
async fn update_lead_fans_out_to_the_right_channels() {
    let h = harness(sending_enabled());
    let ctx = MessageContext::new(lead(), submission())
        .with_old_lead(UserRef::new(9, "Jo", "jo@example.com"));

    let event = h
        .messenger
        .dispatch(MessageType::UpdateLead, ctx)
        .await
        .unwrap();

    let feed = h.feed.for_submission(42).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].message, "Lead changed from Jo to Morgan");

    assert!(h.mailer.sent().is_empty());

    let entries = h.log.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].adapter, "Activity feed");
    assert_eq!(entries[0].status, DeliveryStatus::Sent);
    assert_eq!(entries[0].event_id, event.id);
    assert_eq!(entries[1].adapter, "Slack");
    assert_eq!(entries[1].status, DeliveryStatus::NotConfigured);
}

/// Four reviewers means four individual emails, no feed noise.
#[tokio::test]
async fn ready_for_review_mails_each_reviewer_once() {
    let h = harness(sending_enabled());
    let mut submission = submission();
    submission.reviewers = (1..=4)
        .map(|n| UserRef::new(10 + n, format!("Reviewer {n}"), format!("r{n}@example.com")))
        .collect();
    let ctx = MessageContext::new(lead(), submission);

    h.messenger
        .dispatch(MessageType::ReadyForReview, ctx)
        .await
        .unwrap();

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 4);
    let mut recipients: Vec<String> = sent.iter().flat_map(|mail| mail.to.clone()).collect();
    recipients.sort();
    assert_eq!(
        recipients,
        vec![
            "r1@example.com".to_string(),
            "r2@example.com".to_string(),
            "r3@example.com".to_string(),
            "r4@example.com".to_string(),
        ]
    );

    assert!(h.feed.for_submission(42).await.unwrap().is_empty());
}

/// With sending disabled, external channels surface exactly one request
/// notice (from the chat adapter) while the feed still gets its entry.
#[tokio::test]
async fn disabled_sending_surfaces_a_single_notice() {
    let h = harness(MessagingSettings::default());
    let notices = NoticeQueue::new();
    let ctx = MessageContext::new(lead(), submission())
        .with_old_lead(UserRef::new(9, "Jo", "jo@example.com"))
        .with_notices(notices.clone());

    h.messenger
        .dispatch(MessageType::UpdateLead, ctx)
        .await
        .unwrap();

    let queued = notices.drain();
    assert_eq!(queued.len(), 1);
    assert!(queued[0].body.starts_with("Slack:"));
    assert!(queued[0].body.contains("Morgan"));

    assert_eq!(h.feed.for_submission(42).await.unwrap().len(), 1);
    assert!(h.mailer.sent().is_empty());
}

/// A public staff comment notifies the applicant by email and records the
/// comment as the event's related object; the feed stays quiet because the
/// comment already lives there.
#[tokio::test]
async fn comments_notify_by_email_but_not_the_feed() {
    let h = harness(sending_enabled());
    let ctx = MessageContext::new(lead(), submission()).with_comment(CommentRef {
        id: 8,
        author: lead(),
        body: "Could you expand the budget section?".to_string(),
        visibility: Visibility::Public,
    });

    let event = h
        .messenger
        .dispatch(MessageType::Comment, ctx)
        .await
        .unwrap();

    assert_eq!(event.related.map(|r| r.kind), Some(RelatedKind::Comment));

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["pat@example.com".to_string()]);

    assert!(h.feed.for_submission(42).await.unwrap().is_empty());
}

/// A broken mail transport is recorded in the delivery log and never stops
/// the feed entry or the dispatch itself.
#[tokio::test]
async fn one_channel_failing_never_blocks_the_others() {
    struct DownMailer;

    #[async_trait]
    impl MailTransport for DownMailer {
        async fn send(&self, _to: &[String], _s: &str, _b: &str) -> Result<(), MailError> {
            Err(MailError::Rejected("relay refused connection".to_string()))
        }
    }

    let settings = Arc::new(sending_enabled());
    let events = Arc::new(MemoryEventStore::new());
    let feed = Arc::new(MemoryActivityStore::new());
    let log = Arc::new(MemoryDeliveryLog::new());

    let messenger = Messenger::new(
        Arc::clone(&events) as Arc<dyn EventStore>,
        vec![
            Arc::new(ActivityAdapter::new(
                Arc::clone(&feed) as Arc<dyn ActivityStore>,
                Arc::clone(&settings),
                Arc::clone(&log) as Arc<dyn DeliveryLog>,
            )) as Arc<dyn NotificationAdapter>,
            Arc::new(EmailAdapter::new(
                Arc::new(DownMailer) as Arc<dyn MailTransport>,
                Arc::clone(&settings),
                Arc::clone(&log) as Arc<dyn DeliveryLog>,
            )) as Arc<dyn NotificationAdapter>,
        ],
    );

    let ctx = MessageContext::new(owner(), submission());
    messenger
        .dispatch(MessageType::NewSubmission, ctx)
        .await
        .unwrap();

    // The feed entry landed even though every mail bounced.
    assert_eq!(feed.for_submission(42).await.unwrap().len(), 1);

    let entries = log.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].status, DeliveryStatus::Sent);
    assert!(matches!(entries[1].status, DeliveryStatus::Failed(_)));
}

/// The audit log grows by exactly one row per dispatch, whatever the
/// adapters do with the message.
#[tokio::test]
async fn every_dispatch_records_exactly_one_event() {
    let h = harness(sending_enabled());

    for message_type in [
        MessageType::NewSubmission,
        MessageType::NewReview,
        MessageType::Transition,
    ] {
        let ctx = MessageContext::new(lead(), submission()).with_old_phase("Screening");
        h.messenger.dispatch(message_type, ctx).await.unwrap();
    }

    let events = h.events.recent(10).await.unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].message_type, MessageType::Transition);
    assert_eq!(events[2].message_type, MessageType::NewSubmission);
}
