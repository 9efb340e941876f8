//! Email adapter.
//!
//! Mails applicants about their own submission and reviewers when a
//! submission is ready for them. Delivery goes through the
//! [`MailTransport`] seam; each recipient is attempted independently so one
//! bad address cannot block the rest of a batch.

use std::sync::Arc;

use async_trait::async_trait;

use fundflow_core::message_type::MessageType;

use crate::adapters::{DeliveryError, NotificationAdapter, Recipient};
use crate::catalog::{Catalog, DeterminationMessages, Template};
use crate::context::MessageContext;
use crate::delivery_log::DeliveryLog;
use crate::mail::{MailError, MailTransport};
use crate::settings::MessagingSettings;

/// Mails applicants and reviewers.
pub struct EmailAdapter {
    mailer: Arc<dyn MailTransport>,
    settings: Arc<MessagingSettings>,
    log: Arc<dyn DeliveryLog>,
    catalog: Catalog,
}

impl EmailAdapter {
    pub fn new(
        mailer: Arc<dyn MailTransport>,
        settings: Arc<MessagingSettings>,
        log: Arc<dyn DeliveryLog>,
    ) -> Self {
        let catalog = build_catalog(settings.determination_messages.clone());
        Self {
            mailer,
            settings,
            log,
            catalog,
        }
    }

    fn subject(&self, message_type: MessageType, ctx: &MessageContext) -> String {
        match message_type {
            MessageType::ReadyForReview => {
                format!("Submission ready to review: {}", ctx.submission.title)
            }
            _ => format!("Your application: {}", ctx.submission.title),
        }
    }
}

/// Email is the only channel applicants see, so it stays quiet: most
/// message types have no entry here.
fn build_catalog(determination_messages: DeterminationMessages) -> Catalog {
    Catalog::new()
        .with(
            MessageType::NewSubmission,
            Template::Text(
                "Dear {user},\n\n\
                 Thank you for your submission {submission}. We have received \
                 it and will be in touch once it has been reviewed.\n\n\
                 Kind regards,\nThe fundflow team",
            ),
        )
        .with(
            MessageType::Comment,
            Template::Render(Box::new(notify_comment)),
        )
        .with(
            MessageType::ReadyForReview,
            Template::Text(
                "The submission {submission} is ready for review. Please log \
                 in to record your review.",
            ),
        )
        .with(
            MessageType::DeterminationOutcome,
            Template::Render(Box::new(move |ctx: &MessageContext| {
                let determination = ctx.determination.as_ref()?;
                let body = determination_messages
                    .for_stage(ctx.submission.stage)
                    .map(str::to_string)
                    .unwrap_or_else(|| determination.message.clone());
                Some(format!(
                    "A determination has been made on {}.\n\nOutcome: {}\n\n{}",
                    ctx.submission.title, determination.outcome, body
                ))
            })),
        )
}

/// Internal comments never leave the platform.
fn notify_comment(ctx: &MessageContext) -> Option<String> {
    let comment = ctx.comment.as_ref()?;
    if comment.is_internal() {
        return None;
    }
    Some(format!(
        "{} commented on {}:\n\n{}",
        comment.author.name, ctx.submission.title, comment.body
    ))
}

#[async_trait]
impl NotificationAdapter for EmailAdapter {
    fn label(&self) -> &'static str {
        "Email"
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

    fn recipients(&self, message_type: MessageType, ctx: &MessageContext) -> Vec<Recipient> {
        match message_type {
            MessageType::ReadyForReview => ctx
                .submission
                .reviewers
                .iter()
                .map(|reviewer| Recipient::Email(reviewer.email.clone()))
                .collect(),
            MessageType::Comment => {
                // Never mail someone about their own comment.
                let author_id = ctx.comment.as_ref().map(|comment| comment.author.id);
                if author_id == Some(ctx.submission.owner.id) {
                    Vec::new()
                } else {
                    vec![Recipient::Email(ctx.submission.owner.email.clone())]
                }
            }
            _ => vec![Recipient::Email(ctx.submission.owner.email.clone())],
        }
    }

    async fn send_message(
        &self,
        message_type: MessageType,
        message: &str,
        recipient: &Recipient,
        ctx: &MessageContext,
    ) -> Result<(), DeliveryError> {
        let Recipient::Email(address) = recipient else {
            return Err(DeliveryError::Mail(MailError::Rejected(format!(
                "not an email recipient: {recipient}"
            ))));
        };
        let subject = self.subject(message_type, ctx);
        self.mailer
            .send(&[address.clone()], &subject, message)
            .await?;
        Ok(())
    }
}
