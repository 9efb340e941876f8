//! Chat webhook adapter.
//!
//! Posts one-line summaries to a chat webhook endpoint, addressed to the
//! room of the submission's lead. Missing configuration (endpoint URL or
//! default room) turns every send into a no-op; that is the deployment
//! switch for this channel. Sends are one-shot with no retry; failures land
//! in the delivery log.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use fundflow_core::message_type::MessageType;

use crate::adapters::{DeliveryError, NotificationAdapter, Recipient};
use crate::catalog::{Catalog, Template};
use crate::context::MessageContext;
use crate::delivery_log::DeliveryLog;
use crate::settings::MessagingSettings;

/// HTTP request timeout for a single webhook POST.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts room messages to the configured chat webhook.
pub struct SlackAdapter {
    client: reqwest::Client,
    settings: Arc<MessagingSettings>,
    log: Arc<dyn DeliveryLog>,
    catalog: Catalog,
}

impl SlackAdapter {
    pub fn new(settings: Arc<MessagingSettings>, log: Arc<dyn DeliveryLog>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            settings,
            log,
            catalog: build_catalog(),
        }
    }
}

/// Chat is the staff firehose: every message type gets a one-liner.
fn build_catalog() -> Catalog {
    Catalog::new()
        .with(
            MessageType::NewSubmission,
            Template::Text("A new submission has been received: {submission}"),
        )
        .with(
            MessageType::UpdateLead,
            Template::Text("The lead of {submission} has been updated from {old_lead} to {lead} by {user}"),
        )
        .with(
            MessageType::Transition,
            Template::Text("{user} has updated the status of {submission}: {old_phase} to {phase}"),
        )
        .with(
            MessageType::Comment,
            Template::Text("A new comment has been posted on {submission} by {user}"),
        )
        .with(
            MessageType::NewReview,
            Template::Text("{user} has submitted a review for {submission}"),
        )
        .with(
            MessageType::ReviewersUpdated,
            Template::Text("{user} has updated the reviewers on {submission}"),
        )
        .with(
            MessageType::ReadyForReview,
            Template::Text("{submission} is ready for review"),
        )
        .with(
            MessageType::DeterminationOutcome,
            Template::Text("A determination for {submission} was sent: {outcome}"),
        )
        .with(
            MessageType::SendForApproval,
            Template::Text("{user} has requested approval on project {project}"),
        )
        .with(
            MessageType::UpdateProjectLead,
            Template::Text("The lead of project {project} has been updated from {old_lead} to {project_lead} by {user}"),
        )
}

#[async_trait]
impl NotificationAdapter for SlackAdapter {
    fn label(&self) -> &'static str {
        "Slack"
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

    fn recipients(&self, _message_type: MessageType, ctx: &MessageContext) -> Vec<Recipient> {
        // An empty room falls back to the default room at send time, so a
        // lead without a linked chat handle still reaches staff.
        vec![Recipient::Room(
            ctx.submission.lead.slack.clone().unwrap_or_default(),
        )]
    }

    async fn send_message(
        &self,
        _message_type: MessageType,
        message: &str,
        recipient: &Recipient,
        _ctx: &MessageContext,
    ) -> Result<(), DeliveryError> {
        let Some((url, default_room)) = self.settings.slack.destination() else {
            return Err(DeliveryError::NotConfigured(
                "slack destination URL or room is unset",
            ));
        };

        let room = match recipient {
            Recipient::Room(room) if !room.is_empty() => room.as_str(),
            _ => default_room,
        };
        let payload = serde_json::json!({
            "room": room,
            "message": message,
        });

        let response = self.client.post(url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}
