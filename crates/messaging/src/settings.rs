//! Messaging configuration.
//!
//! Nothing in the dispatch pipeline reads process-global state: all knobs
//! are captured in a [`MessagingSettings`] value at startup and shared with
//! the adapters from there.

use std::env;

use crate::catalog::DeterminationMessages;

/// Chat webhook destination.
#[derive(Debug, Clone, Default)]
pub struct SlackSettings {
    /// Webhook endpoint URL.
    pub destination_url: Option<String>,
    /// Default room identifier.
    pub destination_room: Option<String>,
}

impl SlackSettings {
    /// URL and default room, when both are configured. Either one missing
    /// disables the chat adapter.
    pub fn destination(&self) -> Option<(&str, &str)> {
        match (&self.destination_url, &self.destination_room) {
            (Some(url), Some(room)) => Some((url.as_str(), room.as_str())),
            _ => None,
        }
    }
}

/// Configuration for the messaging core.
#[derive(Debug, Clone, Default)]
pub struct MessagingSettings {
    /// Master switch for external delivery. When `false`, adapters queue a
    /// request notice instead of sending, and only channels with internal
    /// side effects (the activity feed) still deliver.
    pub send_messages: bool,
    /// Chat webhook destination.
    pub slack: SlackSettings,
    /// Per-stage determination texts.
    pub determination_messages: DeterminationMessages,
}

impl MessagingSettings {
    /// Load settings from environment variables.
    ///
    /// | Variable                 | Default |
    /// |--------------------------|---------|
    /// | `SEND_MESSAGES`          | `false` |
    /// | `SLACK_DESTINATION_URL`  | unset   |
    /// | `SLACK_DESTINATION_ROOM` | unset   |
    ///
    /// Defaulting `SEND_MESSAGES` to off keeps a half-configured deployment
    /// from mailing real people. Determination texts are deployment data
    /// rather than environment strings; set them on the returned value.
    pub fn from_env() -> Self {
        let send_messages = env::var("SEND_MESSAGES")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            send_messages,
            slack: SlackSettings {
                destination_url: env::var("SLACK_DESTINATION_URL").ok(),
                destination_room: env::var("SLACK_DESTINATION_ROOM").ok(),
            },
            determination_messages: DeterminationMessages::new(),
        }
    }
}
