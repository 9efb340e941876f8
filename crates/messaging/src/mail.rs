//! Mail transport seam.
//!
//! The email adapter depends on [`MailTransport`] rather than a concrete
//! client. [`SmtpMailer`] is the production implementation over the
//! `lettre` async SMTP transport; [`MemoryMailer`] records messages for
//! tests and local development. [`SmtpConfig::from_env`] returns `None`
//! when no relay is configured, in which case no mailer is constructed.

use std::sync::Mutex;

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for mail delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The relay could not be reached, or refused the session.
    #[error("SMTP send failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// A recipient or sender mailbox failed to parse.
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message body or headers failed to assemble.
    #[error("could not assemble message: {0}")]
    Build(String),

    /// The transport accepted the request but refused the message.
    #[error("mail rejected: {0}")]
    Rejected(String),
}

// ---------------------------------------------------------------------------
// MailTransport
// ---------------------------------------------------------------------------

/// Outbound mail delivery.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one plain-text message to one or more addresses.
    async fn send(&self, to: &[String], subject: &str, body: &str) -> Result<(), MailError>;
}

// ---------------------------------------------------------------------------
// SmtpConfig
// ---------------------------------------------------------------------------

/// STARTTLS submission port, used when `SMTP_PORT` is absent.
const DEFAULT_SMTP_PORT: u16 = 587;

/// Fallback sender mailbox.
const DEFAULT_FROM_ADDRESS: &str = "noreply@fundflow.local";

/// Connection settings for [`SmtpMailer`].
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay hostname. The only required setting.
    pub host: String,
    /// Relay port, 587 unless overridden.
    pub port: u16,
    /// RFC 5322 "From" mailbox stamped on every outgoing message.
    pub from_address: String,
    /// Credentials; both must be present for the session to authenticate.
    pub user: Option<String>,
    pub password: Option<String>,
}

impl SmtpConfig {
    /// Read settings from the `SMTP_*` environment variables.
    ///
    /// `SMTP_HOST` is the gate: when it is absent this returns `None` and
    /// the caller skips email delivery entirely. `SMTP_PORT` falls back to
    /// 587, `SMTP_FROM` to a local noreply mailbox, and the session
    /// authenticates only when both `SMTP_USER` and `SMTP_PASSWORD` are
    /// present.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);
        Some(Self {
            host,
            port,
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            user: std::env::var("SMTP_USER").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Sends plain-text mail through a pooled lettre SMTP transport.
pub struct SmtpMailer {
    from_address: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the STARTTLS transport up front; lettre pools and reuses
    /// connections across sends.
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let mut relay =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);
        if let (Some(user), Some(password)) = (config.user, config.password) {
            relay = relay.credentials(Credentials::new(user, password));
        }
        Ok(Self {
            from_address: config.from_address,
            transport: relay.build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, to: &[String], subject: &str, body: &str) -> Result<(), MailError> {
        let mut message = Message::builder()
            .from(self.from_address.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN);
        for address in to {
            message = message.to(address.parse()?);
        }
        let message = message
            .body(body.to_string())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryMailer
// ---------------------------------------------------------------------------

/// A message captured by [`MemoryMailer`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Recording transport for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<SentMail>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message sent so far, in send order.
    pub fn sent(&self) -> Vec<SentMail> {
        let outbox = self.outbox.lock().unwrap_or_else(|e| e.into_inner());
        outbox.clone()
    }
}

#[async_trait]
impl MailTransport for MemoryMailer {
    async fn send(&self, to: &[String], subject: &str, body: &str) -> Result<(), MailError> {
        let mut outbox = self.outbox.lock().unwrap_or_else(|e| e.into_inner());
        outbox.push(SentMail {
            to: to.to_vec(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
