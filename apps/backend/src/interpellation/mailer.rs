//! Mail transport seam.
//!
//! Delivery itself (SMTP, provider API) lives outside this crate; the
//! application only depends on the [`Mailer`] trait.

use std::fmt;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

use crate::error::AppError;
use crate::logging::pii::Redacted;

/// A fully composed message ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Errors reported by a mail transport.
#[derive(Debug)]
pub enum MailError {
    /// The transport could not be reached
    Unavailable(String),
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailError::Unavailable(msg) => write!(f, "mail transport unavailable: {msg}"),
        }
    }
}

impl std::error::Error for MailError {}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::mail_delivery(err.to_string())
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// Transport that only logs messages (addresses redacted).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let to = email.to.join(",");
        let cc = email.cc.join(",");
        info!(
            to = %Redacted(&to),
            cc = %Redacted(&cc),
            subject = %email.subject,
            body_len = email.body.len(),
            "Email dispatched to log transport"
        );
        Ok(())
    }
}

/// In-memory outbox, optionally failing every send.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<OutgoingEmail>>,
    failure: Option<String>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails with `MailError::Unavailable`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
            failure: Some(reason.into()),
        }
    }

    /// Messages accepted so far, oldest first.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox.lock().clone()
    }

    /// Drain the outbox.
    pub fn take(&self) -> Vec<OutgoingEmail> {
        std::mem::take(&mut *self.outbox.lock())
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        if let Some(reason) = &self.failure {
            return Err(MailError::Unavailable(reason.clone()));
        }
        self.outbox.lock().push(email);
        Ok(())
    }
}
