//! # Mail Transport Seam
//!
//! Email delivery is an external concern. `Mailer` is the transport
//! boundary; `LoggingMailer` is the default implementation, which logs
//! the message instead of sending it.

use crate::error::TravelResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// A composed email ready for transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Mail transport trait. Implementations: SMTP relay, provider API, etc.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand a message to the transport.
    async fn send(&self, message: EmailMessage) -> TravelResult<()>;
}

/// Type alias for a shared mailer (dynamic dispatch)
pub type BoxedMailer = Arc<dyn Mailer>;

/// Default transport: logs the message at info level
pub struct LoggingMailer;

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send(&self, message: EmailMessage) -> TravelResult<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "email dispatched"
        );
        Ok(())
    }
}
