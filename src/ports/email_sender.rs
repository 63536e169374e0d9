//! EmailSender port for templated transactional email.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::notification::TemplatedEmail;

/// Errors from the email delivery service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email service rejected message with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Email service unreachable: {0}")]
    Transport(String),

    #[error("Email service misconfigured: {0}")]
    Configuration(String),
}

impl From<EmailError> for DomainError {
    fn from(err: EmailError) -> Self {
        DomainError::new(ErrorCode::EmailDeliveryFailed, err.to_string())
    }
}

/// Port for sending templated email through a delivery service.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send one message. Returns once the service accepted it.
    async fn send(&self, email: TemplatedEmail) -> Result<(), EmailError>;
}
