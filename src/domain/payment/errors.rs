//! Payment adapter error types.
//!
//! Every adapter operation returns `Result<_, PaymentError>`. The variants
//! follow the failure taxonomy of the gateway integration:
//!
//! | Variant | Source | Retryable |
//! |---------|--------|-----------|
//! | Configuration | missing account id or secret | no |
//! | Transport | network failure | yes |
//! | HttpStatus | non-2xx response | 5xx / 429 only |
//! | RemoteStatus | `status` field other than `OK` | no |
//! | UnexpectedResponse | body missing required fields | no |
//! | InvalidTransition | local precondition | no |
//! | RefundExceedsCaptured | local precondition | no |
//! | Validation | malformed request input | no |

use thiserror::Error;

use super::{PaymentOperation, PaymentSessionStatus};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors produced by the payment gateway adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("Payment gateway is not configured: {0}")]
    Configuration(String),

    #[error("Payment gateway unreachable during {operation}: {message}")]
    Transport {
        operation: PaymentOperation,
        message: String,
    },

    #[error("Payment gateway returned HTTP {status} during {operation}")]
    HttpStatus {
        operation: PaymentOperation,
        status: u16,
        body: String,
    },

    #[error("Payment gateway rejected {operation} with status '{remote_status}'")]
    RemoteStatus {
        operation: PaymentOperation,
        remote_status: String,
    },

    #[error("Unexpected payment gateway response to {operation}: {reason}")]
    UnexpectedResponse {
        operation: PaymentOperation,
        reason: String,
    },

    #[error("Cannot {operation} a payment session in status '{current}'")]
    InvalidTransition {
        operation: PaymentOperation,
        current: PaymentSessionStatus,
    },

    #[error("Refund of {requested} exceeds captured amount {captured}")]
    RefundExceedsCaptured { requested: i64, captured: i64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl PaymentError {
    pub fn configuration(message: impl Into<String>) -> Self {
        PaymentError::Configuration(message.into())
    }

    pub fn transport(operation: PaymentOperation, message: impl Into<String>) -> Self {
        PaymentError::Transport {
            operation,
            message: message.into(),
        }
    }

    pub fn remote_status(operation: PaymentOperation, remote_status: impl Into<String>) -> Self {
        PaymentError::RemoteStatus {
            operation,
            remote_status: remote_status.into(),
        }
    }

    pub fn unexpected(operation: PaymentOperation, reason: impl Into<String>) -> Self {
        PaymentError::UnexpectedResponse {
            operation,
            reason: reason.into(),
        }
    }

    pub fn invalid_transition(operation: PaymentOperation, current: PaymentSessionStatus) -> Self {
        PaymentError::InvalidTransition { operation, current }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::Configuration(_) => ErrorCode::ConfigurationError,
            PaymentError::Transport { .. } | PaymentError::HttpStatus { .. } => {
                ErrorCode::GatewayUnavailable
            }
            PaymentError::RemoteStatus { .. } => ErrorCode::GatewayRejected,
            PaymentError::UnexpectedResponse { .. } => ErrorCode::UnexpectedResponse,
            PaymentError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            PaymentError::RefundExceedsCaptured { .. } => ErrorCode::InvalidRefundAmount,
            PaymentError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }

    /// Whether the caller may reasonably retry the same operation.
    pub fn is_retryable(&self) -> bool {
        match self {
            PaymentError::Transport { .. } => true,
            PaymentError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Whether the error was detected locally, before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            PaymentError::Configuration(_)
                | PaymentError::InvalidTransition { .. }
                | PaymentError::RefundExceedsCaptured { .. }
                | PaymentError::Validation(_)
        )
    }
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
