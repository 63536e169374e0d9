//! Named gateway operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One kind of call the adapter makes against the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOperation {
    Create,
    /// Legacy form-encoded session creation.
    Start,
    Retrieve,
    Status,
    Authorize,
    Capture,
    Refund,
    Cancel,
    Update,
}

impl PaymentOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Start => "start",
            Self::Retrieve => "retrieve",
            Self::Status => "status",
            Self::Authorize => "authorize",
            Self::Capture => "capture",
            Self::Refund => "refund",
            Self::Cancel => "cancel",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for PaymentOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
