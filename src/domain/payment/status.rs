//! Payment session status state machine.
//!
//! ```text
//! pending ──► authorized ──► captured ──► refunded
//!    │             │
//!    ├──► canceled ◄┤
//!    └──► error   ◄─┘
//! ```

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of one payment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSessionStatus {
    /// Created at the gateway, awaiting authorization.
    Pending,

    /// Funds reserved, awaiting capture.
    Authorized,

    /// Funds collected.
    Captured,

    /// Captured funds returned to the customer.
    Refunded,

    /// Abandoned before capture.
    Canceled,

    /// Gateway reported the session as failed.
    Error,
}

impl PaymentSessionStatus {
    /// Maps a `paymentStatus` value reported by the gateway.
    ///
    /// Returns `None` for values the gateway is not documented to send.
    pub fn from_remote(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" | "requires_more" => Some(Self::Pending),
            "authorized" => Some(Self::Authorized),
            "captured" => Some(Self::Captured),
            "refunded" => Some(Self::Refunded),
            "canceled" | "cancelled" => Some(Self::Canceled),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::Captured => "captured",
            Self::Refunded => "refunded",
            Self::Canceled => "canceled",
            Self::Error => "error",
        }
    }

    /// Whether `target` lies on some forward path from this status.
    ///
    /// The gateway may report a later status than the one last seen locally,
    /// skipping steps; it may never report an earlier one.
    pub fn can_reach(&self, target: Self) -> bool {
        let mut frontier = self.valid_transitions();
        let mut seen = Vec::new();
        while let Some(next) = frontier.pop() {
            if next == target {
                return true;
            }
            if !seen.contains(&next) {
                seen.push(next);
                frontier.extend(next.valid_transitions());
            }
        }
        false
    }
}

impl fmt::Display for PaymentSessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for PaymentSessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentSessionStatus::*;
        matches!(
            (self, target),
            (Pending, Authorized)
                | (Pending, Canceled)
                | (Pending, Error)
                | (Authorized, Captured)
                | (Authorized, Canceled)
                | (Authorized, Error)
                | (Captured, Refunded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentSessionStatus::*;
        match self {
            Pending => vec![Authorized, Canceled, Error],
            Authorized => vec![Captured, Canceled, Error],
            Captured => vec![Refunded],
            Refunded | Canceled | Error => vec![],
        }
    }
}
