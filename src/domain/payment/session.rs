//! Payment session aggregate.
//!
//! A session is one attempt to collect payment for one cart. Its fields are
//! private: the gateway adapter is the only writer, and every change produces
//! a new value so the caller's copy stays the last-known-good state when an
//! operation fails.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;

use super::{MinorUnits, PaymentError, PaymentOperation, PaymentSessionStatus};
use crate::domain::foundation::{StateMachine, Timestamp, ValidationError};

/// Opaque transaction id assigned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("transaction_id"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One payment attempt tracked through its gateway lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSession {
    id: TransactionId,
    resource_id: Option<String>,
    number: String,
    amount: MinorUnits,
    currency_code: String,
    status: PaymentSessionStatus,
    captured: bool,
    amount_captured: i64,
    amount_refunded: i64,
    data: JsonMap<String, JsonValue>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl PaymentSession {
    /// Opens a new `pending` session from a successful create response.
    pub(crate) fn open(
        id: TransactionId,
        resource_id: Option<String>,
        number: String,
        amount: MinorUnits,
        currency_code: String,
        data: JsonMap<String, JsonValue>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            resource_id,
            number,
            amount,
            currency_code,
            status: PaymentSessionStatus::Pending,
            captured: false,
            amount_captured: 0,
            amount_refunded: 0,
            data,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    /// Cart or order this session pays for.
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// Random transaction number sent when the session was created.
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn amount(&self) -> MinorUnits {
        self.amount
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn status(&self) -> PaymentSessionStatus {
        self.status
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn amount_captured(&self) -> i64 {
        self.amount_captured
    }

    pub fn amount_refunded(&self) -> i64 {
        self.amount_refunded
    }

    /// Provider payload accumulated from gateway responses.
    pub fn data(&self) -> &JsonMap<String, JsonValue> {
        &self.data
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Checks that `operation` may move this session to `target`.
    pub fn ensure_transition(
        &self,
        operation: PaymentOperation,
        target: PaymentSessionStatus,
    ) -> Result<(), PaymentError> {
        if self.status.can_transition_to(&target) {
            Ok(())
        } else {
            Err(PaymentError::invalid_transition(operation, self.status))
        }
    }

    /// Checks a refund request against the captured amount.
    pub fn ensure_refundable(&self, refund: MinorUnits) -> Result<(), PaymentError> {
        self.ensure_transition(PaymentOperation::Refund, PaymentSessionStatus::Refunded)?;
        if refund.value() > self.amount_captured {
            return Err(PaymentError::RefundExceedsCaptured {
                requested: refund.value(),
                captured: self.amount_captured,
            });
        }
        Ok(())
    }

    pub(crate) fn transition(
        mut self,
        operation: PaymentOperation,
        target: PaymentSessionStatus,
    ) -> Result<Self, PaymentError> {
        self.ensure_transition(operation, target)?;
        self.status = target;
        self.touch();
        Ok(self)
    }

    /// Adopts the status the gateway reports for this session.
    ///
    /// The gateway may be ahead of the local copy, so forward jumps such as
    /// `pending -> captured` are accepted. A status that could only be reached
    /// by moving backwards, or out of `canceled`, `refunded` or `error`, is
    /// rejected and the session is left as it was.
    pub(crate) fn reconcile_status(
        mut self,
        operation: PaymentOperation,
        remote: PaymentSessionStatus,
    ) -> Result<Self, PaymentError> {
        if remote == self.status {
            return Ok(self);
        }
        if !self.status.can_reach(remote) {
            tracing::warn!(
                transaction_id = %self.id,
                local_status = %self.status,
                remote_status = %remote,
                "Gateway status does not follow local lifecycle"
            );
            return Err(PaymentError::unexpected(
                operation,
                format!(
                    "gateway reports '{}' for a session in status '{}'",
                    remote, self.status
                ),
            ));
        }

        self.status = remote;
        if matches!(
            remote,
            PaymentSessionStatus::Captured | PaymentSessionStatus::Refunded
        ) && !self.captured
        {
            self.captured = true;
            self.amount_captured = self.amount.value();
        }
        if remote == PaymentSessionStatus::Refunded && self.amount_refunded == 0 {
            // The gateway reports no refund amount; assume the full capture.
            self.amount_refunded = self.amount_captured;
        }
        self.touch();
        Ok(self)
    }

    pub(crate) fn merge_data(mut self, payload: JsonMap<String, JsonValue>) -> Self {
        for (key, value) in payload {
            self.data.insert(key, value);
        }
        self.touch();
        self
    }

    pub(crate) fn capture(self) -> Result<Self, PaymentError> {
        let mut session = self.transition(PaymentOperation::Capture, PaymentSessionStatus::Captured)?;
        session.captured = true;
        session.amount_captured = session.amount.value();
        session
            .data
            .insert("captured".to_string(), JsonValue::Bool(true));
        Ok(session)
    }

    pub(crate) fn refund(self, refund: MinorUnits) -> Result<Self, PaymentError> {
        self.ensure_refundable(refund)?;
        let mut session = self.transition(PaymentOperation::Refund, PaymentSessionStatus::Refunded)?;
        session.amount_refunded = refund.value();
        Ok(session)
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
