//! Gateway transport port - sends one signed call to the payment gateway.
//!
//! The session service builds and signs every request; the transport only
//! knows how each operation maps onto HTTP and how to read the reply back.
//! Keeping the wire behind a port lets tests count calls and script replies.
//!
//! # Reply handling
//!
//! Transports must map failures onto the shared taxonomy:
//!
//! - network failure -> `PaymentError::Transport`
//! - non-2xx response -> `PaymentError::HttpStatus`
//!
//! A 2xx body is returned as JSON when it parses as an object, otherwise as
//! raw text. Interpreting the gateway's `status` field is left to the caller.

use async_trait::async_trait;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::domain::payment::{PaymentError, PaymentOperation, SignedRequest, TransactionId};

/// One outbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayCall {
    pub operation: PaymentOperation,
    /// Set for calls that address an existing session in the path.
    pub transaction_id: Option<TransactionId>,
    /// Signed body. `None` for path-only calls such as retrieve.
    pub request: Option<SignedRequest>,
}

impl GatewayCall {
    pub fn signed(operation: PaymentOperation, request: SignedRequest) -> Self {
        Self {
            operation,
            transaction_id: None,
            request: Some(request),
        }
    }

    pub fn for_transaction(operation: PaymentOperation, transaction_id: TransactionId) -> Self {
        Self {
            operation,
            transaction_id: Some(transaction_id),
            request: None,
        }
    }

    /// Value of a body field, signed or unsigned.
    pub fn field(&self, name: &str) -> Option<String> {
        self.request.as_ref().and_then(|request| {
            request
                .fields()
                .into_iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value)
        })
    }
}

/// Successful (2xx) reply body.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayReply {
    Json(JsonMap<String, JsonValue>),
    Text(String),
}

impl GatewayReply {
    /// Parses a raw body, preferring a JSON object.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<JsonValue>(body) {
            Ok(JsonValue::Object(map)) => GatewayReply::Json(map),
            _ => GatewayReply::Text(body.trim().to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&JsonMap<String, JsonValue>> {
        match self {
            GatewayReply::Json(map) => Some(map),
            GatewayReply::Text(_) => None,
        }
    }
}

/// Port for delivering signed calls to the payment gateway.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// Send one call and return the 2xx body.
    async fn send(&self, call: GatewayCall) -> Result<GatewayReply, PaymentError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_body_prefers_json_objects() {
        let reply = GatewayReply::from_body(r#"{"status":"OK","paymentSessionId":"abc"}"#);
        assert_eq!(reply.as_json().and_then(|m| m.get("status")), Some(&json!("OK")));
    }

    #[test]
    fn from_body_keeps_plain_text() {
        assert_eq!(
            GatewayReply::from_body("  tx_998877\n"),
            GatewayReply::Text("tx_998877".to_string())
        );
        // A bare JSON string is not an object either.
        assert!(matches!(GatewayReply::from_body("\"abc\""), GatewayReply::Text(_)));
    }

    #[allow(dead_code)]
    fn assert_transport_object_safe(_: &dyn GatewayTransport) {}
}
