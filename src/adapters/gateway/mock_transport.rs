//! Mock gateway transport for testing.
//!
//! Replays scripted replies in order and records every call, so tests can
//! assert on what was sent and on how many calls were made.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::payment::PaymentError;
use crate::ports::{GatewayCall, GatewayReply, GatewayTransport};

/// Mock transport for testing.
///
/// # Example
///
/// ```ignore
/// let transport = MockGatewayTransport::new();
/// transport.push_json(json!({"status": "OK", "paymentSessionId": "abc123"}));
///
/// let session = service.create(request).await?;
/// assert_eq!(transport.call_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockGatewayTransport {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<Result<GatewayReply, PaymentError>>,
    call_log: Vec<GatewayCall>,
}

impl MockGatewayTransport {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Scripting
    // ════════════════════════════════════════════════════════════════════════════

    /// Queue a JSON reply. Non-object values are queued as text.
    pub fn push_json(&self, body: JsonValue) {
        let reply = match body {
            JsonValue::Object(map) => GatewayReply::Json(map),
            other => GatewayReply::Text(other.to_string()),
        };
        self.push_reply(Ok(reply));
    }

    /// Queue a plain-text reply.
    pub fn push_text(&self, body: impl Into<String>) {
        self.push_reply(Ok(GatewayReply::Text(body.into())));
    }

    /// Queue an error.
    pub fn push_error(&self, error: PaymentError) {
        self.push_reply(Err(error));
    }

    fn push_reply(&self, reply: Result<GatewayReply, PaymentError>) {
        self.inner.lock().unwrap().replies.push_back(reply);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertions
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().call_log.len()
    }

    pub fn last_call(&self) -> Option<GatewayCall> {
        self.inner.lock().unwrap().call_log.last().cloned()
    }
}

#[async_trait]
impl GatewayTransport for MockGatewayTransport {
    async fn send(&self, call: GatewayCall) -> Result<GatewayReply, PaymentError> {
        let mut state = self.inner.lock().unwrap();
        let operation = call.operation;
        state.call_log.push(call);
        state.replies.pop_front().unwrap_or_else(|| {
            Err(PaymentError::transport(
                operation,
                "mock transport has no scripted reply",
            ))
        })
    }
}
