//! Event envelope received from the host event bus.
//!
//! The host publishes events such as `order.placed` with a small JSON payload.
//! Handlers receive them wrapped in an `EventEnvelope` and decode the payload
//! into a typed struct with [`EventEnvelope::payload_as`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::{DomainError, Timestamp};

/// Unique identifier for events (used for deduplication and log correlation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new random EventId using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates an EventId from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transport envelope for host events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique ID for this event instance.
    pub event_id: EventId,

    /// Event name used for routing (e.g., "order.placed").
    pub event_type: String,

    /// When the event occurred.
    pub occurred_at: Timestamp,

    /// Event-specific payload as JSON.
    pub payload: JsonValue,
}

impl EventEnvelope {
    /// Creates a new envelope stamped with a fresh id and the current time.
    pub fn new(event_type: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            event_id: EventId::new(),
            event_type: event_type.into(),
            occurred_at: Timestamp::now(),
            payload,
        }
    }

    /// Decodes the payload into a typed struct.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the event type when the payload
    /// does not match the expected shape.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        serde_json::from_value(self.payload.clone()).map_err(|e| {
            DomainError::validation(
                "payload",
                format!("Malformed '{}' payload: {}", self.event_type, e),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct OrderRef {
        id: String,
    }

    #[test]
    fn payload_as_decodes_matching_payload() {
        let envelope = EventEnvelope::new("order.placed", json!({"id": "order_01"}));
        let payload: OrderRef = envelope.payload_as().unwrap();
        assert_eq!(payload.id, "order_01");
    }

    #[test]
    fn payload_as_reports_event_type_on_mismatch() {
        let envelope = EventEnvelope::new("order.placed", json!({"order": 42}));
        let err = envelope.payload_as::<OrderRef>().unwrap_err();
        assert!(err.message().contains("order.placed"));
    }

    #[test]
    fn event_ids_are_unique() {
        assert_ne!(EventId::new(), EventId::new());
    }
}
