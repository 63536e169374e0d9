//! EventSubscriber port - registration with the host event bus.
//!
//! The host platform owns the bus. Handlers register interest in event names
//! without knowing how events are delivered.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing host events.
///
/// Implementations should be:
/// - **Quick** - one handler invocation per event, no internal queueing
/// - **Isolated** - an error is reported to the bus and affects no other handler
///
/// # Example
///
/// ```ignore
/// #[async_trait]
/// impl EventHandler for PasswordResetNotifier {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let payload: UserNotification = event.payload_as()?;
///         // Send the reset email...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "PasswordResetNotifier"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to host events.
///
/// # Example
///
/// ```ignore
/// subscriber.subscribe("order.placed", order_placed_notifier);
/// ```
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to multiple event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        for event_type in event_types {
            self.subscribe(event_type, handler.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Compile-time check that traits are object-safe
    #[allow(dead_code)]
    fn assert_handler_object_safe(_: &dyn EventHandler) {}

    #[allow(dead_code)]
    fn assert_subscriber_object_safe(_: &dyn EventSubscriber) {}

    struct NoopHandler;

    #[async_trait]
    impl EventHandler for NoopHandler {
        async fn handle(&self, _event: EventEnvelope) -> Result<(), DomainError> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "NoopHandler"
        }
    }

    #[derive(Default)]
    struct NameRecorder {
        names: Mutex<Vec<String>>,
    }

    impl EventSubscriber for NameRecorder {
        fn subscribe(&self, event_type: &str, _handler: Arc<dyn EventHandler>) {
            self.names.lock().unwrap().push(event_type.to_string());
        }
    }

    #[test]
    fn subscribe_all_subscribes_each_event_type() {
        let recorder = NameRecorder::default();
        recorder.subscribe_all(&["a.created", "b.created"], Arc::new(NoopHandler));
        assert_eq!(*recorder.names.lock().unwrap(), vec!["a.created", "b.created"]);
    }
}
