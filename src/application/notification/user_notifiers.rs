//! Account email handlers: password reset and admin invite.
//!
//! Both events carry `{email, first_name, last_name}` and map onto one
//! template each, with the names as template variables.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::domain::notification::{EmailTemplates, TemplatedEmail, UserNotification};
use crate::ports::{EmailSender, EventHandler};

async fn notify_user(
    email_sender: &dyn EmailSender,
    template_id: &str,
    from: &str,
    event: &EventEnvelope,
    handler: &'static str,
) -> Result<(), DomainError> {
    let payload: UserNotification = event.payload_as()?;
    let email = TemplatedEmail::new(
        template_id,
        from,
        payload.email.as_str(),
        json!({
            "first_name": payload.first_name,
            "last_name": payload.last_name,
        }),
    )?;

    if let Err(e) = email_sender.send(email).await {
        tracing::warn!(
            handler,
            event_type = %event.event_type,
            event_id = %event.event_id,
            error = %e,
            "Notification email failed"
        );
    }
    Ok(())
}

/// Handles `customer.password_reset` events.
pub struct PasswordResetNotifier {
    email_sender: Arc<dyn EmailSender>,
    templates: EmailTemplates,
}

impl PasswordResetNotifier {
    pub fn new(email_sender: Arc<dyn EmailSender>, templates: EmailTemplates) -> Self {
        Self {
            email_sender,
            templates,
        }
    }
}

#[async_trait]
impl EventHandler for PasswordResetNotifier {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        notify_user(
            self.email_sender.as_ref(),
            &self.templates.password_reset,
            &self.templates.from,
            &event,
            self.name(),
        )
        .await
    }

    fn name(&self) -> &'static str {
        "PasswordResetNotifier"
    }
}

/// Handles `invite.created` events with the admin confirmation template.
pub struct AdminInviteNotifier {
    email_sender: Arc<dyn EmailSender>,
    templates: EmailTemplates,
}

impl AdminInviteNotifier {
    pub fn new(email_sender: Arc<dyn EmailSender>, templates: EmailTemplates) -> Self {
        Self {
            email_sender,
            templates,
        }
    }
}

#[async_trait]
impl EventHandler for AdminInviteNotifier {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        notify_user(
            self.email_sender.as_ref(),
            &self.templates.admin_invite,
            &self.templates.from,
            &event,
            self.name(),
        )
        .await
    }

    fn name(&self) -> &'static str {
        "AdminInviteNotifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RecordingEmailSender;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::notification::{CUSTOMER_PASSWORD_RESET, INVITE_CREATED};
    use crate::ports::EmailError;

    fn templates() -> EmailTemplates {
        EmailTemplates {
            from: "support@example.com".to_string(),
            order_placed: "d-order".to_string(),
            password_reset: "password-reset".to_string(),
            admin_invite: "admin_confirmation".to_string(),
        }
    }

    fn user_event(event_type: &str) -> EventEnvelope {
        EventEnvelope::new(
            event_type,
            json!({"email": "ada@example.com", "first_name": "Ada", "last_name": "Lovelace"}),
        )
    }

    #[tokio::test]
    async fn password_reset_uses_reset_template() {
        let sender = RecordingEmailSender::new();
        let handler = PasswordResetNotifier::new(Arc::new(sender.clone()), templates());

        handler.handle(user_event(CUSTOMER_PASSWORD_RESET)).await.unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].template_id, "password-reset");
        assert_eq!(sent[0].to, "ada@example.com");
        assert_eq!(sent[0].dynamic_template_data["first_name"], "Ada");
        assert_eq!(sent[0].dynamic_template_data["last_name"], "Lovelace");
    }

    #[tokio::test]
    async fn admin_invite_uses_confirmation_template() {
        let sender = RecordingEmailSender::new();
        let handler = AdminInviteNotifier::new(Arc::new(sender.clone()), templates());

        handler.handle(user_event(INVITE_CREATED)).await.unwrap();

        assert_eq!(sender.sent()[0].template_id, "admin_confirmation");
        assert_eq!(sender.sent()[0].from, "support@example.com");
    }

    #[tokio::test]
    async fn delivery_failure_does_not_fail_handler() {
        let sender = RecordingEmailSender::failing(EmailError::Rejected {
            status: 400,
            body: "bad template".to_string(),
        });
        let handler = PasswordResetNotifier::new(Arc::new(sender.clone()), templates());

        assert!(handler.handle(user_event(CUSTOMER_PASSWORD_RESET)).await.is_ok());
        assert_eq!(sender.sent_count(), 1);
    }

    #[tokio::test]
    async fn missing_email_is_validation_error() {
        let sender = RecordingEmailSender::new();
        let handler = AdminInviteNotifier::new(Arc::new(sender.clone()), templates());

        let err = handler
            .handle(EventEnvelope::new(INVITE_CREATED, json!({"first_name": "Ada"})))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(sender.sent_count(), 0);
    }
}
