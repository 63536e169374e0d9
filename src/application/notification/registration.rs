//! Wiring of the notification handlers onto the host event bus.

use std::sync::Arc;

use crate::domain::notification::{
    EmailTemplates, CUSTOMER_PASSWORD_RESET, INVITE_CREATED, ORDER_PLACED,
};
use crate::ports::{EmailSender, EventSubscriber, FileUrlSigner, OrderReader, ProductMediaReader};

use super::{AdminInviteNotifier, OrderPlacedNotifier, PasswordResetNotifier};

/// Host collaborators the notification handlers depend on.
#[derive(Clone)]
pub struct NotificationPorts {
    pub order_reader: Arc<dyn OrderReader>,
    pub media_reader: Arc<dyn ProductMediaReader>,
    pub url_signer: Arc<dyn FileUrlSigner>,
    pub email_sender: Arc<dyn EmailSender>,
}

/// Subscribes all notification handlers.
///
/// | Event | Handler |
/// |-------|---------|
/// | `order.placed` | OrderPlacedNotifier |
/// | `customer.password_reset` | PasswordResetNotifier |
/// | `invite.created` | AdminInviteNotifier |
pub fn register_notification_handlers(
    subscriber: &dyn EventSubscriber,
    ports: NotificationPorts,
    templates: EmailTemplates,
) {
    subscriber.subscribe(
        ORDER_PLACED,
        Arc::new(OrderPlacedNotifier::new(
            ports.order_reader,
            ports.media_reader,
            ports.url_signer,
            ports.email_sender.clone(),
            templates.clone(),
        )),
    );
    subscriber.subscribe(
        CUSTOMER_PASSWORD_RESET,
        Arc::new(PasswordResetNotifier::new(
            ports.email_sender.clone(),
            templates.clone(),
        )),
    );
    subscriber.subscribe(
        INVITE_CREATED,
        Arc::new(AdminInviteNotifier::new(ports.email_sender, templates)),
    );

    tracing::debug!("Notification handlers registered");
}
