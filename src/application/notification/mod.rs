//! Transactional email handlers for host events.

mod order_placed;
mod registration;
mod user_notifiers;

pub use order_placed::OrderPlacedNotifier;
pub use registration::{register_notification_handlers, NotificationPorts};
pub use user_notifiers::{AdminInviteNotifier, PasswordResetNotifier};
