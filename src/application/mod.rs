//! Application layer - Services and event handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod notification;
pub mod payment;

pub use notification::{
    register_notification_handlers, AdminInviteNotifier, NotificationPorts, OrderPlacedNotifier,
    PasswordResetNotifier,
};
pub use payment::{CreateSessionRequest, PaymentSessionService};
