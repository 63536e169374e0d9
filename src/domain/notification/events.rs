//! Host events the notification handlers react to, and their payloads.

use serde::{Deserialize, Serialize};

pub const ORDER_PLACED: &str = "order.placed";
pub const CUSTOMER_PASSWORD_RESET: &str = "customer.password_reset";
pub const INVITE_CREATED: &str = "invite.created";

/// Payload of `order.placed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub id: String,
}

/// Payload of `customer.password_reset` and `invite.created`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNotification {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}
