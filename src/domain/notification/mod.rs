//! Notification domain module.
//!
//! Order read models, host event payloads and templated email messages used
//! by the transactional email handlers.

mod email;
mod events;
mod order;

pub use email::{validate_address, EmailTemplates, TemplatedEmail};
pub use events::{
    OrderPlaced, UserNotification, CUSTOMER_PASSWORD_RESET, INVITE_CREATED, ORDER_PLACED,
};
pub use order::{Customer, LineItem, Order, ProductMedia};
