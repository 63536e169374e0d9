//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `gateway` - Payment gateway transport (HTTP, mock)
//! - `sendgrid` - Email delivery (SendGrid, recording)

pub mod gateway;
pub mod sendgrid;

pub use gateway::{HttpGatewayTransport, MockGatewayTransport};
pub use sendgrid::{RecordingEmailSender, SendGridEmailSender};
