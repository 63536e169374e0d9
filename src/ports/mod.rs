//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Payment Ports
//!
//! - `GatewayTransport` - Delivers signed calls to the payment gateway
//!
//! ## Notification Ports
//!
//! - `EmailSender` - Templated email delivery
//! - `OrderReader` / `ProductMediaReader` - Host order and media queries
//! - `FileUrlSigner` - Presigned download URLs
//!
//! ## Event Ports
//!
//! - `EventSubscriber` - Registration with the host event bus
//! - `EventHandler` - Handler that processes incoming events

mod email_sender;
mod event_subscriber;
mod file_url_signer;
mod gateway_transport;
mod order_reader;

pub use email_sender::{EmailError, EmailSender};
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use file_url_signer::FileUrlSigner;
pub use gateway_transport::{GatewayCall, GatewayReply, GatewayTransport};
pub use order_reader::{OrderReader, ProductMediaReader};
