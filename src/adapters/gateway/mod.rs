//! Payment gateway transport adapters.
//!
//! Implements the `GatewayTransport` port for the `4g12hs` payment API.
//!
//! # Security
//!
//! - Requests are signed before they reach the transport; no secret is held here
//! - Request bodies are never logged
//!
//! # Configuration
//!
//! The API base URL comes from `STOREFRONT__GATEWAY__API_BASE_URL`.

mod http_transport;
mod mock_transport;

pub use http_transport::HttpGatewayTransport;
pub use mock_transport::MockGatewayTransport;
