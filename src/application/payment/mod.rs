//! Payment application services.

mod session_service;

pub use session_service::{CreateSessionRequest, PaymentSessionService, SETTLEMENT_CURRENCY};
