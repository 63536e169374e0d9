//! Payment domain module.
//!
//! Models a payment session against the `4g12hs` gateway: the money type,
//! the lifecycle state machine, the request signer and the error taxonomy.
//!
//! # Module Structure
//!
//! - `amount` - Minor-unit amounts and their wire formats
//! - `errors` - PaymentError taxonomy
//! - `operation` - Named gateway operations
//! - `session` - PaymentSession aggregate
//! - `signer` - HMAC-SHA256 request signing
//! - `status` - PaymentSessionStatus state machine

mod amount;
mod errors;
mod operation;
mod session;
mod signer;
mod status;

pub use amount::MinorUnits;
pub use errors::PaymentError;
pub use operation::PaymentOperation;
pub use session::{PaymentSession, TransactionId};
pub use signer::{EmptyValues, RequestSigner, SignatureParams, SignedRequest, SIGNATURE_FIELD};
pub use status::PaymentSessionStatus;

/// Provider identifier the host registers this adapter under.
pub const PROVIDER_ID: &str = "4g12hs";
