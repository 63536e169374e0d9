//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary, timestamps, the event envelope and the
//! state machine trait used by the payment and notification domains.

mod errors;
mod events;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{EventEnvelope, EventId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
