//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, events, timestamps, state machine)
//! - `payment` - Payment session lifecycle, amounts and request signing
//! - `notification` - Order read models, event payloads and templated email

pub mod foundation;
pub mod notification;
pub mod payment;
