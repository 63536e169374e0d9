//! Storefront Payments - gateway adapter and transactional email for a hosted storefront
//!
//! This crate implements the `4g12hs` payment processor (signed requests and
//! the payment session lifecycle) and the email subscribers that react to
//! order, password-reset and invite events.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
