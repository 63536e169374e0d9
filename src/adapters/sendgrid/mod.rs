//! SendGrid email adapter.
//!
//! Implements the `EmailSender` port with SendGrid dynamic templates.
//!
//! # Configuration
//!
//! - `STOREFRONT__EMAIL__SENDGRID_API_KEY`: API key (`SG.` prefix)
//! - `STOREFRONT__EMAIL__API_BASE_URL`: override for the API host

mod recording_sender;
mod sendgrid_sender;

pub use recording_sender::RecordingEmailSender;
pub use sendgrid_sender::SendGridEmailSender;
