//! Email configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::gateway::is_http_url;
use crate::domain::notification::{validate_address, EmailTemplates};

/// Email configuration (SendGrid)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SendGrid API key
    pub sendgrid_api_key: Option<SecretString>,

    /// SendGrid API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// Template for the order confirmation with download links
    #[serde(default = "default_order_placed_template")]
    pub order_placed_template: String,

    /// Template for password reset
    #[serde(default = "default_password_reset_template")]
    pub password_reset_template: String,

    /// Template for the admin invite confirmation
    #[serde(default = "default_admin_invite_template")]
    pub admin_invite_template: String,
}

impl EmailConfig {
    /// Template ids and sender for the notification handlers
    pub fn templates(&self) -> EmailTemplates {
        EmailTemplates {
            from: self.from_email.clone(),
            order_placed: self.order_placed_template.clone(),
            password_reset: self.password_reset_template.clone(),
            admin_invite: self.admin_invite_template.clone(),
        }
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let api_key = self
            .sendgrid_api_key
            .as_ref()
            .ok_or(ValidationError::MissingRequired("EMAIL__SENDGRID_API_KEY"))?;
        if !api_key.expose_secret().starts_with("SG.") {
            return Err(ValidationError::InvalidSendGridKey);
        }
        if !is_http_url(&self.api_base_url) {
            return Err(ValidationError::InvalidUrl("EMAIL__API_BASE_URL"));
        }
        if validate_address("from_email", &self.from_email).is_err() {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sendgrid_api_key: None,
            api_base_url: default_api_base_url(),
            from_email: default_from_email(),
            order_placed_template: default_order_placed_template(),
            password_reset_template: default_password_reset_template(),
            admin_invite_template: default_admin_invite_template(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.sendgrid.com".to_string()
}

fn default_from_email() -> String {
    "support@printinc.shop".to_string()
}

fn default_order_placed_template() -> String {
    "d-b9dc86c0472543d687c9000d95e8a09c".to_string()
}

fn default_password_reset_template() -> String {
    "password-reset".to_string()
}

fn default_admin_invite_template() -> String {
    "admin_confirmation".to_string()
}
