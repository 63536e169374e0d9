//! Payment gateway configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::environment::Environment;
use super::error::ValidationError;

/// Payment gateway configuration (4g12hs)
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Merchant account id
    #[serde(default)]
    pub account_id: String,

    /// First signing secret
    pub secret_key_1: Option<SecretString>,

    /// Second signing secret
    pub secret_key_2: Option<SecretString>,

    /// URL the gateway sends the customer back to
    #[serde(default)]
    pub back_url: String,
}

impl GatewayConfig {
    /// Validate gateway configuration
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.account_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__ACCOUNT_ID"));
        }
        if self.secret_key_1.is_none() {
            return Err(ValidationError::MissingRequired("GATEWAY__SECRET_KEY_1"));
        }
        if self.secret_key_2.is_none() {
            return Err(ValidationError::MissingRequired("GATEWAY__SECRET_KEY_2"));
        }
        if self.back_url.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__BACK_URL"));
        }
        if !is_http_url(&self.api_base_url) {
            return Err(ValidationError::InvalidUrl("GATEWAY__API_BASE_URL"));
        }
        if !is_http_url(&self.back_url) {
            return Err(ValidationError::InvalidUrl("GATEWAY__BACK_URL"));
        }
        if environment.is_production() && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::GatewayMustBeHttps);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            account_id: String::new(),
            secret_key_1: None,
            secret_key_2: None,
            back_url: String::new(),
        }
    }
}

pub(crate) fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

fn default_api_base_url() -> String {
    "https://fin.4g12hs.com".to_string()
}
