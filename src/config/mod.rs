//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `STOREFRONT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use storefront_payments::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Gateway at {}", config.gateway.api_base_url);
//! ```

mod email;
mod environment;
mod error;
mod gateway;
mod telemetry;

pub use email::EmailConfig;
pub use environment::{Environment, ENVIRONMENT_VAR};
pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;
use std::path::Path;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads the env file for the current
/// environment and then the process environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Deployment environment, taken from `STOREFRONT_ENV`
    #[serde(skip)]
    pub environment: Environment,

    /// Payment gateway configuration (4g12hs)
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Email configuration (SendGrid)
    #[serde(default)]
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// This function:
    /// 1. Picks the environment from `STOREFRONT_ENV`
    /// 2. Loads the matching env file if present (`.env.production`,
    ///    `.env.staging`, `.env.test`, otherwise `.env`)
    /// 3. Reads environment variables with `STOREFRONT` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `STOREFRONT__GATEWAY__ACCOUNT_ID=...` -> `gateway.account_id = ...`
    /// - `STOREFRONT__EMAIL__FROM_EMAIL=...` -> `email.from_email = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::current();
        Self::load_from(environment, Path::new(environment.env_file()))
    }

    /// Load configuration using an explicit env file.
    ///
    /// Variables already set in the process win over the file.
    pub fn load_from(environment: Environment, env_file: &Path) -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::from_path(env_file) {
            tracing::debug!(path = %env_file.display(), error = %e, "No env file loaded");
        }

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STOREFRONT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.environment = environment;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.gateway.validate(self.environment)?;
        self.email.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
