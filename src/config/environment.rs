//! Deployment environment and env-file selection

use serde::Deserialize;

/// Name of the variable that selects the deployment environment.
pub const ENVIRONMENT_VAR: &str = "STOREFRONT_ENV";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
    Test,
}

impl Environment {
    /// Parse an environment name. Unknown or missing names mean development.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("production") => Environment::Production,
            Some("staging") => Environment::Staging,
            Some("test") => Environment::Test,
            _ => Environment::Development,
        }
    }

    /// Read the environment from `STOREFRONT_ENV`.
    pub fn current() -> Self {
        Self::from_name(std::env::var(ENVIRONMENT_VAR).ok().as_deref())
    }

    /// Env file loaded for this environment.
    pub fn env_file(&self) -> &'static str {
        match self {
            Environment::Production => ".env.production",
            Environment::Staging => ".env.staging",
            Environment::Test => ".env.test",
            Environment::Development => ".env",
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_file_per_environment() {
        assert_eq!(Environment::from_name(Some("production")).env_file(), ".env.production");
        assert_eq!(Environment::from_name(Some("staging")).env_file(), ".env.staging");
        assert_eq!(Environment::from_name(Some("test")).env_file(), ".env.test");
    }

    #[test]
    fn test_unknown_name_falls_back_to_development() {
        assert_eq!(Environment::from_name(Some("qa")), Environment::Development);
        assert_eq!(Environment::from_name(None).env_file(), ".env");
    }

    #[test]
    fn test_name_is_case_insensitive() {
        assert!(Environment::from_name(Some(" Production ")).is_production());
    }
}
