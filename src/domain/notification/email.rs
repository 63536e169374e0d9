//! Templated email messages.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::ValidationError;

/// A message rendered by the delivery service from a stored template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatedEmail {
    pub template_id: String,
    pub from: String,
    pub to: String,
    pub dynamic_template_data: JsonValue,
}

impl TemplatedEmail {
    pub fn new(
        template_id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        dynamic_template_data: JsonValue,
    ) -> Result<Self, ValidationError> {
        let template_id = template_id.into();
        let from = from.into();
        let to = to.into();

        if template_id.trim().is_empty() {
            return Err(ValidationError::empty_field("template_id"));
        }
        validate_address("from", &from)?;
        validate_address("to", &to)?;

        Ok(Self {
            template_id,
            from,
            to,
            dynamic_template_data,
        })
    }
}

/// Template ids and sender address used by the notification handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplates {
    pub from: String,
    pub order_placed: String,
    pub password_reset: String,
    pub admin_invite: String,
}

/// Minimal address check: one `@` with text on both sides and a dot in the domain.
pub fn validate_address(field: &str, address: &str) -> Result<(), ValidationError> {
    if address.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let valid = match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.contains('@')
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::invalid_format(field, "not an email address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_with_valid_addresses() {
        let email = TemplatedEmail::new(
            "password-reset",
            "support@example.com",
            "ada@example.com",
            json!({"first_name": "Ada"}),
        )
        .unwrap();
        assert_eq!(email.to, "ada@example.com");
    }

    #[test]
    fn rejects_missing_recipient() {
        let result = TemplatedEmail::new("t", "support@example.com", "", json!({}));
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(validate_address("to", "no-at-sign").is_err());
        assert!(validate_address("to", "@example.com").is_err());
        assert!(validate_address("to", "ada@localhost").is_err());
        assert!(validate_address("to", "ada@@example.com").is_err());
        assert!(validate_address("to", "ada@example.com").is_ok());
    }
}
