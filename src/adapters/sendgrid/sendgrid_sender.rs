//! SendGrid v3 mail adapter.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value as JsonValue};

use crate::domain::notification::TemplatedEmail;
use crate::ports::{EmailError, EmailSender};

/// Sends dynamic-template email through `POST /v3/mail/send`.
#[derive(Debug, Clone)]
pub struct SendGridEmailSender {
    http_client: reqwest::Client,
    api_key: SecretString,
    api_base_url: String,
}

impl SendGridEmailSender {
    pub fn new(api_key: SecretString, api_base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn request_body(email: &TemplatedEmail) -> JsonValue {
        json!({
            "personalizations": [{
                "to": [{ "email": email.to }],
                "dynamic_template_data": email.dynamic_template_data,
            }],
            "from": { "email": email.from },
            "template_id": email.template_id,
        })
    }
}

#[async_trait]
impl EmailSender for SendGridEmailSender {
    async fn send(&self, email: TemplatedEmail) -> Result<(), EmailError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(EmailError::Configuration("SendGrid API key is not set".into()));
        }

        let url = format!("{}/v3/mail/send", self.api_base_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&Self::request_body(&email))
            .send()
            .await
            .map_err(|e| EmailError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                http_status = status,
                template_id = %email.template_id,
                "SendGrid rejected message"
            );
            return Err(EmailError::Rejected { status, body });
        }

        tracing::info!(template_id = %email.template_id, "Email accepted by SendGrid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> TemplatedEmail {
        TemplatedEmail::new(
            "d-123",
            "support@example.com",
            "ada@example.com",
            json!({"first_name": "Ada"}),
        )
        .unwrap()
    }

    #[test]
    fn request_body_uses_dynamic_template_layout() {
        let body = SendGridEmailSender::request_body(&email());
        assert_eq!(body["template_id"], "d-123");
        assert_eq!(body["from"]["email"], "support@example.com");
        assert_eq!(body["personalizations"][0]["to"][0]["email"], "ada@example.com");
        assert_eq!(
            body["personalizations"][0]["dynamic_template_data"]["first_name"],
            "Ada"
        );
    }

    #[tokio::test]
    async fn empty_api_key_is_configuration_error() {
        let sender = SendGridEmailSender::new(SecretString::new(String::new()), "http://127.0.0.1:9");
        let result = sender.send(email()).await;
        assert!(matches!(result, Err(EmailError::Configuration(_))));
    }
}
