//! reqwest-backed gateway transport.
//!
//! Maps each operation onto the gateway's HTTP surface:
//!
//! | Operation | Method | Path | Body |
//! |-----------|--------|------|------|
//! | create | POST | `/api/payment/create` | JSON |
//! | start | POST | `/api/payment/start` | form |
//! | retrieve | GET | `/api/payment/{id}` | none |
//! | status | POST | `/api/payment/status` | JSON |
//! | authorize | POST | `/api/payment/operate` | JSON |
//! | capture | POST | `/api/payment/capture` | JSON |
//! | refund | POST | `/api/payment/refund` | JSON |
//! | cancel | POST | `/api/payment/cancel` | JSON |
//! | update | PATCH | `/api/payment/update` | JSON |

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;
use serde_json::Value as JsonValue;

use crate::domain::foundation::ValidationError;
use crate::domain::payment::{PaymentError, PaymentOperation};
use crate::ports::{GatewayCall, GatewayReply, GatewayTransport};

/// Unreserved characters of a URL path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyEncoding {
    Json,
    Form,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Route {
    method: Method,
    path: String,
    encoding: BodyEncoding,
}

impl Route {
    fn post_json(path: &str) -> Self {
        Self {
            method: Method::POST,
            path: path.to_string(),
            encoding: BodyEncoding::Json,
        }
    }
}

fn route(call: &GatewayCall) -> Result<Route, PaymentError> {
    let route = match call.operation {
        PaymentOperation::Create => Route::post_json("/api/payment/create"),
        PaymentOperation::Start => Route {
            method: Method::POST,
            path: "/api/payment/start".to_string(),
            encoding: BodyEncoding::Form,
        },
        PaymentOperation::Retrieve => {
            let id = call
                .transaction_id
                .as_ref()
                .ok_or_else(|| ValidationError::empty_field("transaction_id"))?;
            Route {
                method: Method::GET,
                path: format!(
                    "/api/payment/{}",
                    utf8_percent_encode(id.as_str(), PATH_SEGMENT)
                ),
                encoding: BodyEncoding::Empty,
            }
        }
        PaymentOperation::Status => Route::post_json("/api/payment/status"),
        PaymentOperation::Authorize => Route::post_json("/api/payment/operate"),
        PaymentOperation::Capture => Route::post_json("/api/payment/capture"),
        PaymentOperation::Refund => Route::post_json("/api/payment/refund"),
        PaymentOperation::Cancel => Route::post_json("/api/payment/cancel"),
        PaymentOperation::Update => Route {
            method: Method::PATCH,
            path: "/api/payment/update".to_string(),
            encoding: BodyEncoding::Json,
        },
    };
    Ok(route)
}

/// Gateway transport over HTTPS.
///
/// Holds one `reqwest::Client`, so all calls share its connection pool.
#[derive(Debug, Clone)]
pub struct HttpGatewayTransport {
    http_client: reqwest::Client,
    api_base_url: String,
}

impl HttpGatewayTransport {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base_url)
    }

    pub fn with_client(http_client: reqwest::Client, api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            api_base_url,
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

#[async_trait]
impl GatewayTransport for HttpGatewayTransport {
    async fn send(&self, call: GatewayCall) -> Result<GatewayReply, PaymentError> {
        let operation = call.operation;
        let route = route(&call)?;
        let url = format!("{}{}", self.api_base_url, route.path);

        let mut builder = self.http_client.request(route.method, &url);
        if let Some(request) = &call.request {
            builder = match route.encoding {
                BodyEncoding::Json => builder.json(&JsonValue::Object(request.to_json())),
                BodyEncoding::Form => builder.form(&request.fields()),
                BodyEncoding::Empty => builder,
            };
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(
                operation = %operation,
                error = %e,
                timeout = e.is_timeout(),
                "Payment gateway request failed"
            );
            PaymentError::transport(operation, e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::transport(operation, e.to_string()))?;

        if !status.is_success() {
            tracing::error!(
                operation = %operation,
                http_status = status.as_u16(),
                "Payment gateway returned non-success status"
            );
            return Err(PaymentError::HttpStatus {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(operation = %operation, http_status = status.as_u16(), "Payment gateway replied");
        Ok(GatewayReply::from_body(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::TransactionId;

    fn call(operation: PaymentOperation) -> GatewayCall {
        GatewayCall {
            operation,
            transaction_id: None,
            request: None,
        }
    }

    #[test]
    fn authorize_goes_through_operate() {
        let route = route(&call(PaymentOperation::Authorize)).unwrap();
        assert_eq!(route.method, Method::POST);
        assert_eq!(route.path, "/api/payment/operate");
        assert_eq!(route.encoding, BodyEncoding::Json);
    }

    #[test]
    fn start_is_form_encoded() {
        let route = route(&call(PaymentOperation::Start)).unwrap();
        assert_eq!(route.path, "/api/payment/start");
        assert_eq!(route.encoding, BodyEncoding::Form);
    }

    #[test]
    fn update_uses_patch() {
        let route = route(&call(PaymentOperation::Update)).unwrap();
        assert_eq!(route.method, Method::PATCH);
        assert_eq!(route.path, "/api/payment/update");
    }

    #[test]
    fn retrieve_puts_id_in_path() {
        let call = GatewayCall::for_transaction(
            PaymentOperation::Retrieve,
            TransactionId::new("abc123").unwrap(),
        );
        let route = route(&call).unwrap();
        assert_eq!(route.method, Method::GET);
        assert_eq!(route.path, "/api/payment/abc123");
        assert_eq!(route.encoding, BodyEncoding::Empty);
    }

    #[test]
    fn retrieve_escapes_id_as_one_path_segment() {
        let call = GatewayCall::for_transaction(
            PaymentOperation::Retrieve,
            TransactionId::new("ab/c?d#e f").unwrap(),
        );
        let route = route(&call).unwrap();
        assert_eq!(route.path, "/api/payment/ab%2Fc%3Fd%23e%20f");
    }

    #[test]
    fn retrieve_without_id_is_rejected() {
        let result = route(&call(PaymentOperation::Retrieve));
        assert!(matches!(result, Err(PaymentError::Validation(_))));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let transport = HttpGatewayTransport::new("https://fin.example.com/");
        assert_eq!(transport.api_base_url(), "https://fin.example.com");
    }

    #[tokio::test]
    async fn unreachable_gateway_is_transport_error() {
        // Port 9 on localhost refuses connections.
        let transport = HttpGatewayTransport::new("http://127.0.0.1:9");
        let err = transport
            .send(call(PaymentOperation::Status))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PaymentError::Transport {
                operation: PaymentOperation::Status,
                ..
            }
        ));
        assert!(err.is_retryable());
    }
}
