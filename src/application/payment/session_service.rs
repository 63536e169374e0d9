//! PaymentSessionService - drives a payment session through the gateway.
//!
//! Every operation follows the same shape:
//!
//! 1. Check local preconditions (no network call when they fail)
//! 2. Build the ordered parameter list and sign it
//! 3. Send through the `GatewayTransport` port
//! 4. Require the gateway's `status` to be `OK`
//! 5. Return a new session value; the input is never modified

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map as JsonMap, Value as JsonValue};
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::domain::foundation::ValidationError;
use crate::domain::payment::{
    EmptyValues, MinorUnits, PaymentError, PaymentOperation, PaymentSession,
    PaymentSessionStatus, RequestSigner, SignatureParams, SignedRequest, TransactionId,
};
use crate::ports::{GatewayCall, GatewayReply, GatewayTransport};

/// Fixed settlement currency of the gateway.
pub const SETTLEMENT_CURRENCY: &str = "MBC";

/// Transaction type for a sale.
const TRANSACTION_TYPE: &str = "1";

const REMOTE_OK: &str = "OK";
const REMOTE_WAIT: &str = "wait";

/// Every field the gateway lists is sent and signed, even when empty.
const SIGNING: EmptyValues = EmptyValues::Include;

/// Characters left unescaped by URI component encoding.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Checkout input for a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionRequest {
    /// Amount in minor units.
    pub amount: i64,
    pub currency_code: String,
    pub email: Option<String>,
    pub description: String,
    /// Cart or order the session pays for.
    pub resource_id: Option<String>,
}

/// Payment adapter for provider `4g12hs`.
///
/// Stateless: holds configuration and collaborators only, so one instance
/// can serve concurrent calls for different sessions.
pub struct PaymentSessionService {
    transport: Arc<dyn GatewayTransport>,
    signer: RequestSigner,
    account_id: String,
    back_url: String,
}

impl PaymentSessionService {
    pub fn new(
        transport: Arc<dyn GatewayTransport>,
        signer: RequestSigner,
        account_id: impl Into<String>,
        back_url: impl Into<String>,
    ) -> Result<Self, PaymentError> {
        let account_id = account_id.into();
        if account_id.trim().is_empty() {
            return Err(PaymentError::configuration("account_id is not set"));
        }
        Ok(Self {
            transport,
            signer,
            account_id,
            back_url: back_url.into(),
        })
    }

    /// Builds the service from gateway configuration, failing closed on missing secrets.
    pub fn from_config(
        config: &GatewayConfig,
        transport: Arc<dyn GatewayTransport>,
    ) -> Result<Self, PaymentError> {
        let signer =
            RequestSigner::from_config(config.secret_key_1.as_ref(), config.secret_key_2.as_ref())?;
        Self::new(transport, signer, config.account_id.clone(), config.back_url.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Session creation
    // ════════════════════════════════════════════════════════════════════════════

    /// Opens a session with `POST /api/payment/create`.
    pub async fn create(&self, request: CreateSessionRequest) -> Result<PaymentSession, PaymentError> {
        self.open_session(PaymentOperation::Create, request).await
    }

    /// Opens a session with the legacy form-encoded `POST /api/payment/start`.
    pub async fn start(&self, request: CreateSessionRequest) -> Result<PaymentSession, PaymentError> {
        self.open_session(PaymentOperation::Start, request).await
    }

    async fn open_session(
        &self,
        operation: PaymentOperation,
        request: CreateSessionRequest,
    ) -> Result<PaymentSession, PaymentError> {
        let amount = MinorUnits::new(request.amount)?;
        if request.currency_code.trim().is_empty() {
            return Err(ValidationError::empty_field("currency_code").into());
        }

        let number = generate_number();
        let params = SignatureParams::new()
            .with("amount", amount.to_fixed_decimal())
            .with("amountcurr", request.currency_code.as_str())
            .with("currency", SETTLEMENT_CURRENCY)
            .with("number", number.as_str())
            .with("description", encode_description(&request.description))
            .with("trtype", TRANSACTION_TYPE)
            .with("account", self.account_id.as_str())
            .with("backURL", self.back_url.as_str());

        let mut signed = self.signer.sign_request(params, SIGNING);
        if let Some(email) = &request.email {
            signed = signed.with_unsigned("email", email.as_str());
        }
        if operation == PaymentOperation::Start {
            signed = signed
                .with_unsigned("paytoken", "")
                .with_unsigned("cf1", "")
                .with_unsigned("cf2", "")
                .with_unsigned("cf3", "");
        }

        let reply = self.send(GatewayCall::signed(operation, signed), None).await?;
        let (id, data) = match reply {
            GatewayReply::Json(body) => {
                let body = require_status(operation, body, &[REMOTE_OK])?;
                (session_id(operation, &body)?, body)
            }
            GatewayReply::Text(text) if operation == PaymentOperation::Start => {
                let id = TransactionId::new(text.as_str())
                    .map_err(|_| PaymentError::unexpected(operation, "empty response body"))?;
                let mut data = JsonMap::new();
                data.insert("id".to_string(), JsonValue::String(text));
                (id, data)
            }
            GatewayReply::Text(_) => {
                return Err(PaymentError::unexpected(operation, "response is not a JSON object"))
            }
        };

        tracing::info!(
            operation = %operation,
            transaction_id = %id,
            amount = amount.value(),
            currency = %request.currency_code,
            "Payment session created"
        );

        Ok(PaymentSession::open(
            id,
            request.resource_id,
            number,
            amount,
            request.currency_code,
            data,
        ))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Queries
    // ════════════════════════════════════════════════════════════════════════════

    /// Fetches the gateway's view of the session with `GET /api/payment/{id}`.
    pub async fn retrieve(&self, session: &PaymentSession) -> Result<PaymentSession, PaymentError> {
        let operation = PaymentOperation::Retrieve;
        let call = GatewayCall::for_transaction(operation, session.id().clone());
        let body = self.send_expecting_json(call, session.id(), &[REMOTE_OK]).await?;

        let remote = match body.get("paymentStatus").and_then(JsonValue::as_str) {
            Some(value) => Some(map_remote_status(operation, value)?),
            None => None,
        };

        let mut updated = session.clone().merge_data(body);
        if let Some(remote) = remote {
            updated = updated.reconcile_status(operation, remote)?;
        }
        Ok(updated)
    }

    /// Refreshes the session status with `POST /api/payment/status`.
    ///
    /// Fails with `UnexpectedResponse` when the reported status would move the
    /// session backwards or out of a terminal status.
    pub async fn status(&self, session: &PaymentSession) -> Result<PaymentSession, PaymentError> {
        let remote = self.query_status(session.id()).await?;
        session
            .clone()
            .reconcile_status(PaymentOperation::Status, remote)
    }

    /// Asks the gateway for the status of a transaction.
    pub async fn query_status(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<PaymentSessionStatus, PaymentError> {
        let operation = PaymentOperation::Status;
        let signed = self.sign_transaction(transaction_id, SignatureParams::new());
        let body = self
            .send_expecting_json(GatewayCall::signed(operation, signed), transaction_id, &[REMOTE_OK])
            .await?;

        let value = body
            .get("paymentStatus")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| PaymentError::unexpected(operation, "missing paymentStatus"))?;
        map_remote_status(operation, value)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Lifecycle operations
    // ════════════════════════════════════════════════════════════════════════════

    /// Authorizes a pending session via `POST /api/payment/operate`.
    pub async fn authorize(&self, session: &PaymentSession) -> Result<PaymentSession, PaymentError> {
        let operation = PaymentOperation::Authorize;
        session.ensure_transition(operation, PaymentSessionStatus::Authorized)?;

        let signed = self.sign_transaction(
            session.id(),
            SignatureParams::new().with("opertype", "authorize"),
        );
        let body = self
            .send_expecting_json(GatewayCall::signed(operation, signed), session.id(), &[REMOTE_OK])
            .await?;

        session
            .clone()
            .merge_data(body)
            .transition(operation, PaymentSessionStatus::Authorized)
    }

    /// Captures an authorized session.
    pub async fn capture(&self, session: &PaymentSession) -> Result<PaymentSession, PaymentError> {
        let operation = PaymentOperation::Capture;
        session.ensure_transition(operation, PaymentSessionStatus::Captured)?;

        let signed = self.sign_transaction(session.id(), SignatureParams::new());
        let body = self
            .send_expecting_json(GatewayCall::signed(operation, signed), session.id(), &[REMOTE_OK])
            .await?;

        session.clone().merge_data(body).capture()
    }

    /// Refunds part or all of the captured amount.
    pub async fn refund(
        &self,
        session: &PaymentSession,
        amount: i64,
    ) -> Result<PaymentSession, PaymentError> {
        let operation = PaymentOperation::Refund;
        let amount = MinorUnits::new(amount)?;
        session.ensure_refundable(amount)?;

        let signed = self.sign_transaction(
            session.id(),
            SignatureParams::new().with("amount", amount.to_plain_decimal()),
        );
        let body = self
            .send_expecting_json(GatewayCall::signed(operation, signed), session.id(), &[REMOTE_OK])
            .await?;

        session.clone().merge_data(body).refund(amount)
    }

    /// Cancels a pending or authorized session.
    pub async fn cancel(&self, session: &PaymentSession) -> Result<PaymentSession, PaymentError> {
        let operation = PaymentOperation::Cancel;
        session.ensure_transition(operation, PaymentSessionStatus::Canceled)?;

        let signed = self.sign_transaction(session.id(), SignatureParams::new());
        let body = self
            .send_expecting_json(GatewayCall::signed(operation, signed), session.id(), &[REMOTE_OK])
            .await?;

        session
            .clone()
            .merge_data(body)
            .transition(operation, PaymentSessionStatus::Canceled)
    }

    /// Pushes session changes with `PATCH /api/payment/update`. Status is unchanged.
    pub async fn update(&self, session: &PaymentSession) -> Result<PaymentSession, PaymentError> {
        let operation = PaymentOperation::Update;
        let signed = self.sign_transaction(session.id(), SignatureParams::new());
        let body = self
            .send_expecting_json(
                GatewayCall::signed(operation, signed),
                session.id(),
                &[REMOTE_OK, REMOTE_WAIT],
            )
            .await?;

        Ok(session.clone().merge_data(body))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    /// Signs `transID`, `account`, then any operation-specific parameters.
    fn sign_transaction(&self, transaction_id: &TransactionId, extra: SignatureParams) -> SignedRequest {
        let mut params = SignatureParams::new()
            .with("transID", transaction_id.as_str())
            .with("account", self.account_id.as_str());
        for (name, value) in extra.iter() {
            params.push(name, value);
        }
        self.signer.sign_request(params, SIGNING)
    }

    async fn send(
        &self,
        call: GatewayCall,
        transaction_id: Option<&TransactionId>,
    ) -> Result<GatewayReply, PaymentError> {
        let operation = call.operation;
        self.transport.send(call).await.map_err(|e| {
            tracing::warn!(
                operation = %operation,
                transaction_id = transaction_id.map(TransactionId::as_str),
                error = %e,
                retryable = e.is_retryable(),
                "Payment gateway call failed"
            );
            e
        })
    }

    async fn send_expecting_json(
        &self,
        call: GatewayCall,
        transaction_id: &TransactionId,
        accepted: &[&str],
    ) -> Result<JsonMap<String, JsonValue>, PaymentError> {
        let operation = call.operation;
        let reply = self.send(call, Some(transaction_id)).await?;
        let body = reply
            .as_json()
            .cloned()
            .ok_or_else(|| PaymentError::unexpected(operation, "response is not a JSON object"))?;
        require_status(operation, body, accepted).map_err(|e| {
            tracing::warn!(
                operation = %operation,
                transaction_id = %transaction_id,
                error = %e,
                "Payment gateway rejected call"
            );
            e
        })
    }
}

/// Checks the gateway's `status` field against the accepted values.
fn require_status(
    operation: PaymentOperation,
    body: JsonMap<String, JsonValue>,
    accepted: &[&str],
) -> Result<JsonMap<String, JsonValue>, PaymentError> {
    let status = body
        .get("status")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| PaymentError::unexpected(operation, "missing status field"))?;
    if accepted.contains(&status) {
        Ok(body)
    } else {
        Err(PaymentError::remote_status(operation, status))
    }
}

/// Reads the remote session id, trying `paymentSessionId`, `transID`, then `id`.
fn session_id(
    operation: PaymentOperation,
    body: &JsonMap<String, JsonValue>,
) -> Result<TransactionId, PaymentError> {
    ["paymentSessionId", "transID", "id"]
        .iter()
        .filter_map(|key| match body.get(*key) {
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(JsonValue::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .find_map(|value| TransactionId::new(value).ok())
        .ok_or_else(|| PaymentError::unexpected(operation, "missing transaction id"))
}

fn map_remote_status(
    operation: PaymentOperation,
    value: &str,
) -> Result<PaymentSessionStatus, PaymentError> {
    PaymentSessionStatus::from_remote(value).ok_or_else(|| {
        PaymentError::unexpected(operation, format!("unknown payment status '{}'", value))
    })
}

/// 12 random lowercase hex characters.
fn generate_number() -> String {
    let mut number = Uuid::new_v4().simple().to_string();
    number.truncate(12);
    number
}

fn encode_description(description: &str) -> String {
    utf8_percent_encode(description, URI_COMPONENT).to_string()
}
