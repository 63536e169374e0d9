//! Request signing for the payment gateway.
//!
//! Every outbound call carries a `signature` field computed as:
//!
//! ```text
//! base      = value_1 ":" value_2 ":" ... ":" value_n
//! canonical = base ":" secret_key_1 ":" secret_key_2
//! signature = UPPERCASE_HEX( HMAC-SHA256( key = secret_key_1 ++ secret_key_2, canonical ) )
//! ```
//!
//! Only parameter VALUES take part, in the order the caller supplied them.
//! The gateway expects a fixed field order per operation, so the order is
//! significant and never sorted.
//!
//! # Security
//!
//! - Secrets are held as `secrecy::SecretString` and never leave the process
//! - A signer cannot be built with a missing or empty secret

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map as JsonMap, Value as JsonValue};
use sha2::Sha256;

use super::PaymentError;

type HmacSha256 = Hmac<Sha256>;

const DELIMITER: &str = ":";

/// Field name the signature is attached under.
pub const SIGNATURE_FIELD: &str = "signature";

/// Whether empty-string values take part in the canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyValues {
    /// Empty values contribute an empty segment (`a::b`).
    Include,
    /// Empty-valued parameters are dropped from both the signature and the request.
    #[default]
    Skip,
}

/// Ordered parameter set for one gateway call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureParams {
    entries: Vec<(String, String)>,
}

impl SignatureParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Looks up the first value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn retain_for(self, empty_values: EmptyValues) -> Self {
        match empty_values {
            EmptyValues::Include => self,
            EmptyValues::Skip => Self {
                entries: self
                    .entries
                    .into_iter()
                    .filter(|(_, value)| !value.is_empty())
                    .collect(),
            },
        }
    }

    fn canonical_base(&self) -> String {
        self.entries
            .iter()
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(DELIMITER)
    }
}

/// Parameters plus the signature computed over them.
///
/// Built fresh for every call and never reused. Fields added with
/// [`SignedRequest::with_unsigned`] travel in the body but are, by the
/// gateway's contract, not covered by the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: SignatureParams,
    unsigned: SignatureParams,
    signature: String,
}

impl SignedRequest {
    /// Adds a body field outside the signed set.
    pub fn with_unsigned(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.unsigned.push(name, value);
        self
    }

    pub fn params(&self) -> &SignatureParams {
        &self.params
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Body fields in wire order: signed fields, unsigned fields, then `signature`.
    pub fn fields(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .chain(self.unsigned.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .chain(std::iter::once((
                SIGNATURE_FIELD.to_string(),
                self.signature.clone(),
            )))
            .collect()
    }

    /// Body as a JSON object, preserving field order.
    pub fn to_json(&self) -> JsonMap<String, JsonValue> {
        self.fields()
            .into_iter()
            .map(|(k, v)| (k, JsonValue::String(v)))
            .collect()
    }
}

/// Computes gateway signatures from the two merchant secrets.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    secret_key_1: SecretString,
    secret_key_2: SecretString,
}

impl RequestSigner {
    /// Creates a signer.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Configuration` if either secret is empty. The
    /// signer never falls back to signing with an empty key.
    pub fn new(secret_key_1: SecretString, secret_key_2: SecretString) -> Result<Self, PaymentError> {
        if secret_key_1.expose_secret().is_empty() {
            return Err(PaymentError::configuration("secret_key_1 is not set"));
        }
        if secret_key_2.expose_secret().is_empty() {
            return Err(PaymentError::configuration("secret_key_2 is not set"));
        }
        Ok(Self {
            secret_key_1,
            secret_key_2,
        })
    }

    /// Creates a signer from optionally-configured secrets.
    pub fn from_config(
        secret_key_1: Option<&SecretString>,
        secret_key_2: Option<&SecretString>,
    ) -> Result<Self, PaymentError> {
        let secret_key_1 =
            secret_key_1.ok_or_else(|| PaymentError::configuration("secret_key_1 is not set"))?;
        let secret_key_2 =
            secret_key_2.ok_or_else(|| PaymentError::configuration("secret_key_2 is not set"))?;
        Self::new(secret_key_1.clone(), secret_key_2.clone())
    }

    /// Computes the uppercase hex signature for `params`.
    pub fn sign(&self, params: &SignatureParams, empty_values: EmptyValues) -> String {
        let params = params.clone().retain_for(empty_values);
        self.digest(&params)
    }

    /// Signs `params` and returns the request ready for transport.
    ///
    /// With [`EmptyValues::Skip`] the empty-valued parameters are removed
    /// from the request as well, so the body carries exactly the signed set.
    pub fn sign_request(&self, params: SignatureParams, empty_values: EmptyValues) -> SignedRequest {
        let params = params.retain_for(empty_values);
        let signature = self.digest(&params);
        SignedRequest {
            params,
            unsigned: SignatureParams::new(),
            signature,
        }
    }

    fn digest(&self, params: &SignatureParams) -> String {
        let secret_key_1 = self.secret_key_1.expose_secret();
        let secret_key_2 = self.secret_key_2.expose_secret();

        let canonical = format!(
            "{}{}{}{}{}",
            params.canonical_base(),
            DELIMITER,
            secret_key_1,
            DELIMITER,
            secret_key_2
        );

        let mut key = String::with_capacity(secret_key_1.len() + secret_key_2.len());
        key.push_str(secret_key_1);
        key.push_str(secret_key_2);

        let mut mac =
            HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any size");
        mac.update(canonical.as_bytes());
        hex::encode_upper(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn signer() -> RequestSigner {
        RequestSigner::new(
            SecretString::new("alpha".to_string()),
            SecretString::new("beta".to_string()),
        )
        .unwrap()
    }

    fn txn_params() -> SignatureParams {
        SignatureParams::new()
            .with("transID", "txn_123")
            .with("account", "acct_42")
    }

    // ══════════════════════════════════════════════════════════════
    // Digest Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn produces_known_digest() {
        let signature = signer().sign(&txn_params(), EmptyValues::Skip);
        assert_eq!(
            signature,
            "6F1882E8866D23CBFAEE0735A160EA9186B1FB04DDD37DCC7DBB6720B3B51A76"
        );
    }

    #[test]
    fn empty_parameter_list_signs_secrets_only() {
        let signature = signer().sign(&SignatureParams::new(), EmptyValues::Include);
        assert_eq!(
            signature,
            "6A95B4473C5228AB235844D2668DBC476E13CC1D26806BAC575061EA3E39B766"
        );
    }

    #[test]
    fn swapped_order_changes_digest() {
        let swapped = SignatureParams::new()
            .with("account", "acct_42")
            .with("transID", "txn_123");
        let signature = signer().sign(&swapped, EmptyValues::Skip);
        assert_eq!(
            signature,
            "2539A349CA8A4059918C5BB3A4E64A312034B66EEB02ECD0DA7A95DAACDA3052"
        );
    }

    #[test]
    fn included_empty_value_adds_empty_segment() {
        let params = txn_params().with("paytoken", "");
        assert_eq!(
            signer().sign(&params, EmptyValues::Include),
            "21345024C23AB7AC3937CB42AD20EFF71056A185E8590C6BA75F425C0F3242B4"
        );
        assert_eq!(
            signer().sign(&params, EmptyValues::Skip),
            signer().sign(&txn_params(), EmptyValues::Skip)
        );
    }

    #[test]
    fn signature_is_uppercase_hex() {
        let signature = signer().sign(&txn_params(), EmptyValues::Skip);
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    // ══════════════════════════════════════════════════════════════
    // Fail-closed Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn empty_secret_is_rejected() {
        let result = RequestSigner::new(
            SecretString::new(String::new()),
            SecretString::new("beta".to_string()),
        );
        assert!(matches!(result, Err(PaymentError::Configuration(_))));

        let result = RequestSigner::new(
            SecretString::new("alpha".to_string()),
            SecretString::new(String::new()),
        );
        assert!(matches!(result, Err(PaymentError::Configuration(_))));
    }

    #[test]
    fn missing_secret_is_rejected() {
        let key = SecretString::new("alpha".to_string());
        let result = RequestSigner::from_config(Some(&key), None);
        assert!(matches!(result, Err(PaymentError::Configuration(ref m)) if m.contains("secret_key_2")));
    }

    // ══════════════════════════════════════════════════════════════
    // SignedRequest Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn signed_request_body_ends_with_signature() {
        let request = signer()
            .sign_request(txn_params(), EmptyValues::Skip)
            .with_unsigned("email", "buyer@example.com");

        let fields = request.fields();
        let names: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["transID", "account", "email", "signature"]);
        assert_eq!(fields[3].1, request.signature());
    }

    #[test]
    fn unsigned_fields_do_not_affect_signature() {
        let plain = signer().sign_request(txn_params(), EmptyValues::Skip);
        let extended = plain.clone().with_unsigned("cf1", "note");
        assert_eq!(plain.signature(), extended.signature());
    }

    #[test]
    fn skipped_empty_values_are_not_sent() {
        let request = signer().sign_request(txn_params().with("paytoken", ""), EmptyValues::Skip);
        assert!(request.params().get("paytoken").is_none());
        assert!(!request.to_json().contains_key("paytoken"));
    }

    #[test]
    fn json_body_preserves_order() {
        let request = signer().sign_request(txn_params(), EmptyValues::Skip);
        let json = request.to_json();
        let keys: Vec<&String> = json.keys().collect();
        assert_eq!(keys, vec!["transID", "account", "signature"]);
    }

    // ══════════════════════════════════════════════════════════════
    // Property Tests
    // ══════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn signing_is_deterministic(values in proptest::collection::vec("[ -~]{0,16}", 0..8)) {
            let mut params = SignatureParams::new();
            for (i, value) in values.iter().enumerate() {
                params.push(format!("p{}", i), value.clone());
            }
            let first = signer().sign(&params, EmptyValues::Include);
            let second = signer().sign(&params, EmptyValues::Include);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn signing_is_order_sensitive(a in "[a-zA-Z0-9]{1,12}", b in "[a-zA-Z0-9]{1,12}") {
            prop_assume!(a != b);
            let forward = SignatureParams::new().with("x", a.clone()).with("y", b.clone());
            let reversed = SignatureParams::new().with("y", b).with("x", a);
            prop_assert_ne!(
                signer().sign(&forward, EmptyValues::Skip),
                signer().sign(&reversed, EmptyValues::Skip)
            );
        }
    }
}
