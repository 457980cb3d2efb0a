//! Signed request construction
//!
//! Every call, GET included, carries a signed payload in headers. Non-GET
//! calls additionally send the caller's JSON payload (without the nonce) as
//! the body.

use gemini_auth::PayloadSigner;
use reqwest::Method;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::error::{RestError, RestResult};
use crate::transport::HttpRequest;

/// API key header
pub const HEADER_API_KEY: &str = "X-GEMINI-APIKEY";
/// Base64 payload header
pub const HEADER_PAYLOAD: &str = "X-GEMINI-PAYLOAD";
/// Hex HMAC-SHA384 signature header
pub const HEADER_SIGNATURE: &str = "X-GEMINI-SIGNATURE";
/// Nonce header
pub const HEADER_NONCE: &str = "X-GEMINI-NONCE";

const CONTENT_TYPE_JSON: &str = "application/json";

/// One call's endpoint, payload and verb
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    /// Path (and query string) relative to the base URL
    pub endpoint: String,
    /// Caller payload, before the nonce is merged
    pub payload: Map<String, Value>,
    /// HTTP verb
    pub method: Method,
}

impl RequestEnvelope {
    pub fn new(endpoint: impl Into<String>, payload: Map<String, Value>, method: Method) -> Self {
        Self {
            endpoint: endpoint.into(),
            payload,
            method,
        }
    }

    /// GET with an empty payload
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, Map::new(), Method::GET)
    }

    /// POST with the given payload
    pub fn post(endpoint: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self::new(endpoint, payload, Method::POST)
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }

    /// Sign the payload and render headers and body
    pub fn sign(&self, signer: &PayloadSigner, nonce: u64) -> RestResult<SignedRequest> {
        let signed = signer.sign(&self.payload, nonce)?;

        let body = if self.is_get() {
            None
        } else {
            let json = serde_json::to_string(&self.payload)
                .map_err(|e| RestError::InvalidParameter(format!("payload is not serializable: {}", e)))?;
            Some(json)
        };

        let headers = SignedHeaders {
            content_type: body.as_ref().map(|_| CONTENT_TYPE_JSON),
            content_length: body.as_ref().map_or(0, String::len),
            api_key: signer.api_key().to_string(),
            payload: signed.encoded,
            signature: signed.signature,
            nonce: signed.nonce,
        };

        Ok(SignedRequest {
            method: self.method.clone(),
            endpoint: self.endpoint.clone(),
            headers,
            body,
        })
    }
}

/// Authentication and framing headers for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `application/json`, absent for GET
    pub content_type: Option<&'static str>,
    /// Body length in bytes (0 for GET)
    pub content_length: usize,
    pub api_key: String,
    /// Base64 JSON payload including the nonce
    pub payload: String,
    pub signature: String,
    pub nonce: u64,
}

impl SignedHeaders {
    /// Header name/value pairs in send order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(7);
        if let Some(content_type) = self.content_type {
            pairs.push(("Content-Type".to_string(), content_type.to_string()));
        }
        pairs.push(("Content-Length".to_string(), self.content_length.to_string()));
        pairs.push((HEADER_API_KEY.to_string(), self.api_key.clone()));
        pairs.push((HEADER_PAYLOAD.to_string(), self.payload.clone()));
        pairs.push((HEADER_SIGNATURE.to_string(), self.signature.clone()));
        pairs.push((HEADER_NONCE.to_string(), self.nonce.to_string()));
        pairs.push(("Cache-Control".to_string(), "no-cache".to_string()));
        pairs
    }
}

/// A signed envelope, not yet bound to a base URL
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    pub method: Method,
    pub endpoint: String,
    pub headers: SignedHeaders,
    pub body: Option<String>,
}

impl SignedRequest {
    /// Bind to `base_url` (no trailing slash) and a timeout
    pub fn into_http(self, base_url: &str, timeout: Duration) -> HttpRequest {
        HttpRequest {
            url: format!("{}{}", base_url, self.endpoint),
            method: self.method,
            headers: self.headers.to_pairs(),
            body: self.body,
            timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use gemini_auth::{Credentials, HmacSha384, MacSigner};
    use serde_json::json;

    fn signer() -> PayloadSigner {
        PayloadSigner::new(Credentials::new("account-key", "secret").unwrap())
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn decoded_payload(headers: &SignedHeaders) -> Value {
        serde_json::from_slice(&BASE64.decode(&headers.payload).unwrap()).unwrap()
    }

    #[test]
    fn test_get_has_no_body_or_content_type() {
        let signed = RequestEnvelope::get("/ticker/BTCUSD").sign(&signer(), 10).unwrap();

        assert!(signed.body.is_none());
        assert_eq!(signed.headers.content_type, None);
        assert_eq!(signed.headers.content_length, 0);
        assert_eq!(decoded_payload(&signed.headers), json!({"nonce": 10}));

        let names: Vec<String> = signed.headers.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert!(!names.iter().any(|n| n == "Content-Type"));
        assert!(names.iter().any(|n| n == "Content-Length"));
    }

    #[test]
    fn test_post_body_is_original_payload() {
        let payload = object(json!({"symbol": "btcusd", "side": "buy"}));
        let signed = RequestEnvelope::post("/order/new", payload).sign(&signer(), 11).unwrap();

        let body = signed.body.as_deref().unwrap();
        assert_eq!(body, r#"{"symbol":"btcusd","side":"buy"}"#);
        assert_eq!(signed.headers.content_type, Some("application/json"));
        assert_eq!(signed.headers.content_length, body.len());
        assert_eq!(
            decoded_payload(&signed.headers),
            json!({"symbol": "btcusd", "side": "buy", "nonce": 11})
        );
    }

    #[test]
    fn test_content_length_counts_utf8_bytes() {
        let payload = object(json!({"client_order_id": "ordre-été-€"}));
        let signed = RequestEnvelope::post("/order/new", payload).sign(&signer(), 12).unwrap();

        let body = signed.body.unwrap();
        assert!(body.len() > body.chars().count());
        assert_eq!(signed.headers.content_length, body.len());
    }

    #[test]
    fn test_empty_post_payload() {
        let signed = RequestEnvelope::post("/balances", Map::new()).sign(&signer(), 13).unwrap();
        assert_eq!(signed.body.as_deref(), Some("{}"));
        assert_eq!(signed.headers.content_length, 2);
        assert_eq!(decoded_payload(&signed.headers), json!({"nonce": 13}));
    }

    #[test]
    fn test_signature_header_matches_payload_header() {
        let signed = RequestEnvelope::post("/balances", Map::new()).sign(&signer(), 14).unwrap();
        let expected = HmacSha384.sign_hex(b"secret", signed.headers.payload.as_bytes());
        assert_eq!(signed.headers.signature, expected);
    }

    #[test]
    fn test_into_http_binds_url_and_headers() {
        let request = RequestEnvelope::get("/book/BTCUSD?limit_bids=5")
            .sign(&signer(), 15)
            .unwrap()
            .into_http("https://api.gemini.com/v1", Duration::from_secs(3));

        assert_eq!(request.url, "https://api.gemini.com/v1/book/BTCUSD?limit_bids=5");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.timeout, Duration::from_secs(3));
        assert_eq!(request.header(HEADER_API_KEY), Some("account-key"));
        assert_eq!(request.header(HEADER_NONCE), Some("15"));
        assert_eq!(request.header("Content-Length"), Some("0"));
        assert_eq!(request.header("Cache-Control"), Some("no-cache"));
    }
}
