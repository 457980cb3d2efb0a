//! Payload signing
//!
//! Gemini signature algorithm:
//! 1. Merge `nonce` into the JSON payload
//! 2. Base64 encode the serialized JSON (this is `X-GEMINI-PAYLOAD`)
//! 3. HMAC-SHA384(api_secret, base64 string), hex encoded (`X-GEMINI-SIGNATURE`)
//!
//! The MAC covers the base64 text, not the raw JSON.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{Map, Value};
use tracing::trace;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};
use crate::mac::{HmacSha384, MacSigner};

/// Field name the nonce is merged under
pub const NONCE_FIELD: &str = "nonce";

/// Result of signing one payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// Nonce merged into the payload
    pub nonce: u64,
    /// Base64 of the JSON payload including the nonce
    pub encoded: String,
    /// Hex MAC of `encoded`
    pub signature: String,
}

/// Signs payloads with a set of credentials and an injected MAC
#[derive(Debug, Clone)]
pub struct PayloadSigner {
    credentials: Credentials,
    mac: Arc<dyn MacSigner>,
}

impl PayloadSigner {
    /// Create a signer using HMAC-SHA384
    pub fn new(credentials: Credentials) -> Self {
        Self::with_mac(credentials, Arc::new(HmacSha384))
    }

    /// Create a signer with an explicit MAC implementation
    pub fn with_mac(credentials: Credentials, mac: Arc<dyn MacSigner>) -> Self {
        Self { credentials, mac }
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Merge `nonce` into `payload`, encode it and sign the encoding
    ///
    /// A `nonce` key already present in `payload` is overwritten.
    pub fn sign(&self, payload: &Map<String, Value>, nonce: u64) -> AuthResult<SignedPayload> {
        let mut merged = payload.clone();
        merged.insert(NONCE_FIELD.to_string(), Value::from(nonce));

        let json =
            serde_json::to_string(&merged).map_err(|e| AuthError::Serialization(e.to_string()))?;
        let encoded = BASE64.encode(json.as_bytes());
        let signature = self.sign_encoded(&encoded);

        trace!(nonce, payload_len = json.len(), "Signed payload");

        Ok(SignedPayload {
            nonce,
            encoded,
            signature,
        })
    }

    /// Sign an already base64-encoded payload
    pub fn sign_encoded(&self, encoded: &str) -> String {
        self.mac.sign_hex(self.credentials.secret(), encoded.as_bytes())
    }
}
