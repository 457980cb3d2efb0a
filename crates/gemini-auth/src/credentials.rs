//! API credentials for Gemini's private endpoints
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretBox};

use crate::error::{AuthError, AuthResult};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "GEMINI_API_SECRET";

/// API credentials for signed requests
///
/// The secret is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (sent in clear as `X-GEMINI-APIKEY`)
    api_key: String,
    /// API secret bytes, used as the HMAC key
    api_secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// Gemini secrets are used verbatim as HMAC key bytes; unlike some
    /// exchanges they are not base64-decoded first.
    ///
    /// # Errors
    /// Returns [`AuthError::MissingCredential`] if either value is empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl AsRef<str>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.as_ref();

        if api_key.trim().is_empty() {
            return Err(AuthError::MissingCredential("api_key"));
        }
        if api_secret.is_empty() {
            return Err(AuthError::MissingCredential("api_secret"));
        }

        Ok(Self {
            api_key,
            api_secret: SecretBox::new(Box::new(api_secret.as_bytes().to_vec())),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `GEMINI_API_KEY` and `GEMINI_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Self::new(api_key, api_secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Controlled access to the secret key bytes
    pub(crate) fn secret(&self) -> &[u8] {
        self.api_secret.expose_secret()
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretBox::new(Box::new(self.api_secret.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
