//! Credentials and payload signing for the Gemini REST API
//!
//! Every Gemini request carries a base64-encoded JSON payload (with a nonce)
//! and an HMAC-SHA384 signature of that base64 text. This crate owns those
//! pieces; `gemini-rest` turns them into HTTP headers.
//!
//! # Example
//!
//! ```no_run
//! use gemini_auth::{Credentials, NonceGenerator, PayloadSigner};
//! use serde_json::Map;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let signer = PayloadSigner::new(Credentials::from_env()?);
//! let nonces = NonceGenerator::new();
//!
//! let signed = signer.sign(&Map::new(), nonces.next_nonce())?;
//! println!("X-GEMINI-PAYLOAD: {}", signed.encoded);
//! println!("X-GEMINI-SIGNATURE: {}", signed.signature);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod mac;
mod nonce;
mod signer;

pub use credentials::{Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use mac::{HmacSha384, MacSigner};
pub use nonce::NonceGenerator;
pub use signer::{PayloadSigner, SignedPayload, NONCE_FIELD};
