//! Keyed MAC capability used to sign payloads
//!
//! Signing goes through the [`MacSigner`] trait so the client receives its
//! hashing primitive explicitly instead of reaching for a global one.

use hmac::{Hmac, Mac};
use sha2::Sha384;

type HmacSha384Impl = Hmac<Sha384>;

/// Keyed MAC producing a hex-encoded digest
pub trait MacSigner: Send + Sync + std::fmt::Debug {
    /// Compute the MAC of `message` under `key`, hex encoded (lowercase)
    fn sign_hex(&self, key: &[u8], message: &[u8]) -> String;
}

/// HMAC-SHA384, the algorithm Gemini requires
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha384;

impl MacSigner for HmacSha384 {
    fn sign_hex(&self, key: &[u8], message: &[u8]) -> String {
        let mut mac =
            HmacSha384Impl::new_from_slice(key).expect("HMAC can take key of any size");
        mac.update(message);
        hex::encode(mac.finalize().into_bytes())
    }
}
