//! Nonce generation for replay protection
//!
//! Gemini rejects any payload whose nonce is not greater than the last one
//! seen for the API key. Nonces here are epoch milliseconds, bumped to
//! `last + 1` whenever the clock has not advanced (two calls in the same
//! millisecond, or a wall clock stepping backwards).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Strictly increasing nonce source
///
/// Lock-free; safe to share between concurrent requests.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next nonce
    pub fn next_nonce(&self) -> u64 {
        self.next_from(current_millis())
    }

    /// Last nonce handed out (0 if none yet)
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }

    fn next_from(&self, now_ms: u64) -> u64 {
        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now_ms.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
