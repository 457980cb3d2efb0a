//! REST API client for the Gemini cryptocurrency exchange
//!
//! This crate provides a thin signed client for Gemini's v1 REST API:
//! market data, balances and order management.
//!
//! # Features
//!
//! - **Market Data**: Ticker, order book, recent trades, symbols
//! - **Account**: Balances, active orders, past trades
//! - **Trading**: Place, cancel and query orders
//!
//! # Authentication
//!
//! Every request carries `X-GEMINI-APIKEY`, `X-GEMINI-PAYLOAD` (base64 JSON
//! payload including a nonce), `X-GEMINI-SIGNATURE` (hex HMAC-SHA384 of the
//! payload header) and `X-GEMINI-NONCE`. Nonces are strictly increasing per
//! client.
//!
//! # Example
//!
//! ```no_run
//! use gemini_rest::{ClientConfig, GeminiRestClient, OrderRequest, OrderSide};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiRestClient::new(ClientConfig::from_env()?.sandbox())?;
//!
//!     let ticker = client.get_ticker("BTCUSD").await?;
//!     println!("BTC/USD: {}", ticker);
//!
//!     let order = OrderRequest::limit(
//!         "btcusd",
//!         OrderSide::Buy,
//!         Decimal::new(1, 2),
//!         Decimal::new(30_000, 0),
//!     );
//!     let placed = client.place_order(&order).await?;
//!     println!("Placed: {}", placed);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Failures are returned, never retried. [`RestError::is_retryable`] and
//! [`RestError::is_rate_limited`] help callers decide their own policy.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod query;
pub mod request;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::GeminiRestClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, SANDBOX_BASE_URL};
pub use error::{ApiErrorDetails, RestError, RestResult};
pub use query::{QueryParams, QueryValue};
pub use request::{RequestEnvelope, SignedHeaders, SignedRequest};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError, TransportErrorKind,
};
pub use types::{OrderOption, OrderRequest, OrderSide, OrderType};

// Re-export auth types
pub use gemini_auth::{Credentials, HmacSha384, MacSigner, NonceGenerator};

pub use reqwest::Method;
