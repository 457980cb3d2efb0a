//! Main REST client implementation

use gemini_auth::{Credentials, HmacSha384, MacSigner, NonceGenerator, PayloadSigner};
use reqwest::Method;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::config::{ClientConfig, DEFAULT_USER_AGENT};
use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{ApiErrorDetails, RestError, RestResult};
use crate::query::QueryParams;
use crate::request::RequestEnvelope;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::OrderRequest;

/// Gemini REST API client
///
/// Every request is signed: the payload (plus a nonce) is base64 encoded
/// into `X-GEMINI-PAYLOAD` and authenticated with HMAC-SHA384.
///
/// # Example
///
/// ```no_run
/// use gemini_rest::{ClientConfig, GeminiRestClient, QueryParams};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = GeminiRestClient::new(ClientConfig::from_env()?)?;
///
///     let ticker = client.get_ticker("BTCUSD").await?;
///     let book = client
///         .get_order_book("BTCUSD", &QueryParams::new().with("limit_bids", 5))
///         .await?;
///     let balances = client.get_balances().await?;
///
///     println!("{ticker}\n{book}\n{balances}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct GeminiRestClient {
    transport: Arc<dyn HttpTransport>,
    signer: PayloadSigner,
    nonces: Arc<NonceGenerator>,
    base_url: String,
    timeout: Duration,
}

impl GeminiRestClient {
    /// Create a client using the default `reqwest` transport
    ///
    /// # Errors
    /// [`RestError::Configuration`] if a credential is empty, the base URL is
    /// invalid, or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> RestResult<Self> {
        let credentials = config.validate()?;
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport = ReqwestTransport::new(user_agent)?;
        Ok(Self::from_validated(&config, credentials, Arc::new(transport), Arc::new(HmacSha384)))
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> RestResult<Self> {
        Self::with_parts(config, transport, Arc::new(HmacSha384))
    }

    /// Create a client with a custom transport and MAC implementation
    pub fn with_parts(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        mac: Arc<dyn MacSigner>,
    ) -> RestResult<Self> {
        let credentials = config.validate()?;
        Ok(Self::from_validated(&config, credentials, transport, mac))
    }

    fn from_validated(
        config: &ClientConfig,
        credentials: Credentials,
        transport: Arc<dyn HttpTransport>,
        mac: Arc<dyn MacSigner>,
    ) -> Self {
        let base_url = config.normalized_base_url();

        info!(base_url = %base_url, timeout_ms = config.timeout.as_millis() as u64, "Created Gemini REST client");

        Self {
            transport,
            signer: PayloadSigner::with_mac(credentials, mac),
            nonces: Arc::new(NonceGenerator::new()),
            base_url,
            timeout: config.timeout,
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// API key requests are signed for
    pub fn api_key(&self) -> &str {
        self.signer.api_key()
    }

    // ========================================================================
    // Request Pipeline
    // ========================================================================

    /// Build a signed request without sending it
    ///
    /// Draws a fresh nonce, so each call produces a distinct request.
    pub fn build_request(
        &self,
        endpoint: &str,
        payload: Map<String, Value>,
        method: Method,
    ) -> RestResult<HttpRequest> {
        let nonce = self.nonces.next_nonce();
        let signed = RequestEnvelope::new(endpoint, payload, method).sign(&self.signer, nonce)?;
        Ok(signed.into_http(&self.base_url, self.timeout))
    }

    /// Sign and send a request, returning the parsed JSON body
    ///
    /// Failures are logged once, at ERROR, by this span before being returned.
    ///
    /// # Errors
    /// - [`RestError::Api`] for a non-2xx status
    /// - [`RestError::Transport`] if no response was obtained
    /// - [`RestError::Parse`] if a 2xx body is not JSON
    #[instrument(skip(self, payload), err)]
    pub async fn send(
        &self,
        endpoint: &str,
        payload: Map<String, Value>,
        method: Method,
    ) -> RestResult<Value> {
        let request = self.build_request(endpoint, payload, method)?;
        debug!(
            url = %request.url,
            nonce = request.header(crate::request::HEADER_NONCE).unwrap_or_default(),
            "Dispatching signed request"
        );

        let response = self.transport.execute(request).await?;
        parse_response(endpoint, response)
    }

    pub(crate) async fn get(&self, endpoint: &str) -> RestResult<Value> {
        self.send(endpoint, Map::new(), Method::GET).await
    }

    pub(crate) async fn post(&self, endpoint: &str, payload: Map<String, Value>) -> RestResult<Value> {
        self.send(endpoint, payload, Method::POST).await
    }

    // ========================================================================
    // Endpoint Groups
    // ========================================================================

    /// Get market data endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(self)
    }

    // ========================================================================
    // Convenience Methods
    // ========================================================================

    /// Get ticker for a symbol
    pub async fn get_ticker(&self, symbol: &str) -> RestResult<Value> {
        self.market().get_ticker(symbol).await
    }

    /// Get order book for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol (e.g., "BTCUSD")
    /// * `options` - `limit_bids`, `limit_asks`, `group`
    pub async fn get_order_book(&self, symbol: &str, options: &QueryParams) -> RestResult<Value> {
        self.market().get_order_book(symbol, options).await
    }

    /// Get recent trades for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol
    /// * `options` - `limit_trades`, `since`
    pub async fn get_trades(&self, symbol: &str, options: &QueryParams) -> RestResult<Value> {
        self.market().get_trades(symbol, options).await
    }

    /// Get available balances
    pub async fn get_balances(&self) -> RestResult<Value> {
        self.account().get_balances().await
    }

    /// Place a new order
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<Value> {
        self.trading().place_order(order).await
    }

    /// Cancel an order by ID
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Value> {
        self.trading().cancel_order(order_id).await
    }
}

impl std::fmt::Debug for GeminiRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiRestClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("signer", &self.signer)
            .finish()
    }
}

/// Normalize a raw response into JSON or an error
fn parse_response(endpoint: &str, response: HttpResponse) -> RestResult<Value> {
    if !response.is_success() {
        return Err(RestError::Api {
            status: response.status,
            status_text: response.status_text,
            details: ApiErrorDetails::from_body(&response.body),
        });
    }

    serde_json::from_str(&response.body).map_err(|e| {
        RestError::Parse(format!(
            "{} returned {} with a non-JSON body: {}",
            endpoint, response.status, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use async_trait::async_trait;
    use serde_json::json;

    #[derive(Debug)]
    struct Unreachable;

    #[async_trait]
    impl HttpTransport for Unreachable {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            panic!("no request expected")
        }
    }

    fn client() -> GeminiRestClient {
        GeminiRestClient::with_transport(ClientConfig::new("account-key", "secret"), Arc::new(Unreachable))
            .unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: "Status".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_empty_credentials_fail_before_transport() {
        let err = GeminiRestClient::with_transport(ClientConfig::new("", "secret"), Arc::new(Unreachable))
            .unwrap_err();
        assert!(matches!(err, RestError::Configuration(_)));

        let err = GeminiRestClient::new(ClientConfig::new("key", "")).unwrap_err();
        assert!(matches!(err, RestError::Configuration(_)));
    }

    #[test]
    fn test_new_uses_validated_config() {
        let client = GeminiRestClient::new(
            ClientConfig::new("account-key", "secret")
                .with_base_url("https://api.sandbox.gemini.com/v1/")
                .with_timeout_ms(2_500),
        )
        .unwrap();
        assert_eq!(client.api_key(), "account-key");
        assert_eq!(client.base_url(), "https://api.sandbox.gemini.com/v1");
        assert_eq!(client.timeout(), Duration::from_millis(2_500));

        let request = client.build_request("/balances", Map::new(), Method::POST).unwrap();
        let expected = HmacSha384.sign_hex(b"secret", request.header("X-GEMINI-PAYLOAD").unwrap().as_bytes());
        assert_eq!(request.header("X-GEMINI-SIGNATURE"), Some(expected.as_str()));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GeminiRestClient::with_transport(
            ClientConfig::new("key", "secret").with_base_url("https://api.sandbox.gemini.com/v1/"),
            Arc::new(Unreachable),
        )
        .unwrap();
        let request = client.build_request("/symbols", Map::new(), Method::GET).unwrap();
        assert_eq!(request.url, "https://api.sandbox.gemini.com/v1/symbols");
    }

    #[test]
    fn test_build_request_draws_fresh_nonces() {
        let client = client();
        let nonce = |request: &HttpRequest| -> u64 {
            request.header("X-GEMINI-NONCE").unwrap().parse().unwrap()
        };

        let first = client.build_request("/balances", Map::new(), Method::POST).unwrap();
        let second = client.build_request("/balances", Map::new(), Method::POST).unwrap();
        assert!(nonce(&second) > nonce(&first));
        assert_ne!(first.header("X-GEMINI-SIGNATURE"), second.header("X-GEMINI-SIGNATURE"));
    }

    #[test]
    fn test_clones_share_nonce_sequence() {
        let client = client();
        let clone = client.clone();
        let a = client.build_request("/balances", Map::new(), Method::POST).unwrap();
        let b = clone.build_request("/balances", Map::new(), Method::POST).unwrap();
        assert_ne!(a.header("X-GEMINI-NONCE"), b.header("X-GEMINI-NONCE"));
    }

    #[test]
    fn test_parse_success_body() {
        let value = parse_response("/ticker/BTCUSD", response(200, r#"{"bid":"1","ask":"2"}"#)).unwrap();
        assert_eq!(value, json!({"bid": "1", "ask": "2"}));
    }

    #[test]
    fn test_parse_non_json_success_body() {
        let err = parse_response("/ticker/BTCUSD", response(200, "OK")).unwrap_err();
        assert!(matches!(err, RestError::Parse(_)));
    }

    #[test]
    fn test_parse_error_bodies() {
        let err = parse_response("/balances", response(400, r#"{"reason":"InvalidNonce"}"#)).unwrap_err();
        assert_eq!(err.details(), Some(&ApiErrorDetails::Structured(json!({"reason": "InvalidNonce"}))));

        let err = parse_response("/balances", response(502, "Bad Gateway")).unwrap_err();
        assert_eq!(err.details(), Some(&ApiErrorDetails::Raw("Bad Gateway".to_string())));
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", client());
        assert!(!debug.contains("secret\""));
        assert!(debug.contains("[REDACTED]"));
    }
}
