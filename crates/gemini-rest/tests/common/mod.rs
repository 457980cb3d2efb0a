//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes documented for Gemini's v1 REST API.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use gemini_rest::{
    ClientConfig, GeminiRestClient, HttpRequest, HttpResponse, HttpTransport, TransportError,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "account-test-key";
pub const API_SECRET: &str = "test-secret";
pub const BASE_URL: &str = "https://api.gemini.test/v1";

/// Sample ticker response
pub const TICKER_RESPONSE: &str = r#"{
    "bid": "97230.51",
    "ask": "97230.52",
    "last": "97231.00",
    "volume": {
        "BTC": "1502.37",
        "USD": "146080000.12",
        "timestamp": 1734784104000
    }
}"#;

/// Sample order book response
pub const BOOK_RESPONSE: &str = r#"{
    "bids": [{"price": "97230.51", "amount": "0.5", "timestamp": "1734784104"}],
    "asks": [{"price": "97230.52", "amount": "1.25", "timestamp": "1734784104"}]
}"#;

/// Sample balances response
pub const BALANCES_RESPONSE: &str = r#"[
    {"type": "exchange", "currency": "BTC", "amount": "1.5", "available": "1.0", "availableForWithdrawal": "1.0"},
    {"type": "exchange", "currency": "USD", "amount": "2500.00", "available": "2500.00", "availableForWithdrawal": "2500.00"}
]"#;

/// Sample error body for a bad signature
pub const INVALID_SIGNATURE_RESPONSE: &str = r#"{
    "result": "error",
    "reason": "InvalidSignature",
    "message": "InvalidSignature"
}"#;

/// Transport that records requests and replays canned responses
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        let status_text = match status {
            200 => "OK",
            400 => "Bad Request",
            429 => "Too Many Requests",
            502 => "Bad Gateway",
            _ => "",
        };
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no response queued")
    }
}

/// Client wired to a recording transport
pub fn client_with(transport: &Arc<RecordingTransport>) -> GeminiRestClient {
    let config = ClientConfig::new(API_KEY, API_SECRET).with_base_url(BASE_URL);
    GeminiRestClient::with_transport(config, transport.clone()).unwrap()
}

/// Decode the `X-GEMINI-PAYLOAD` header of a request
pub fn decoded_payload(request: &HttpRequest) -> Value {
    let encoded = request.header("X-GEMINI-PAYLOAD").expect("payload header");
    serde_json::from_slice(&BASE64.decode(encoded).unwrap()).unwrap()
}

/// Nonce header as a number
pub fn nonce(request: &HttpRequest) -> u64 {
    request.header("X-GEMINI-NONCE").unwrap().parse().unwrap()
}
