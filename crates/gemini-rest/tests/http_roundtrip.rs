//! End-to-end requests through the reqwest transport against a local mock server

mod common;

use common::*;
use gemini_rest::{ApiErrorDetails, ClientConfig, GeminiRestClient, QueryParams, RestError};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn client_for(server: &MockServer) -> GeminiRestClient {
    let config = ClientConfig::new(API_KEY, API_SECRET)
        .with_base_url(server.url("/v1"))
        .with_timeout_ms(2_000);
    GeminiRestClient::new(config).unwrap()
}

#[tokio::test]
async fn test_ticker_over_http() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/ticker/BTCUSD")
                .header("X-GEMINI-APIKEY", API_KEY)
                .header_exists("X-GEMINI-PAYLOAD")
                .header_exists("X-GEMINI-SIGNATURE")
                .header_exists("X-GEMINI-NONCE");
            then.status(200)
                .header("content-type", "application/json")
                .body(TICKER_RESPONSE);
        })
        .await;

    let ticker = client_for(&server).get_ticker("BTCUSD").await.unwrap();

    mock.assert_async().await;
    assert_eq!(ticker["last"], json!("97231.00"));
}

#[tokio::test]
async fn test_order_book_query_over_http() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/book/BTCUSD")
                .query_param("limit_bids", "5")
                .query_param("limit_asks", "5");
            then.status(200).body(BOOK_RESPONSE);
        })
        .await;

    let options = QueryParams::new().with("limit_bids", 5).with("limit_asks", 5);
    let book = client_for(&server).get_order_book("BTCUSD", &options).await.unwrap();

    mock.assert_async().await;
    assert_eq!(book["asks"][0]["amount"], json!("1.25"));
}

#[tokio::test]
async fn test_balances_body_over_http() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/balances")
                .header("Content-Type", "application/json")
                .header("Content-Length", "2")
                .body("{}");
            then.status(200).body(BALANCES_RESPONSE);
        })
        .await;

    let balances = client_for(&server).get_balances().await.unwrap();

    mock.assert_async().await;
    assert_eq!(balances.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_error_bodies_over_http() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/balances");
            then.status(400).body(INVALID_SIGNATURE_RESPONSE);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/ticker/BTCUSD");
            then.status(503).body("upstream unavailable");
        })
        .await;

    let client = client_for(&server);

    let err = client.get_balances().await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.details().and_then(ApiErrorDetails::reason), Some("InvalidSignature"));

    let err = client.get_ticker("BTCUSD").await.unwrap_err();
    match err {
        RestError::Api {
            status,
            status_text,
            details,
        } => {
            assert_eq!(status, 503);
            assert_eq!(status_text, "Service Unavailable");
            assert_eq!(details, ApiErrorDetails::Raw("upstream unavailable".to_string()));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/symbols");
            then.status(200).body("[]").delay(Duration::from_secs(2));
        })
        .await;

    let config = ClientConfig::new(API_KEY, API_SECRET)
        .with_base_url(server.url("/v1"))
        .with_timeout_ms(100);
    let client = GeminiRestClient::new(config).unwrap();

    let err = client.market().get_symbols().await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let config = ClientConfig::new(API_KEY, API_SECRET)
        .with_base_url("http://127.0.0.1:9/v1")
        .with_timeout_ms(2_000);
    let client = GeminiRestClient::new(config).unwrap();

    let err = client.get_ticker("BTCUSD").await.unwrap_err();
    assert!(matches!(err, RestError::Transport(_)), "got {:?}", err);
    assert!(err.is_retryable());
}
