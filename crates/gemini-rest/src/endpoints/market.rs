//! Public market data endpoints
//!
//! Gemini does not require authentication here, but requests are signed
//! like every other call.

use serde_json::Value;
use tracing::{debug, instrument};

use super::symbol_segment;
use crate::client::GeminiRestClient;
use crate::error::RestResult;
use crate::query::QueryParams;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a GeminiRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a GeminiRestClient) -> Self {
        Self { client }
    }

    /// Get ticker information
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol (e.g., "BTCUSD"), used as given
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, symbol: &str) -> RestResult<Value> {
        let path = format!("/ticker/{}", symbol_segment(symbol)?);
        debug!("Fetching ticker for {}", symbol);

        self.client.get(&path).await
    }

    /// Get current order book
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol
    /// * `options` - Query options in the order given: `limit_bids`,
    ///   `limit_asks` (0 returns the full side), `group`
    #[instrument(skip(self, options))]
    pub async fn get_order_book(&self, symbol: &str, options: &QueryParams) -> RestResult<Value> {
        let path = options.append_to(&format!("/book/{}", symbol_segment(symbol)?))?;
        debug!("Fetching order book for {}", symbol);

        self.client.get(&path).await
    }

    /// Get recent trades
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol
    /// * `options` - Query options in the order given: `limit_trades`,
    ///   `since` (timestamp)
    #[instrument(skip(self, options))]
    pub async fn get_trades(&self, symbol: &str, options: &QueryParams) -> RestResult<Value> {
        let path = options.append_to(&format!("/trades/{}", symbol_segment(symbol)?))?;
        debug!("Fetching trades for {}", symbol);

        self.client.get(&path).await
    }

    /// List tradable symbols
    #[instrument(skip(self))]
    pub async fn get_symbols(&self) -> RestResult<Value> {
        debug!("Fetching symbols");
        self.client.get("/symbols").await
    }

    /// Get tick size, quote increment and limits for a symbol
    #[instrument(skip(self))]
    pub async fn get_symbol_details(&self, symbol: &str) -> RestResult<Value> {
        let path = format!("/symbols/details/{}", symbol_segment(symbol)?);
        debug!("Fetching symbol details for {}", symbol);

        self.client.get(&path).await
    }
}
