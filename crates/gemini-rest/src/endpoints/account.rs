//! Private account endpoints

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::symbol_segment;
use crate::client::GeminiRestClient;
use crate::error::RestResult;

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a GeminiRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a GeminiRestClient) -> Self {
        Self { client }
    }

    /// Get available balances per currency
    #[instrument(skip(self))]
    pub async fn get_balances(&self) -> RestResult<Value> {
        debug!("Fetching balances");
        self.client.post("/balances", Map::new()).await
    }

    /// Get all live orders for the account
    #[instrument(skip(self))]
    pub async fn get_active_orders(&self) -> RestResult<Value> {
        debug!("Fetching active orders");
        self.client.post("/orders", Map::new()).await
    }

    /// Get the account's past trades on a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol
    /// * `limit_trades` - Maximum number of trades (exchange default 50)
    #[instrument(skip(self))]
    pub async fn get_past_trades(&self, symbol: &str, limit_trades: Option<u32>) -> RestResult<Value> {
        let mut payload = Map::new();
        payload.insert("symbol".to_string(), Value::from(symbol_segment(symbol)?));
        if let Some(limit) = limit_trades {
            payload.insert("limit_trades".to_string(), Value::from(limit));
        }

        debug!("Fetching past trades for {}", symbol);
        self.client.post("/mytrades", payload).await
    }
}
