//! Trading endpoints for order management

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::client::GeminiRestClient;
use crate::error::RestResult;
use crate::types::OrderRequest;

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    client: &'a GeminiRestClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a GeminiRestClient) -> Self {
        Self { client }
    }

    /// Place a new order
    ///
    /// The order is validated before a nonce is drawn, so a rejected order
    /// never reaches the transport.
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side, order_type = %order.order_type))]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<Value> {
        let payload = match order.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Rejected order before signing");
                return Err(e);
            }
        };

        debug!(
            "Placing {} {} {} @ {}",
            order.side, order.amount, order.symbol, order.price
        );

        self.client.post("/order/new", payload).await
    }

    /// Cancel an order by ID
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Value> {
        debug!("Cancelling order {}", order_id);
        self.client.post("/order/cancel", order_id_payload(order_id)).await
    }

    /// Cancel every active order on the account, API and UI alike
    #[instrument(skip(self))]
    pub async fn cancel_all_active_orders(&self) -> RestResult<Value> {
        debug!("Cancelling all active orders");
        self.client.post("/order/cancel/all", Map::new()).await
    }

    /// Get the status of an order
    #[instrument(skip(self))]
    pub async fn get_order_status(&self, order_id: u64) -> RestResult<Value> {
        debug!("Fetching status for order {}", order_id);
        self.client.post("/order/status", order_id_payload(order_id)).await
    }
}

fn order_id_payload(order_id: u64) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("order_id".to_string(), Value::from(order_id));
    payload
}
