//! Types for Gemini REST API requests

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::endpoints::is_valid_symbol;
use crate::error::{RestError, RestResult};

// ============================================================================
// Order Types
// ============================================================================

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type accepted by `/order/new`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Plain limit order
    #[serde(rename = "exchange limit")]
    ExchangeLimit,
    /// Limit order activated at `stop_price`
    #[serde(rename = "exchange stop limit")]
    ExchangeStopLimit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExchangeLimit => "exchange limit",
            Self::ExchangeStopLimit => "exchange stop limit",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order execution options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderOption {
    /// Post-only; cancelled if it would take liquidity
    MakerOrCancel,
    /// Fill what is possible immediately, cancel the rest
    ImmediateOrCancel,
    /// Fill entirely immediately or cancel
    FillOrKill,
    /// Only participate in the next auction
    AuctionOnly,
    /// Block-trading indication of interest
    IndicationOfInterest,
}

impl OrderOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MakerOrCancel => "maker-or-cancel",
            Self::ImmediateOrCancel => "immediate-or-cancel",
            Self::FillOrKill => "fill-or-kill",
            Self::AuctionOnly => "auction-only",
            Self::IndicationOfInterest => "indication-of-interest",
        }
    }
}

/// New order parameters
///
/// Amounts and prices are sent as decimal strings, as Gemini requires.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Trading symbol (e.g., "btcusd")
    pub symbol: String,
    /// Buy or sell
    pub side: OrderSide,
    /// Quantity in the base currency
    pub amount: Decimal,
    /// Limit price
    pub price: Decimal,
    /// Order type
    pub order_type: OrderType,
    /// Trigger price for stop-limit orders
    pub stop_price: Option<Decimal>,
    /// Caller-chosen identifier echoed back in order events
    pub client_order_id: Option<String>,
    /// Execution options (Gemini accepts at most one)
    pub options: Vec<OrderOption>,
}

impl OrderRequest {
    /// Create a limit order
    pub fn limit(symbol: impl Into<String>, side: OrderSide, amount: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            amount,
            price,
            order_type: OrderType::ExchangeLimit,
            stop_price: None,
            client_order_id: None,
            options: Vec::new(),
        }
    }

    /// Create a stop-limit order
    pub fn stop_limit(
        symbol: impl Into<String>,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            order_type: OrderType::ExchangeStopLimit,
            stop_price: Some(stop_price),
            ..Self::limit(symbol, side, amount, price)
        }
    }

    /// Set client order ID
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    /// Add an execution option
    pub fn with_option(mut self, option: OrderOption) -> Self {
        self.options.push(option);
        self
    }

    /// Check field contracts before anything is signed
    pub fn validate(&self) -> RestResult<()> {
        if !is_valid_symbol(&self.symbol) {
            return Err(RestError::InvalidParameter(format!("invalid symbol {:?}", self.symbol)));
        }
        if self.amount <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if self.price <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!(
                "price must be positive, got {}",
                self.price
            )));
        }
        match (self.order_type, self.stop_price) {
            (OrderType::ExchangeStopLimit, None) => {
                return Err(RestError::InvalidParameter(
                    "stop-limit orders require stop_price".to_string(),
                ));
            }
            (OrderType::ExchangeStopLimit, Some(stop)) if stop <= Decimal::ZERO => {
                return Err(RestError::InvalidParameter(format!(
                    "stop_price must be positive, got {}",
                    stop
                )));
            }
            (OrderType::ExchangeLimit, Some(_)) => {
                return Err(RestError::InvalidParameter(
                    "stop_price is only valid for stop-limit orders".to_string(),
                ));
            }
            _ => {}
        }
        if self.options.len() > 1 {
            return Err(RestError::InvalidParameter(
                "at most one order option may be given".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the `/order/new` payload
    pub fn to_payload(&self) -> RestResult<Map<String, Value>> {
        self.validate()?;

        let mut payload = Map::new();
        payload.insert("symbol".to_string(), Value::from(self.symbol.as_str()));
        payload.insert("amount".to_string(), Value::from(self.amount.to_string()));
        payload.insert("price".to_string(), Value::from(self.price.to_string()));
        payload.insert("side".to_string(), Value::from(self.side.as_str()));
        payload.insert("type".to_string(), Value::from(self.order_type.as_str()));
        if let Some(stop_price) = &self.stop_price {
            payload.insert("stop_price".to_string(), Value::from(stop_price.to_string()));
        }
        if let Some(id) = &self.client_order_id {
            payload.insert("client_order_id".to_string(), Value::from(id.as_str()));
        }
        if !self.options.is_empty() {
            let options = self.options.iter().map(|o| Value::from(o.as_str())).collect();
            payload.insert("options".to_string(), Value::Array(options));
        }

        Ok(payload)
    }
}
