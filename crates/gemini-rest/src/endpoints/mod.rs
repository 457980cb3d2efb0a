//! API endpoint implementations

pub mod account;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;

use crate::error::{RestError, RestResult};
use tracing::warn;

/// Non-empty and limited to `[A-Za-z0-9_-]`
pub(crate) fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Check that `symbol` can be used as a path segment verbatim
pub(crate) fn symbol_segment(symbol: &str) -> RestResult<&str> {
    if is_valid_symbol(symbol) {
        Ok(symbol)
    } else {
        warn!(symbol, "Rejected symbol before signing");
        Err(RestError::InvalidParameter(format!("invalid symbol {:?}", symbol)))
    }
}
