//! Quote domain model.

use chrono::{DateTime, Utc};
use miltontv_providers::StockQuote;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest quote for a ticker. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub ticker: String,
    pub current_price: Decimal,
    pub change: Decimal,
    pub percent_change: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub open: Decimal,
    pub previous_close: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl From<StockQuote> for Quote {
    fn from(q: StockQuote) -> Self {
        Self {
            ticker: q.symbol,
            current_price: q.current_price,
            change: q.change,
            percent_change: q.percent_change,
            high: q.high,
            low: q.low,
            open: q.open,
            previous_close: q.previous_close,
            timestamp: q.timestamp,
        }
    }
}
