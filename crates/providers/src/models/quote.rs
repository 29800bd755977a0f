use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Real-time quote for a single ticker as reported by a quote provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    /// Ticker symbol the quote was requested for
    pub symbol: String,

    /// Current/last traded price
    pub current_price: Decimal,

    /// Absolute change since the previous close
    pub change: Decimal,

    /// Percent change since the previous close
    pub percent_change: Decimal,

    /// High price of the day
    pub high: Decimal,

    /// Low price of the day
    pub low: Decimal,

    /// Open price of the day
    pub open: Decimal,

    /// Previous close price
    pub previous_close: Decimal,

    /// When the quote was fetched
    pub timestamp: DateTime<Utc>,
}
