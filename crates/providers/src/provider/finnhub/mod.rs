//! Finnhub quote provider implementation.
//!
//! Real-time quotes come from the `/quote` endpoint. Finnhub answers unknown
//! symbols with an all-zero payload instead of an HTTP error, so a zero
//! current price is reported as [`MarketDataError::SymbolNotFound`].
//!
//! Finnhub free tier is limited to 60 API calls per minute.
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::StockQuote;
use crate::provider::QuoteProvider;

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /quote endpoint
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price
    c: Option<f64>,
    /// Change
    d: Option<f64>,
    /// Percent change
    dp: Option<f64>,
    /// High price of the day
    h: Option<f64>,
    /// Low price of the day
    l: Option<f64>,
    /// Open price of the day
    o: Option<f64>,
    /// Previous close price
    pc: Option<f64>,
}

/// Error response from Finnhub
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

// ============================================================================
// FinnhubProvider
// ============================================================================

/// Finnhub quote provider.
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FinnhubProvider {
    /// Create a new Finnhub provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    /// Create a provider pointing at a different API root (used by tests and proxies).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Make a GET request to the Finnhub API.
    async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        if self.api_key.is_empty() {
            return Err(MarketDataError::NotConfigured {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let url = format!("{}{}", self.base_url, endpoint);

        debug!("Finnhub request: {} with {} params", endpoint, params.len());

        let response = self
            .client
            .get(&url)
            .header("X-Finnhub-Token", &self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::provider(PROVIDER_ID, format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();

        // 403 is what Finnhub returns once the plan quota is exhausted
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                "Invalid or missing API key",
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(error_msg) = error_resp.error {
                    return Err(MarketDataError::provider(PROVIDER_ID, error_msg));
                }
            }

            return Err(MarketDataError::provider(
                PROVIDER_ID,
                format!("HTTP {} - {}", status, body),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to read response: {}", e)))
    }
}

/// Converts a raw `/quote` payload into a [`StockQuote`].
fn parse_quote(symbol: &str, text: &str) -> Result<StockQuote, MarketDataError> {
    let response: QuoteResponse = serde_json::from_str(text).map_err(|e| {
        MarketDataError::provider(PROVIDER_ID, format!("Failed to parse quote response: {}", e))
    })?;

    let current = response.c.unwrap_or(0.0);
    if current == 0.0 {
        return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
    }

    let to_decimal = |value: Option<f64>, field: &str| -> Result<Decimal, MarketDataError> {
        Decimal::try_from(value.unwrap_or(0.0)).map_err(|_| {
            MarketDataError::provider(PROVIDER_ID, format!("Invalid {} value: {:?}", field, value))
        })
    };

    Ok(StockQuote {
        symbol: symbol.to_string(),
        current_price: to_decimal(Some(current), "current price")?,
        change: to_decimal(response.d, "change")?,
        percent_change: to_decimal(response.dp, "percent change")?,
        high: to_decimal(response.h, "high")?,
        low: to_decimal(response.l, "low")?,
        open: to_decimal(response.o, "open")?,
        previous_close: to_decimal(response.pc, "previous close")?,
        timestamp: Utc::now(),
    })
}

#[async_trait]
impl QuoteProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn get_quote(&self, symbol: &str) -> Result<StockQuote, MarketDataError> {
        let text = self.fetch("/quote", &[("symbol", symbol)]).await?;
        parse_quote(symbol, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_id() {
        let provider = FinnhubProvider::new("test_key".to_string());
        assert_eq!(provider.id(), "FINNHUB");
        assert!(provider.is_configured());
    }

    #[test]
    fn test_empty_key_is_not_configured() {
        let provider = FinnhubProvider::new(String::new());
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn test_empty_key_fails_without_request() {
        let provider = FinnhubProvider::new(String::new());
        let err = provider.get_quote("AAPL").await.unwrap_err();
        assert!(matches!(err, MarketDataError::NotConfigured { .. }));
    }

    #[test]
    fn test_quote_response_parsing() {
        let json = r#"{
            "c": 150.25,
            "d": 1.50,
            "dp": 1.01,
            "h": 152.00,
            "l": 148.50,
            "o": 149.00,
            "pc": 148.75,
            "t": 1704067200
        }"#;

        let quote = parse_quote("AAPL", json).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.current_price, dec!(150.25));
        assert_eq!(quote.change, dec!(1.5));
        assert_eq!(quote.percent_change, dec!(1.01));
        assert_eq!(quote.high, dec!(152));
        assert_eq!(quote.low, dec!(148.5));
        assert_eq!(quote.open, dec!(149));
        assert_eq!(quote.previous_close, dec!(148.75));
    }

    #[test]
    fn test_zero_price_is_not_found() {
        let json = r#"{"c": 0, "d": null, "dp": null, "h": 0, "l": 0, "o": 0, "pc": 0, "t": 0}"#;
        let err = parse_quote("NOPE", json).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(ref s) if s == "NOPE"));
    }

    #[test]
    fn test_empty_payload_is_not_found() {
        let err = parse_quote("NOPE", "{}").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_payload_is_provider_error() {
        let err = parse_quote("AAPL", "not json").unwrap_err();
        assert!(matches!(err, MarketDataError::ProviderError { .. }));
    }
}
