//! Provider trait definitions.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{StockQuote, VideoSearchItem, VideoSearchQuery, VideoStatistics};

/// Source of real-time stock quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "FINNHUB".
    fn id(&self) -> &'static str;

    /// Whether credentials are present. Used by the health endpoint.
    fn is_configured(&self) -> bool {
        true
    }

    /// Fetch the latest quote for a ticker.
    ///
    /// Returns [`MarketDataError::SymbolNotFound`] when the provider has no
    /// price for the symbol.
    async fn get_quote(&self, symbol: &str) -> Result<StockQuote, MarketDataError>;
}

/// Source of video search results and per-video statistics.
#[async_trait]
pub trait VideoSearchProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "YOUTUBE".
    fn id(&self) -> &'static str;

    /// Whether credentials are present. Used by the health endpoint.
    fn is_configured(&self) -> bool {
        true
    }

    /// Search for videos, ordered by provider relevance.
    async fn search_videos(
        &self,
        query: &VideoSearchQuery,
    ) -> Result<Vec<VideoSearchItem>, MarketDataError>;

    /// Fetch statistics for a batch of video IDs in a single call.
    ///
    /// IDs the provider does not know are absent from the returned map.
    async fn video_statistics(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, VideoStatistics>, MarketDataError>;
}
