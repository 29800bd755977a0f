use async_trait::async_trait;
use log::debug;
use miltontv_providers::QuoteProvider;
use std::sync::Arc;

use super::quote_cache::QuoteCache;
use super::quotes_model::Quote;
use super::quotes_traits::QuoteServiceTrait;
use crate::channels::normalize_ticker;
use crate::errors::Result;

/// Quote retrieval with a read-through cache.
pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
    cache: QuoteCache,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self::with_cache(provider, QuoteCache::default())
    }

    pub fn with_cache(provider: Arc<dyn QuoteProvider>, cache: QuoteCache) -> Self {
        Self { provider, cache }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn get_quote(&self, ticker: &str) -> Result<Quote> {
        let ticker = normalize_ticker(ticker)?;

        if let Some(quote) = self.cache.get(&ticker) {
            debug!("Quote cache hit for {}", ticker);
            return Ok(quote);
        }

        debug!("Quote cache miss for {}, calling {}", ticker, self.provider.id());
        let mut quote = Quote::from(self.provider.get_quote(&ticker).await?);
        quote.ticker = ticker;
        self.cache.insert(quote.clone());
        Ok(quote)
    }

    fn is_provider_configured(&self) -> bool {
        self.provider.is_configured()
    }
}
