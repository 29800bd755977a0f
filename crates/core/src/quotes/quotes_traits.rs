use crate::errors::Result;
use crate::quotes::quotes_model::Quote;
use async_trait::async_trait;

/// Trait for quote service operations
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Returns the cached quote when it is younger than the cache TTL,
    /// otherwise fetches it from the provider and caches it.
    async fn get_quote(&self, ticker: &str) -> Result<Quote>;

    /// Whether the underlying provider has credentials.
    fn is_provider_configured(&self) -> bool;
}
