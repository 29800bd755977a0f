//! Error types for provider operations.

use thiserror::Error;

/// Errors that can occur while talking to a quote or video provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// Finnhub signals this with a zero price rather than an HTTP error.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request or the API quota is exhausted
    /// (HTTP 429, or 403 for quota errors).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider returned an error or a payload we could not parse.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// No API key was configured for the provider.
    #[error("Provider not configured: {provider}")]
    NotConfigured {
        /// The provider missing its credentials
        provider: String,
    },
}

impl MarketDataError {
    /// Builds a [`MarketDataError::ProviderError`] for the given provider.
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Returns true when the upstream signalled that the symbol does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SymbolNotFound(_))
    }
}
