//! MiltonTV Providers Crate
//!
//! Clients for the two third-party web APIs the backend depends on:
//!
//! - [`FinnhubProvider`] - real-time stock quotes ([`QuoteProvider`])
//! - [`YouTubeProvider`] - video search and per-video statistics ([`VideoSearchProvider`])
//!
//! # Architecture
//!
//! ```text
//! +------------------+        +---------------------+
//! |  core services   | -----> |  provider traits    |
//! +------------------+        +---------------------+
//!                               |                 |
//!                               v                 v
//!                      +----------------+  +----------------+
//!                      |    Finnhub     |  |    YouTube     |
//!                      +----------------+  +----------------+
//! ```
//!
//! The core crate only depends on the traits, so services can be tested
//! against in-memory fakes.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{StockQuote, VideoSearchItem, VideoSearchQuery, VideoStatistics};
pub use provider::finnhub::FinnhubProvider;
pub use provider::youtube::YouTubeProvider;
pub use provider::{QuoteProvider, VideoSearchProvider};
