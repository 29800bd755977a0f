//! Provider data models
//!
//! - `quote` - Real-time stock quote ([`StockQuote`])
//! - `video` - Video search parameters and results ([`VideoSearchQuery`], [`VideoSearchItem`], [`VideoStatistics`])

mod quote;
mod video;

pub use quote::StockQuote;
pub use video::{VideoSearchItem, VideoSearchQuery, VideoStatistics};
