//! Provider abstractions and implementations.
//!
//! This module contains:
//! - The [`QuoteProvider`] and [`VideoSearchProvider`] traits
//! - Concrete implementations for Finnhub and the YouTube Data API
//!
//! Services in the core crate hold providers as `Arc<dyn ...>` so the
//! concrete client is chosen once at startup.

mod traits;

pub mod finnhub;
pub mod youtube;

pub use traits::{QuoteProvider, VideoSearchProvider};
