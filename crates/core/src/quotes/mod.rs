//! Quote module - real-time quotes behind a small time-bounded cache.
//!
//! ```text
//! QuoteService → QuoteCache (hit, < 30s) ─┐
//!      │                                  ├→ Quote
//!      └→ QuoteProvider (miss) → insert ──┘
//! ```

mod quote_cache;
mod quotes_model;
mod quotes_service;
mod quotes_traits;


pub use quote_cache::QuoteCache;
pub use quotes_model::Quote;
pub use quotes_service::QuoteService;
pub use quotes_traits::QuoteServiceTrait;
