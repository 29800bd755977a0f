//! Freshness and ranking constants.

/// Videos cached within this window are served without re-fetching.
pub const VIDEO_FRESHNESS_WINDOW_SECS: i64 = 60 * 60;

/// Fewer fresh videos than this triggers a synchronous re-fetch.
pub const MIN_FRESH_VIDEOS: i64 = 5;

/// Number of candidates requested when a listing or refresh re-fetches.
pub const REFETCH_MAX_RESULTS: u32 = 20;

/// Background refresh evicts videos cached longer ago than this.
pub const VIDEO_EVICTION_AGE_SECS: i64 = 24 * 60 * 60;

/// Default interval between background refresh cycles.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 6 * 60 * 60;

/// Default pause between tickers during a refresh cycle.
pub const DEFAULT_REFRESH_TICKER_DELAY_MS: u64 = 2_000;

/// Largest page size accepted by listing and search.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Page size used when the caller does not provide one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Quotes younger than this are served from the cache.
pub const QUOTE_CACHE_TTL_SECS: u64 = 30;

/// Maximum number of distinct tickers held by the quote cache.
pub const QUOTE_CACHE_CAPACITY: usize = 100;

/// Source label stored on videos fetched from the search provider.
pub const VIDEO_SOURCE_YOUTUBE: &str = "YouTube";
