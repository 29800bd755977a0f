//! Videos module - cached provider videos with freshness gating and ranking.
//!
//! ```text
//! VideoService::list_videos
//!      │  fresh (unfiltered) < MIN_FRESH_VIDEOS ?
//!      ├── yes → VideoFetcher::fetch_and_cache → re-query
//!      └── no  → filter → sort → paginate
//!
//! VideoRefresher (periodic) → evict stale → fetch_and_cache per ticker
//! ```

mod refresher;
mod scoring;
mod videos_fetcher;
mod videos_model;
mod videos_service;
mod videos_traits;

#[cfg(test)]
mod videos_service_tests;

pub use refresher::{RefreshSummary, RefresherConfig, VideoRefresher};
pub use scoring::{classify_trust_tier, compute_quality_score, recency_score};
pub use videos_fetcher::{build_search_query, VideoFetcher};
pub use videos_model::{
    PagedResult, TrustTier, Video, VideoFilter, VideoListRequest, VideoSearchRequest, VideoSort,
    VideoStats,
};
pub use videos_service::VideoService;
pub use videos_traits::{VideoFetcherTrait, VideoRepositoryTrait, VideoServiceTrait};
