use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::videos_model::{
    PagedResult, TrustTier, Video, VideoFilter, VideoListRequest, VideoSearchRequest, VideoSort,
    VideoStats,
};
use crate::errors::Result;

/// Trait for video repository operations
#[async_trait]
pub trait VideoRepositoryTrait: Send + Sync {
    /// Inserts or overwrites videos keyed by `(video_id, ticker)` in one
    /// transaction. Returns the number of rows written.
    async fn upsert_videos(&self, videos: Vec<Video>) -> Result<usize>;

    /// Videos matching `filter`, ordered by `sort` with ties on `video_id`.
    fn find_videos(
        &self,
        filter: &VideoFilter,
        sort: VideoSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Video>>;

    fn count_videos(&self, filter: &VideoFilter) -> Result<i64>;

    /// Number of stored videos per trust tier. Tiers without videos are omitted.
    fn count_by_trust_tier(&self) -> Result<Vec<(TrustTier, i64)>>;

    /// Deletes videos of `ticker` cached strictly before `cached_before`.
    async fn delete_videos_cached_before(
        &self,
        ticker: &str,
        cached_before: NaiveDateTime,
    ) -> Result<usize>;
}

/// Trait for pulling videos from the search provider into the store
#[async_trait]
pub trait VideoFetcherTrait: Send + Sync {
    async fn fetch_and_cache(&self, ticker: &str, max_results: u32) -> Result<Vec<Video>>;
}

/// Trait for video service operations
#[async_trait]
pub trait VideoServiceTrait: Send + Sync {
    /// Fresh videos of a ticker, re-fetching first when too few are cached.
    async fn list_videos(&self, request: VideoListRequest) -> Result<PagedResult<Video>>;

    /// Text search over every cached video, best quality first.
    fn search_videos(&self, request: VideoSearchRequest) -> Result<PagedResult<Video>>;

    fn get_stats(&self) -> Result<VideoStats>;

    /// Forces a provider fetch for a ticker.
    async fn refresh_videos(&self, ticker: &str, max_results: u32) -> Result<Vec<Video>>;
}
