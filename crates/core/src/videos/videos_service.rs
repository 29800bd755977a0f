use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use log::{debug, info};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::videos_model::{
    page_offset, PagedResult, TrustTier, Video, VideoFilter, VideoListRequest, VideoSearchRequest,
    VideoSort, VideoStats,
};
use super::videos_traits::{VideoFetcherTrait, VideoRepositoryTrait, VideoServiceTrait};
use crate::channels::ChannelServiceTrait;
use crate::constants::{
    MAX_PAGE_SIZE, MIN_FRESH_VIDEOS, REFETCH_MAX_RESULTS, VIDEO_FRESHNESS_WINDOW_SECS,
};
use crate::errors::{Result, ValidationError};

/// Service for listing, searching and refreshing cached videos
pub struct VideoService {
    channel_service: Arc<dyn ChannelServiceTrait>,
    repository: Arc<dyn VideoRepositoryTrait>,
    fetcher: Arc<dyn VideoFetcherTrait>,
}

impl VideoService {
    pub fn new(
        channel_service: Arc<dyn ChannelServiceTrait>,
        repository: Arc<dyn VideoRepositoryTrait>,
        fetcher: Arc<dyn VideoFetcherTrait>,
    ) -> Self {
        Self {
            channel_service,
            repository,
            fetcher,
        }
    }

    fn freshness_cutoff() -> NaiveDateTime {
        (Utc::now() - Duration::seconds(VIDEO_FRESHNESS_WINDOW_SECS)).naive_utc()
    }

    fn page(
        &self,
        filter: &VideoFilter,
        sort: VideoSort,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResult<Video>> {
        let offset = page_offset(page, page_size)?;
        let total = self.repository.count_videos(filter)?;
        let items = if offset >= total {
            Vec::new()
        } else {
            self.repository
                .find_videos(filter, sort, offset, i64::from(page_size))?
        };
        Ok(PagedResult::new(items, total, page, page_size))
    }
}

#[async_trait]
impl VideoServiceTrait for VideoService {
    async fn list_videos(&self, request: VideoListRequest) -> Result<PagedResult<Video>> {
        page_offset(request.page, request.page_size)?;
        let channel = self.channel_service.get_channel(&request.ticker)?;

        let fresh = VideoFilter::for_ticker(channel.ticker.clone())
            .cached_since(Self::freshness_cutoff());

        // Coverage is judged on the unfiltered fresh set
        let fresh_count = self.repository.count_videos(&fresh)?;
        if fresh_count < MIN_FRESH_VIDEOS {
            info!(
                "Only {} fresh videos for {}, fetching from provider",
                fresh_count, channel.ticker
            );
            self.fetcher
                .fetch_and_cache(&channel.ticker, REFETCH_MAX_RESULTS)
                .await?;
        } else {
            debug!("{} fresh videos cached for {}", fresh_count, channel.ticker);
        }

        let filter = fresh.with_trust_tier(request.trust_tier);
        self.page(&filter, request.sort, request.page, request.page_size)
    }

    fn search_videos(&self, request: VideoSearchRequest) -> Result<PagedResult<Video>> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(ValidationError::MissingField("q".to_string()).into());
        }

        let filter = VideoFilter {
            text: Some(query.to_string()),
            trust_tier: request.trust_tier,
            ..VideoFilter::default()
        };
        self.page(&filter, VideoSort::Quality, request.page, request.page_size)
    }

    fn get_stats(&self) -> Result<VideoStats> {
        let mut by_trust_tier: BTreeMap<String, i64> = TrustTier::ALL
            .iter()
            .map(|tier| (tier.as_str().to_string(), 0))
            .collect();
        for (tier, count) in self.repository.count_by_trust_tier()? {
            by_trust_tier.insert(tier.as_str().to_string(), count);
        }

        Ok(VideoStats {
            total_channels: self.channel_service.count_channels()?,
            total_videos: self.repository.count_videos(&VideoFilter::default())?,
            fresh_videos: self.repository.count_videos(&VideoFilter {
                cached_since: Some(Self::freshness_cutoff()),
                ..VideoFilter::default()
            })?,
            by_trust_tier,
        })
    }

    async fn refresh_videos(&self, ticker: &str, max_results: u32) -> Result<Vec<Video>> {
        if max_results < 1 || max_results > MAX_PAGE_SIZE {
            return Err(ValidationError::OutOfRange {
                field: "maxResults",
                min: 1,
                max: i64::from(MAX_PAGE_SIZE),
                value: i64::from(max_results),
            }
            .into());
        }
        self.fetcher.fetch_and_cache(ticker, max_results).await
    }
}
