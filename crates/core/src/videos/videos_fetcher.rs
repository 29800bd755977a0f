use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use miltontv_providers::{VideoSearchItem, VideoSearchProvider, VideoSearchQuery, VideoStatistics};
use std::collections::HashSet;
use std::sync::Arc;

use super::scoring::{classify_trust_tier, compute_quality_score};
use super::videos_model::Video;
use super::videos_traits::{VideoFetcherTrait, VideoRepositoryTrait};
use crate::channels::ChannelServiceTrait;
use crate::constants::VIDEO_SOURCE_YOUTUBE;
use crate::errors::Result;

/// Search phrase sent to the provider for a channel.
pub fn build_search_query(company_name: &str, ticker: &str) -> String {
    format!("{} {} stock analysis news", company_name, ticker)
}

/// Fetches candidate videos for a ticker, scores them and upserts them.
pub struct VideoFetcher {
    channel_service: Arc<dyn ChannelServiceTrait>,
    provider: Arc<dyn VideoSearchProvider>,
    repository: Arc<dyn VideoRepositoryTrait>,
}

impl VideoFetcher {
    pub fn new(
        channel_service: Arc<dyn ChannelServiceTrait>,
        provider: Arc<dyn VideoSearchProvider>,
        repository: Arc<dyn VideoRepositoryTrait>,
    ) -> Self {
        Self {
            channel_service,
            provider,
            repository,
        }
    }

    fn to_video(
        ticker: &str,
        item: VideoSearchItem,
        stats: Option<&VideoStatistics>,
        now: chrono::DateTime<Utc>,
    ) -> Video {
        // Statistics publish time is authoritative; the snippet one is a fallback
        let published_at = stats
            .and_then(|s| s.published_at.clone())
            .or(item.published_at);

        let (view_count, like_count, comment_count, quality_score) = match stats {
            Some(s) => (
                s.view_count,
                s.like_count,
                s.comment_count,
                compute_quality_score(
                    s.view_count,
                    s.like_count,
                    s.comment_count,
                    published_at.as_deref(),
                    now,
                ),
            ),
            None => {
                debug!("No statistics for video {}, scoring 0.0", item.video_id);
                (0, 0, 0, 0.0)
            }
        };

        Video {
            trust_tier: classify_trust_tier(&item.channel_title),
            video_id: item.video_id,
            ticker: ticker.to_string(),
            title: item.title,
            description: item.description,
            thumbnail_url: item.thumbnail_url,
            source: VIDEO_SOURCE_YOUTUBE.to_string(),
            view_count: clamp_count(view_count),
            like_count: clamp_count(like_count),
            comment_count: clamp_count(comment_count),
            quality_score,
            published_at,
            channel_title: item.channel_title,
            cached_at: now.naive_utc(),
        }
    }
}

fn clamp_count(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

#[async_trait]
impl VideoFetcherTrait for VideoFetcher {
    async fn fetch_and_cache(&self, ticker: &str, max_results: u32) -> Result<Vec<Video>> {
        let channel = self.channel_service.get_channel(ticker)?;
        let query = VideoSearchQuery::new(
            build_search_query(&channel.company_name, &channel.ticker),
            max_results,
        );

        let mut candidates = self.provider.search_videos(&query).await.map_err(|e| {
            warn!("Video search failed for {}: {}", channel.ticker, e);
            e
        })?;
        let mut seen = HashSet::new();
        candidates.retain(|c| seen.insert(c.video_id.clone()));
        if candidates.is_empty() {
            info!("Video search returned no candidates for {}", channel.ticker);
            return Ok(Vec::new());
        }

        let ids: Vec<String> = candidates.iter().map(|c| c.video_id.clone()).collect();
        // A failed statistics batch discards the whole fetch
        let statistics = self.provider.video_statistics(&ids).await.map_err(|e| {
            warn!("Video statistics failed for {}: {}", channel.ticker, e);
            e
        })?;

        let now = Utc::now();
        let videos: Vec<Video> = candidates
            .into_iter()
            .map(|item| {
                let stats = statistics.get(&item.video_id);
                Self::to_video(&channel.ticker, item, stats, now)
            })
            .collect();

        let written = self.repository.upsert_videos(videos.clone()).await?;
        info!("Cached {} videos for {}", written, channel.ticker);
        Ok(videos)
    }
}
