//! In-memory repositories and providers shared by the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use miltontv_providers::{
    MarketDataError, VideoSearchItem, VideoSearchProvider, VideoSearchQuery, VideoStatistics,
};

use crate::channels::{Channel, ChannelRepositoryTrait, NewChannel};
use crate::errors::{Error, Result};
use crate::videos::{TrustTier, Video, VideoFilter, VideoRepositoryTrait, VideoSort};

// =========================================================================
// Channels
// =========================================================================

#[derive(Clone, Default)]
pub struct MockChannelRepository {
    pub channels: Arc<Mutex<Vec<Channel>>>,
    pub insert_calls: Arc<AtomicUsize>,
}

impl MockChannelRepository {
    /// Repository holding AAPL, MSFT and TSLA.
    pub fn seeded() -> Self {
        let repo = Self::default();
        {
            let mut channels = repo.channels.lock().unwrap();
            for (i, (ticker, name)) in [
                ("AAPL", "Apple Inc."),
                ("MSFT", "Microsoft Corporation"),
                ("TSLA", "Tesla Inc."),
            ]
            .into_iter()
            .enumerate()
            {
                channels.push(Channel {
                    ticker: ticker.to_string(),
                    company_name: name.to_string(),
                    channel_number: i as i32 + 1,
                    created_at: Utc::now().naive_utc(),
                });
            }
        }
        repo
    }
}

#[async_trait]
impl ChannelRepositoryTrait for MockChannelRepository {
    fn list_channels(&self) -> Result<Vec<Channel>> {
        let mut channels = self.channels.lock().unwrap().clone();
        channels.sort_by_key(|c| c.channel_number);
        Ok(channels)
    }

    fn get_channel(&self, ticker: &str) -> Result<Option<Channel>> {
        Ok(self
            .channels
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.ticker == ticker)
            .cloned())
    }

    fn count_channels(&self) -> Result<i64> {
        Ok(self.channels.lock().unwrap().len() as i64)
    }

    async fn insert_channels(&self, new_channels: Vec<NewChannel>) -> Result<usize> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut channels = self.channels.lock().unwrap();
        let count = new_channels.len();
        channels.extend(new_channels.into_iter().map(|c| Channel {
            ticker: c.ticker,
            company_name: c.company_name,
            channel_number: c.channel_number,
            created_at: Utc::now().naive_utc(),
        }));
        Ok(count)
    }
}

// =========================================================================
// Videos
// =========================================================================

#[derive(Clone, Default)]
pub struct MockVideoRepository {
    pub videos: Arc<Mutex<Vec<Video>>>,
    pub upsert_calls: Arc<AtomicUsize>,
    pub fail_deletes_for: Arc<Mutex<Vec<String>>>,
}

impl MockVideoRepository {
    pub fn with_videos(videos: Vec<Video>) -> Self {
        let repo = Self::default();
        *repo.videos.lock().unwrap() = videos;
        repo
    }

    pub fn all(&self) -> Vec<Video> {
        self.videos.lock().unwrap().clone()
    }

    fn matching(&self, filter: &VideoFilter) -> Vec<Video> {
        let text = filter.text.as_ref().map(|t| t.to_lowercase());
        self.videos
            .lock()
            .unwrap()
            .iter()
            .filter(|v| filter.ticker.as_ref().map_or(true, |t| &v.ticker == t))
            .filter(|v| filter.cached_since.map_or(true, |since| v.cached_at >= since))
            .filter(|v| filter.trust_tier.map_or(true, |tier| v.trust_tier == tier))
            .filter(|v| {
                text.as_ref().map_or(true, |t| {
                    v.title.to_lowercase().contains(t) || v.description.to_lowercase().contains(t)
                })
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl VideoRepositoryTrait for MockVideoRepository {
    async fn upsert_videos(&self, new_videos: Vec<Video>) -> Result<usize> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        let mut videos = self.videos.lock().unwrap();
        let count = new_videos.len();
        for video in new_videos {
            videos.retain(|v| !(v.video_id == video.video_id && v.ticker == video.ticker));
            videos.push(video);
        }
        Ok(count)
    }

    fn find_videos(
        &self,
        filter: &VideoFilter,
        sort: VideoSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Video>> {
        let mut videos = self.matching(filter);
        videos.sort_by(|a, b| {
            let primary = match sort {
                VideoSort::Quality => b.quality_score.total_cmp(&a.quality_score),
                VideoSort::Date => b.published_at.cmp(&a.published_at),
                VideoSort::Views => b.view_count.cmp(&a.view_count),
            };
            primary.then_with(|| a.video_id.cmp(&b.video_id))
        });
        Ok(videos
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    fn count_videos(&self, filter: &VideoFilter) -> Result<i64> {
        Ok(self.matching(filter).len() as i64)
    }

    fn count_by_trust_tier(&self) -> Result<Vec<(TrustTier, i64)>> {
        let mut counts: HashMap<TrustTier, i64> = HashMap::new();
        for video in self.videos.lock().unwrap().iter() {
            *counts.entry(video.trust_tier).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn delete_videos_cached_before(
        &self,
        ticker: &str,
        cached_before: NaiveDateTime,
    ) -> Result<usize> {
        if self.fail_deletes_for.lock().unwrap().iter().any(|t| t == ticker) {
            return Err(Error::Unexpected(format!("delete failed for {}", ticker)));
        }
        let mut videos = self.videos.lock().unwrap();
        let before = videos.len();
        videos.retain(|v| !(v.ticker == ticker && v.cached_at < cached_before));
        Ok(before - videos.len())
    }
}

/// Builds a stored video.
pub fn video(
    video_id: &str,
    ticker: &str,
    tier: TrustTier,
    view_count: i64,
    quality_score: f64,
    cached_at: NaiveDateTime,
) -> Video {
    Video {
        video_id: video_id.to_string(),
        ticker: ticker.to_string(),
        title: format!("{} video {}", ticker, video_id),
        description: String::new(),
        thumbnail_url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id),
        source: "YouTube".to_string(),
        trust_tier: tier,
        view_count,
        like_count: 0,
        comment_count: 0,
        quality_score,
        published_at: None,
        channel_title: "Some Channel".to_string(),
        cached_at,
    }
}

// =========================================================================
// Video search provider
// =========================================================================

#[derive(Default)]
pub struct MockVideoProvider {
    pub items: Mutex<Vec<VideoSearchItem>>,
    pub statistics: Mutex<HashMap<String, VideoStatistics>>,
    pub queries: Mutex<Vec<VideoSearchQuery>>,
    pub search_calls: AtomicUsize,
    pub statistics_calls: AtomicUsize,
    pub fail_search: Mutex<Option<MarketDataError>>,
    pub fail_statistics: Mutex<Option<MarketDataError>>,
}

impl MockVideoProvider {
    /// Provider returning one candidate per `(video_id, channel_title, views)`,
    /// each with statistics.
    pub fn with_candidates(candidates: &[(&str, &str, u64)]) -> Self {
        let provider = Self::default();
        {
            let mut items = provider.items.lock().unwrap();
            let mut stats = provider.statistics.lock().unwrap();
            for (id, channel, views) in candidates {
                items.push(search_item(id, channel));
                stats.insert(
                    id.to_string(),
                    VideoStatistics {
                        view_count: *views,
                        like_count: 0,
                        comment_count: 0,
                        published_at: None,
                    },
                );
            }
        }
        provider
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn statistics_calls(&self) -> usize {
        self.statistics_calls.load(Ordering::SeqCst)
    }
}

pub fn search_item(video_id: &str, channel_title: &str) -> VideoSearchItem {
    VideoSearchItem {
        video_id: video_id.to_string(),
        title: format!("Video {}", video_id),
        description: "Stock analysis".to_string(),
        thumbnail_url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id),
        published_at: None,
        channel_title: channel_title.to_string(),
    }
}

#[async_trait]
impl VideoSearchProvider for MockVideoProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn search_videos(
        &self,
        query: &VideoSearchQuery,
    ) -> std::result::Result<Vec<VideoSearchItem>, MarketDataError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        if let Some(err) = self.fail_search.lock().unwrap().take() {
            return Err(err);
        }
        let items = self.items.lock().unwrap();
        Ok(items.iter().take(query.max_results as usize).cloned().collect())
    }

    async fn video_statistics(
        &self,
        video_ids: &[String],
    ) -> std::result::Result<HashMap<String, VideoStatistics>, MarketDataError> {
        self.statistics_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_statistics.lock().unwrap().take() {
            return Err(err);
        }
        let stats = self.statistics.lock().unwrap();
        Ok(video_ids
            .iter()
            .filter_map(|id| stats.get(id).map(|s| (id.clone(), s.clone())))
            .collect())
    }
}
