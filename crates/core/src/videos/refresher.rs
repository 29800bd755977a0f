//! Periodic eviction and re-fetch of every channel's videos.

use chrono::Utc;
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::videos_traits::{VideoFetcherTrait, VideoRepositoryTrait};
use crate::channels::ChannelServiceTrait;
use crate::constants::{DEFAULT_REFRESH_TICKER_DELAY_MS, REFETCH_MAX_RESULTS, VIDEO_EVICTION_AGE_SECS};
use crate::errors::Result;

/// Tunables of a refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefresherConfig {
    /// Videos cached longer ago than this are deleted before re-fetching
    pub eviction_age: Duration,
    /// Pause between two tickers
    pub ticker_delay: Duration,
    pub max_results: u32,
}

impl Default for RefresherConfig {
    fn default() -> Self {
        Self {
            eviction_age: Duration::from_secs(VIDEO_EVICTION_AGE_SECS as u64),
            ticker_delay: Duration::from_millis(DEFAULT_REFRESH_TICKER_DELAY_MS),
            max_results: REFETCH_MAX_RESULTS,
        }
    }
}

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub tickers_refreshed: usize,
    pub tickers_failed: usize,
    pub videos_evicted: usize,
    pub videos_upserted: usize,
}

pub struct VideoRefresher {
    channel_service: Arc<dyn ChannelServiceTrait>,
    repository: Arc<dyn VideoRepositoryTrait>,
    fetcher: Arc<dyn VideoFetcherTrait>,
    config: RefresherConfig,
}

impl VideoRefresher {
    pub fn new(
        channel_service: Arc<dyn ChannelServiceTrait>,
        repository: Arc<dyn VideoRepositoryTrait>,
        fetcher: Arc<dyn VideoFetcherTrait>,
        config: RefresherConfig,
    ) -> Self {
        Self {
            channel_service,
            repository,
            fetcher,
            config,
        }
    }

    pub fn config(&self) -> &RefresherConfig {
        &self.config
    }

    /// Evicts and re-fetches every registered ticker once.
    ///
    /// Only a failure to list the registry aborts the cycle; per-ticker
    /// errors are logged and counted.
    pub async fn run_cycle(&self) -> Result<RefreshSummary> {
        let tickers = self.channel_service.get_tickers()?;
        info!("Video refresh cycle starting for {} tickers", tickers.len());

        let eviction_age = chrono::Duration::from_std(self.config.eviction_age)
            .unwrap_or_else(|_| chrono::Duration::seconds(VIDEO_EVICTION_AGE_SECS));
        let mut summary = RefreshSummary::default();

        for (index, ticker) in tickers.iter().enumerate() {
            if index > 0 && !self.config.ticker_delay.is_zero() {
                tokio::time::sleep(self.config.ticker_delay).await;
            }

            let cutoff = Utc::now()
                .naive_utc()
                .checked_sub_signed(eviction_age)
                .unwrap_or(chrono::NaiveDateTime::MIN);
            match self.repository.delete_videos_cached_before(ticker, cutoff).await {
                Ok(evicted) => {
                    if evicted > 0 {
                        debug!("Evicted {} stale videos for {}", evicted, ticker);
                    }
                    summary.videos_evicted += evicted;
                }
                Err(e) => {
                    warn!("Failed to evict stale videos for {}: {}", ticker, e);
                    summary.tickers_failed += 1;
                    continue;
                }
            }

            match self
                .fetcher
                .fetch_and_cache(ticker, self.config.max_results)
                .await
            {
                Ok(videos) => {
                    summary.tickers_refreshed += 1;
                    summary.videos_upserted += videos.len();
                }
                Err(e) => {
                    warn!("Failed to refresh videos for {}: {}", ticker, e);
                    summary.tickers_failed += 1;
                }
            }
        }

        info!(
            "Video refresh cycle finished: {} refreshed, {} failed, {} evicted, {} upserted",
            summary.tickers_refreshed,
            summary.tickers_failed,
            summary.videos_evicted,
            summary.videos_upserted
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::ChannelService;
    use crate::test_support::{video, MockChannelRepository, MockVideoProvider, MockVideoRepository};
    use crate::videos::{TrustTier, VideoFetcher};

    fn refresher(
        provider: Arc<MockVideoProvider>,
        repo: MockVideoRepository,
    ) -> VideoRefresher {
        let channels = Arc::new(ChannelService::new(Arc::new(MockChannelRepository::seeded())));
        let fetcher = Arc::new(VideoFetcher::new(
            channels.clone(),
            provider,
            Arc::new(repo.clone()),
        ));
        VideoRefresher::new(
            channels,
            Arc::new(repo),
            fetcher,
            RefresherConfig {
                ticker_delay: Duration::ZERO,
                ..RefresherConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn evicts_stale_videos_and_refetches_every_ticker() {
        let now = Utc::now().naive_utc();
        let repo = MockVideoRepository::with_videos(vec![
            video("old", "AAPL", TrustTier::Community, 1, 0.1, now - chrono::Duration::hours(25)),
            video("recent", "AAPL", TrustTier::Community, 1, 0.1, now - chrono::Duration::hours(3)),
        ]);
        let provider = Arc::new(MockVideoProvider::with_candidates(&[("y1", "CNBC", 10)]));

        let summary = refresher(provider.clone(), repo.clone()).run_cycle().await.unwrap();

        assert_eq!(
            summary,
            RefreshSummary {
                tickers_refreshed: 3,
                tickers_failed: 0,
                videos_evicted: 1,
                videos_upserted: 3,
            }
        );
        assert_eq!(provider.search_calls(), 3);
        let ids: Vec<String> = repo.all().into_iter().map(|v| v.video_id).collect();
        assert!(!ids.contains(&"old".to_string()));
        assert!(ids.contains(&"recent".to_string()));
    }

    #[tokio::test]
    async fn per_ticker_failures_are_counted_and_skipped() {
        let repo = MockVideoRepository::default();
        repo.fail_deletes_for.lock().unwrap().push("MSFT".to_string());
        let provider = Arc::new(MockVideoProvider::with_candidates(&[("y1", "CNBC", 10)]));
        *provider.fail_search.lock().unwrap() =
            Some(miltontv_providers::MarketDataError::provider("YOUTUBE", "boom"));

        let summary = refresher(provider.clone(), repo).run_cycle().await.unwrap();

        // AAPL search fails, MSFT eviction fails, TSLA succeeds
        assert_eq!(summary.tickers_failed, 2);
        assert_eq!(summary.tickers_refreshed, 1);
        assert_eq!(provider.search_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_between_tickers() {
        let provider = Arc::new(MockVideoProvider::default());
        let channels = Arc::new(ChannelService::new(Arc::new(MockChannelRepository::seeded())));
        let repo = Arc::new(MockVideoRepository::default());
        let fetcher = Arc::new(VideoFetcher::new(channels.clone(), provider, repo.clone()));
        let refresher = VideoRefresher::new(
            channels,
            repo,
            fetcher,
            RefresherConfig {
                ticker_delay: Duration::from_secs(2),
                ..RefresherConfig::default()
            },
        );

        let started = tokio::time::Instant::now();
        refresher.run_cycle().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }
}
