//! YouTube Data API v3 video search provider.
//!
//! Two endpoints are used:
//! - `search` (part=snippet, type=video, order=relevance) for candidates
//! - `videos` (part=statistics,snippet) for a batched statistics lookup
//!
//! A search costs 100 quota units and a videos lookup 1 unit, so callers
//! should batch statistics requests and avoid tight refresh loops.
//! API documentation: https://developers.google.com/youtube/v3/docs

mod models;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{VideoSearchItem, VideoSearchQuery, VideoStatistics};
use crate::provider::VideoSearchProvider;

use models::{ErrorEnvelope, SearchListResponse, VideoListResponse};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const PROVIDER_ID: &str = "YOUTUBE";

/// Upper bound the API accepts for `maxResults` and for ids per `videos` call.
pub const MAX_RESULTS_PER_PAGE: u32 = 50;

/// YouTube Data API provider.
pub struct YouTubeProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeProvider {
    /// Create a new YouTube provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    /// Create a provider pointing at a different API root (used by tests and proxies).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Make a GET request to the API and return the body text.
    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String, MarketDataError> {
        if self.api_key.is_empty() {
            return Err(MarketDataError::NotConfigured {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("YouTube request: {} with {} params", endpoint, params.len());

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::provider(PROVIDER_ID, format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &body));
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to read response: {}", e)))
    }
}

/// Maps a non-success response to an error, recognising quota rejections.
fn classify_error(status: reqwest::StatusCode, body: &str) -> MarketDataError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if envelope.error.is_quota_error() => {
            warn!("YouTube quota exhausted: {}", envelope.error.message);
            MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            }
        }
        Ok(envelope) => MarketDataError::provider(
            PROVIDER_ID,
            format!("HTTP {} - {}", status, envelope.error.message),
        ),
        Err(_) => MarketDataError::provider(PROVIDER_ID, format!("HTTP {} - {}", status, body)),
    }
}

fn parse_search_response(text: &str) -> Result<Vec<VideoSearchItem>, MarketDataError> {
    let response: SearchListResponse = serde_json::from_str(text).map_err(|e| {
        MarketDataError::provider(PROVIDER_ID, format!("Failed to parse search response: {}", e))
    })?;

    Ok(response
        .items
        .into_iter()
        .filter_map(|item| {
            // Channel and playlist results have no videoId
            let video_id = item.id.video_id?;
            let snippet = item.snippet.unwrap_or_default();
            let thumbnail_url = snippet
                .thumbnails
                .as_ref()
                .and_then(|t| t.best_url())
                .unwrap_or_default()
                .to_string();
            Some(VideoSearchItem {
                video_id,
                title: snippet.title,
                description: snippet.description,
                thumbnail_url,
                published_at: snippet.published_at,
                channel_title: snippet.channel_title,
            })
        })
        .collect())
}

fn parse_count(value: Option<&String>) -> u64 {
    value.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0)
}

fn parse_statistics_response(
    text: &str,
) -> Result<HashMap<String, VideoStatistics>, MarketDataError> {
    let response: VideoListResponse = serde_json::from_str(text).map_err(|e| {
        MarketDataError::provider(PROVIDER_ID, format!("Failed to parse videos response: {}", e))
    })?;

    Ok(response
        .items
        .into_iter()
        .map(|video| {
            let stats = video.statistics.unwrap_or_default();
            let statistics = VideoStatistics {
                view_count: parse_count(stats.view_count.as_ref()),
                like_count: parse_count(stats.like_count.as_ref()),
                comment_count: parse_count(stats.comment_count.as_ref()),
                published_at: video.snippet.and_then(|s| s.published_at),
            };
            (video.id, statistics)
        })
        .collect())
}

#[async_trait]
impl VideoSearchProvider for YouTubeProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn search_videos(
        &self,
        query: &VideoSearchQuery,
    ) -> Result<Vec<VideoSearchItem>, MarketDataError> {
        let max_results = query.max_results.clamp(1, MAX_RESULTS_PER_PAGE);
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("q", query.query.clone()),
            ("maxResults", max_results.to_string()),
            ("type", "video".to_string()),
            ("order", "relevance".to_string()),
        ];
        if let Some(lang) = &query.relevance_language {
            params.push(("relevanceLanguage", lang.clone()));
        }

        let text = self.fetch("search", &params).await?;
        parse_search_response(&text)
    }

    async fn video_statistics(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, VideoStatistics>, MarketDataError> {
        if video_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut statistics = HashMap::with_capacity(video_ids.len());
        for chunk in video_ids.chunks(MAX_RESULTS_PER_PAGE as usize) {
            let params = [
                ("part", "statistics,snippet".to_string()),
                ("id", chunk.join(",")),
                ("maxResults", chunk.len().to_string()),
            ];
            let text = self.fetch("videos", &params).await?;
            statistics.extend(parse_statistics_response(&text)?);
        }
        Ok(statistics)
    }
}
