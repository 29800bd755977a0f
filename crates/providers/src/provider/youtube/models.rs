//! YouTube Data API v3 response models.
//!
//! Only the fields the backend reads are modelled. Counts in the
//! `statistics` part are JSON strings and are parsed by the provider.

use serde::Deserialize;

/// Response from the `search` endpoint
#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

/// One `search#result`
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: Option<Snippet>,
}

/// Resource id of a search result. Only video results carry `videoId`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub video_id: Option<String>,
}

/// Snippet shared by search results and video resources
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub published_at: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
    pub thumbnails: Option<Thumbnails>,
}

/// Thumbnail set; `high` is preferred when present
#[derive(Debug, Deserialize, Default)]
pub struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

impl Thumbnails {
    /// Best available thumbnail URL, preferring higher resolutions.
    pub fn best_url(&self) -> Option<&str> {
        self.high
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.as_str())
    }
}

/// Response from the `videos` endpoint
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

/// One `youtube#video` resource
#[derive(Debug, Deserialize)]
pub struct VideoResource {
    pub id: String,
    pub snippet: Option<Snippet>,
    pub statistics: Option<Statistics>,
}

/// Statistics part of a video resource
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

/// Error envelope returned by Google APIs
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub reason: String,
}

impl ApiError {
    /// True when the error is a daily-quota or rate-limit rejection.
    pub fn is_quota_error(&self) -> bool {
        self.errors.iter().any(|e| {
            matches!(
                e.reason.as_str(),
                "quotaExceeded" | "rateLimitExceeded" | "userRateLimitExceeded" | "dailyLimitExceeded"
            )
        })
    }
}
