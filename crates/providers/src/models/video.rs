use serde::{Deserialize, Serialize};

/// Parameters for a video search request.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoSearchQuery {
    /// Free-text search query
    pub query: String,

    /// Maximum number of results to return
    pub max_results: u32,

    /// Relevance language hint (ISO 639-1), e.g. "en"
    pub relevance_language: Option<String>,
}

impl VideoSearchQuery {
    pub fn new(query: impl Into<String>, max_results: u32) -> Self {
        Self {
            query: query.into(),
            max_results,
            relevance_language: Some("en".to_string()),
        }
    }
}

/// A single candidate returned by a video search, in provider relevance order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchItem {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    /// RFC 3339 publish timestamp as reported by the provider
    pub published_at: Option<String>,
    pub channel_title: String,
}

/// Per-video statistics returned by the batched statistics call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub published_at: Option<String>,
}
