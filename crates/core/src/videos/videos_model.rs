//! Video domain models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_PAGE_SIZE;
use crate::errors::{Result, ValidationError};

/// Credibility class of the channel that published a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrustTier {
    #[serde(rename = "Official Company")]
    OfficialCompany,
    #[serde(rename = "Professional News")]
    ProfessionalNews,
    #[serde(rename = "Vetted Expert")]
    VettedExpert,
    #[serde(rename = "Community")]
    Community,
}

impl TrustTier {
    /// All tiers in priority order.
    pub const ALL: [TrustTier; 4] = [
        TrustTier::OfficialCompany,
        TrustTier::ProfessionalNews,
        TrustTier::VettedExpert,
        TrustTier::Community,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustTier::OfficialCompany => "Official Company",
            TrustTier::ProfessionalNews => "Professional News",
            TrustTier::VettedExpert => "Vetted Expert",
            TrustTier::Community => "Community",
        }
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrustTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        TrustTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidInput(format!("Unknown trust tier '{}'", s)))
    }
}

/// A cached video attached to one ticker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub video_id: String,
    pub ticker: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub source: String,
    pub trust_tier: TrustTier,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    /// Always within [0, 1]
    pub quality_score: f64,
    /// RFC 3339 publish time as reported by the provider
    pub published_at: Option<String>,
    pub channel_title: String,
    pub cached_at: NaiveDateTime,
}

/// Ordering applied to video listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoSort {
    /// Quality score, highest first
    #[default]
    Quality,
    /// Publish time, newest first
    Date,
    /// View count, highest first
    Views,
}

impl FromStr for VideoSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quality" => Ok(VideoSort::Quality),
            "date" => Ok(VideoSort::Date),
            "views" => Ok(VideoSort::Views),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown sort '{}', expected quality, date or views",
                other
            ))),
        }
    }
}

/// Parameters of a per-ticker listing.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoListRequest {
    pub ticker: String,
    pub page: u32,
    pub page_size: u32,
    pub trust_tier: Option<TrustTier>,
    pub sort: VideoSort,
}

/// Parameters of a cross-ticker text search.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSearchRequest {
    pub query: String,
    pub trust_tier: Option<TrustTier>,
    pub page: u32,
    pub page_size: u32,
}

/// Store-level selection. Every `None` field matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoFilter {
    pub ticker: Option<String>,
    /// Only videos with `cached_at >= cached_since`
    pub cached_since: Option<NaiveDateTime>,
    pub trust_tier: Option<TrustTier>,
    /// Case-insensitive substring of title or description
    pub text: Option<String>,
}

impl VideoFilter {
    pub fn for_ticker(ticker: impl Into<String>) -> Self {
        Self {
            ticker: Some(ticker.into()),
            ..Self::default()
        }
    }

    pub fn cached_since(mut self, since: NaiveDateTime) -> Self {
        self.cached_since = Some(since);
        self
    }

    pub fn with_trust_tier(mut self, tier: Option<TrustTier>) -> Self {
        self.trust_tier = tier;
        self
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: i64,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total: i64, page: u32, page_size: u32) -> Self {
        Self {
            items,
            total,
            page,
            page_size,
            total_pages: total_pages(total, page_size),
        }
    }
}

/// `ceil(total / page_size)`, zero for an empty result.
pub(crate) fn total_pages(total: i64, page_size: u32) -> i64 {
    if total <= 0 || page_size == 0 {
        return 0;
    }
    let size = i64::from(page_size);
    (total + size - 1) / size
}

/// Validates 1-based paging and returns the row offset of the page.
pub(crate) fn page_offset(page: u32, page_size: u32) -> Result<i64> {
    if page < 1 {
        return Err(ValidationError::OutOfRange {
            field: "page",
            min: 1,
            max: i64::from(u32::MAX),
            value: i64::from(page),
        }
        .into());
    }
    if page_size < 1 || page_size > MAX_PAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "pageSize",
            min: 1,
            max: i64::from(MAX_PAGE_SIZE),
            value: i64::from(page_size),
        }
        .into());
    }
    Ok((i64::from(page) - 1) * i64::from(page_size))
}

/// Store-wide counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoStats {
    pub total_channels: i64,
    pub total_videos: i64,
    /// Videos cached within the freshness window
    pub fresh_videos: i64,
    /// Video count per trust tier label
    pub by_trust_tier: BTreeMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trust_tier_serializes_to_display_label() {
        let json = serde_json::to_string(&TrustTier::ProfessionalNews).unwrap();
        assert_eq!(json, "\"Professional News\"");
        let back: TrustTier = serde_json::from_str("\"Vetted Expert\"").unwrap();
        assert_eq!(back, TrustTier::VettedExpert);
    }

    #[test]
    fn trust_tier_parses_case_insensitively() {
        assert_eq!("official company".parse::<TrustTier>().unwrap(), TrustTier::OfficialCompany);
        assert_eq!(" Community ".parse::<TrustTier>().unwrap(), TrustTier::Community);
        assert!("Influencer".parse::<TrustTier>().is_err());
    }

    #[test]
    fn sort_parsing() {
        assert_eq!("views".parse::<VideoSort>().unwrap(), VideoSort::Views);
        assert_eq!("DATE".parse::<VideoSort>().unwrap(), VideoSort::Date);
        assert!("random".parse::<VideoSort>().is_err());
        assert_eq!(VideoSort::default(), VideoSort::Quality);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(3, 50), 1);
    }

    #[test]
    fn page_offset_bounds() {
        assert_eq!(page_offset(1, 10).unwrap(), 0);
        assert_eq!(page_offset(3, 20).unwrap(), 40);
        assert!(page_offset(0, 10).is_err());
        assert!(page_offset(1, 0).is_err());
        assert!(page_offset(1, 51).is_err());
    }

    #[test]
    fn video_serializes_camel_case() {
        let video = Video {
            video_id: "abc".to_string(),
            ticker: "AAPL".to_string(),
            title: "t".to_string(),
            description: String::new(),
            thumbnail_url: String::new(),
            source: "YouTube".to_string(),
            trust_tier: TrustTier::Community,
            view_count: 1,
            like_count: 0,
            comment_count: 0,
            quality_score: 0.2,
            published_at: None,
            channel_title: "c".to_string(),
            cached_at: chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        };
        let value = serde_json::to_value(&video).unwrap();
        assert_eq!(value["videoId"], "abc");
        assert_eq!(value["trustTier"], "Community");
        assert_eq!(value["qualityScore"], 0.2);
        assert!(value["publishedAt"].is_null());
    }
}
