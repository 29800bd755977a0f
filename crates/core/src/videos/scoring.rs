//! Quality scoring and trust classification of fetched videos.

use chrono::{DateTime, Utc};

use super::videos_model::TrustTier;

const VIEW_SATURATION: f64 = 100_000.0;
const VIEW_WEIGHT: f64 = 0.5;
const ENGAGEMENT_SATURATION: f64 = 10_000.0;
const ENGAGEMENT_WEIGHT: f64 = 0.3;
const RECENCY_WEIGHT: f64 = 0.2;
const RECENCY_HORIZON_DAYS: f64 = 365.0;

const OFFICIAL_KEYWORDS: &[&str] = &["official", "investor relations", "ir"];
const NEWS_OUTLETS: &[&str] = &[
    "bloomberg",
    "cnbc",
    "reuters",
    "financial times",
    "wall street journal",
    "marketwatch",
    "seeking alpha",
    "yahoo finance",
    "the motley fool",
];
const EXPERT_KEYWORDS: &[&str] = &["cfa", "analyst", "investing", "finance"];

/// Recency component in [0, 0.2], decaying linearly to zero over a year.
///
/// An unparseable or missing publish time earns the full recency weight,
/// and so does a publish time in the future.
pub fn recency_score(published_at: Option<&str>, now: DateTime<Utc>) -> f64 {
    let Some(published) = published_at.and_then(|p| DateTime::parse_from_rfc3339(p).ok()) else {
        return RECENCY_WEIGHT;
    };
    let days_old = (now - published.with_timezone(&Utc)).num_days().max(0) as f64;
    (RECENCY_WEIGHT - (days_old / RECENCY_HORIZON_DAYS) * RECENCY_WEIGHT).clamp(0.0, RECENCY_WEIGHT)
}

/// Blends views, engagement and recency into a score in [0, 1], rounded to
/// two decimals.
pub fn compute_quality_score(
    view_count: u64,
    like_count: u64,
    comment_count: u64,
    published_at: Option<&str>,
    now: DateTime<Utc>,
) -> f64 {
    let view = (view_count as f64 / VIEW_SATURATION).min(1.0) * VIEW_WEIGHT;
    let engagement = (like_count.saturating_add(comment_count) as f64 / ENGAGEMENT_SATURATION)
        .min(1.0)
        * ENGAGEMENT_WEIGHT;
    let total = view + engagement + recency_score(published_at, now);
    ((total * 100.0).round() / 100.0).clamp(0.0, 1.0)
}

/// Classifies a channel by keywords in its title. Earlier tiers win.
pub fn classify_trust_tier(channel_title: &str) -> TrustTier {
    let title = channel_title.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| title.contains(w));

    if mentions(OFFICIAL_KEYWORDS) {
        TrustTier::OfficialCompany
    } else if mentions(NEWS_OUTLETS) {
        TrustTier::ProfessionalNews
    } else if mentions(EXPERT_KEYWORDS) {
        TrustTier::VettedExpert
    } else {
        TrustTier::Community
    }
}
