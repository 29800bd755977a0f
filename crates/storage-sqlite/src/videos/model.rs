//! Database model for videos.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use miltontv_core::videos::{TrustTier, Video};

use crate::errors::StorageError;

/// Database model for videos
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::videos)]
#[diesel(primary_key(video_id, ticker))]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VideoDB {
    pub video_id: String,
    pub ticker: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub source: String,
    pub trust_tier: String,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub quality_score: f64,
    pub published_at: Option<String>,
    pub channel_title: String,
    pub cached_at: NaiveDateTime,
}

impl From<Video> for VideoDB {
    fn from(v: Video) -> Self {
        Self {
            video_id: v.video_id,
            ticker: v.ticker,
            title: v.title,
            description: v.description,
            thumbnail_url: v.thumbnail_url,
            source: v.source,
            trust_tier: v.trust_tier.as_str().to_string(),
            view_count: v.view_count,
            like_count: v.like_count,
            comment_count: v.comment_count,
            quality_score: v.quality_score.clamp(0.0, 1.0),
            published_at: v.published_at,
            channel_title: v.channel_title,
            cached_at: v.cached_at,
        }
    }
}

impl TryFrom<VideoDB> for Video {
    type Error = StorageError;

    fn try_from(db: VideoDB) -> Result<Self, Self::Error> {
        let trust_tier = TrustTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == db.trust_tier)
            .ok_or_else(|| {
                StorageError::InvalidRecord(format!(
                    "video {}/{} has unknown trust tier '{}'",
                    db.video_id, db.ticker, db.trust_tier
                ))
            })?;
        if !(0.0..=1.0).contains(&db.quality_score) {
            return Err(StorageError::InvalidRecord(format!(
                "video {}/{} has quality score {} outside [0, 1]",
                db.video_id, db.ticker, db.quality_score
            )));
        }

        Ok(Video {
            video_id: db.video_id,
            ticker: db.ticker,
            title: db.title,
            description: db.description,
            thumbnail_url: db.thumbnail_url,
            source: db.source,
            trust_tier,
            view_count: db.view_count,
            like_count: db.like_count,
            comment_count: db.comment_count,
            quality_score: db.quality_score,
            published_at: db.published_at,
            channel_title: db.channel_title,
            cached_at: db.cached_at,
        })
    }
}
