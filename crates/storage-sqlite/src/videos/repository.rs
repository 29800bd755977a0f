use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use miltontv_core::videos::{TrustTier, Video, VideoFilter, VideoRepositoryTrait, VideoSort};
use miltontv_core::Result;

use super::model::VideoDB;
use crate::db::{fold_case, get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::videos;

pub struct VideoRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

/// Escapes LIKE wildcards so user text matches literally.
fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Applies a [`VideoFilter`] to any boxed query over `videos`.
fn apply_filter<'a, ST: 'a>(
    mut query: videos::BoxedQuery<'a, Sqlite, ST>,
    filter: &VideoFilter,
) -> videos::BoxedQuery<'a, Sqlite, ST> {
    if let Some(ticker) = &filter.ticker {
        query = query.filter(videos::ticker.eq(ticker.clone()));
    }
    if let Some(since) = filter.cached_since {
        query = query.filter(videos::cached_at.ge(since));
    }
    if let Some(tier) = filter.trust_tier {
        query = query.filter(videos::trust_tier.eq(tier.as_str()));
    }
    if let Some(text) = filter.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        // Both sides are folded so non-ASCII letters match across case
        let pattern = like_pattern(&text.to_lowercase());
        query = query.filter(
            fold_case(videos::title)
                .like(pattern.clone())
                .escape('\\')
                .or(fold_case(videos::description).like(pattern).escape('\\')),
        );
    }
    query
}

impl VideoRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        VideoRepository { pool, writer }
    }

    fn to_domain(rows: Vec<VideoDB>) -> Result<Vec<Video>> {
        rows.into_iter()
            .map(|row| Video::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl VideoRepositoryTrait for VideoRepository {
    async fn upsert_videos(&self, new_videos: Vec<Video>) -> Result<usize> {
        if new_videos.is_empty() {
            return Ok(0);
        }
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected_rows = 0;
                for video in new_videos {
                    let row: VideoDB = video.into();
                    affected_rows += diesel::insert_into(videos::table)
                        .values(&row)
                        .on_conflict((videos::video_id, videos::ticker))
                        .do_update()
                        .set(&row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(affected_rows)
            })
            .await
    }

    fn find_videos(
        &self,
        filter: &VideoFilter,
        sort: VideoSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Video>> {
        let mut conn = get_connection(&self.pool)?;
        let query = apply_filter(videos::table.into_boxed(), filter);
        let query = match sort {
            VideoSort::Quality => query.order((videos::quality_score.desc(), videos::video_id.asc())),
            VideoSort::Date => query.order((videos::published_at.desc(), videos::video_id.asc())),
            VideoSort::Views => query.order((videos::view_count.desc(), videos::video_id.asc())),
        };
        let rows = query
            .offset(offset.max(0))
            .limit(limit.max(0))
            .load::<VideoDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_domain(rows)
    }

    fn count_videos(&self, filter: &VideoFilter) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let query = apply_filter(videos::table.select(count_star()).into_boxed(), filter);
        Ok(query.get_result::<i64>(&mut conn).map_err(StorageError::from)?)
    }

    fn count_by_trust_tier(&self) -> Result<Vec<(TrustTier, i64)>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = videos::table
            .group_by(videos::trust_tier)
            .select((videos::trust_tier, count_star()))
            .load::<(String, i64)>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|(label, count)| {
                TrustTier::ALL
                    .into_iter()
                    .find(|tier| tier.as_str() == label)
                    .map(|tier| (tier, count))
                    .ok_or_else(|| {
                        StorageError::InvalidRecord(format!("unknown trust tier '{}'", label))
                            .into()
                    })
            })
            .collect()
    }

    async fn delete_videos_cached_before(
        &self,
        ticker_value: &str,
        cached_before: NaiveDateTime,
    ) -> Result<usize> {
        let ticker_value = ticker_value.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted = diesel::delete(
                    videos::table
                        .filter(videos::ticker.eq(&ticker_value))
                        .filter(videos::cached_at.lt(cached_before)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                debug!("Deleted {} videos of {} cached before {}", deleted, ticker_value, cached_before);
                Ok(deleted)
            })
            .await
    }
}
