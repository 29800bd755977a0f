use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use miltontv_core::constants::DEFAULT_PAGE_SIZE;
use miltontv_core::videos::{
    PagedResult, TrustTier, Video, VideoListRequest, VideoSearchRequest, VideoSort,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

const DEFAULT_REFRESH_MAX_RESULTS: u32 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVideosQuery {
    page: Option<u32>,
    page_size: Option<u32>,
    trust_tier: Option<String>,
    sort_by: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshQuery {
    max_results: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    q: Option<String>,
    trust_tier: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

/// Empty query values behave like absent ones.
fn parse_trust_tier(raw: Option<&str>) -> ApiResult<Option<TrustTier>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(label) => Ok(Some(label.parse()?)),
        None => Ok(None),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/channels/{ticker}/videos",
    params(
        ("ticker" = String, Path, description = "Stock ticker, case-insensitive"),
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("pageSize" = Option<u32>, Query, description = "1..=50, default 10"),
        ("trustTier" = Option<String>, Query, description = "Trust tier label"),
        ("sortBy" = Option<String>, Query, description = "quality, date or views")
    ),
    responses(
        (status = 200, description = "A page of fresh videos"),
        (status = 400, description = "Invalid paging, tier or sort"),
        (status = 404, description = "Unknown ticker"),
        (status = 502, description = "Video provider failure")
    )
)]
pub async fn list_channel_videos(
    Path(ticker): Path<String>,
    query: Result<Query<ListVideosQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PagedResult<Video>>> {
    let Query(query) = query?;
    let sort = match query.sort_by.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw.parse::<VideoSort>()?,
        _ => VideoSort::default(),
    };
    let request = VideoListRequest {
        ticker,
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        trust_tier: parse_trust_tier(query.trust_tier.as_deref())?,
        sort,
    };
    let page = state.video_service.list_videos(request).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/api/v1/channels/{ticker}/videos/refresh",
    params(
        ("ticker" = String, Path, description = "Stock ticker, case-insensitive"),
        ("maxResults" = Option<u32>, Query, description = "1..=50, default 10")
    ),
    responses(
        (status = 200, description = "Videos fetched and cached"),
        (status = 404, description = "Unknown ticker"),
        (status = 502, description = "Video provider failure")
    )
)]
pub async fn refresh_channel_videos(
    Path(ticker): Path<String>,
    query: Result<Query<RefreshQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Video>>> {
    let Query(query) = query?;
    let max_results = query.max_results.unwrap_or(DEFAULT_REFRESH_MAX_RESULTS);
    let videos = state.video_service.refresh_videos(&ticker, max_results).await?;
    Ok(Json(videos))
}

#[utoipa::path(
    get,
    path = "/api/v1/videos/search",
    params(
        ("q" = String, Query, description = "Text matched against title and description"),
        ("trustTier" = Option<String>, Query, description = "Trust tier label"),
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("pageSize" = Option<u32>, Query, description = "1..=50, default 10")
    ),
    responses(
        (status = 200, description = "Matching cached videos, best quality first"),
        (status = 400, description = "Missing query or invalid paging")
    )
)]
pub async fn search_videos(
    query: Result<Query<SearchQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PagedResult<Video>>> {
    let Query(query) = query?;
    let request = VideoSearchRequest {
        query: query.q.unwrap_or_default(),
        trust_tier: parse_trust_tier(query.trust_tier.as_deref())?,
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    let page = state.video_service.search_videos(request)?;
    Ok(Json(page))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/channels/{ticker}/videos", get(list_channel_videos))
        .route("/channels/{ticker}/videos/refresh", post(refresh_channel_videos))
        .route("/videos/search", get(search_videos))
}
