use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use miltontv_core::videos::VideoStats;

use crate::{error::ApiResult, main_lib::AppState};

#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses((status = 200, description = "Channel and video counts"))
)]
pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<VideoStats>> {
    let stats = state.video_service.get_stats()?;
    Ok(Json(stats))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}
