use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use miltontv_core::channels::{build_channel_overview, Channel, ChannelInitResult, ChannelOverview};

use crate::{error::ApiResult, main_lib::AppState};

#[utoipa::path(
    post,
    path = "/api/v1/channels/init",
    responses((status = 200, description = "Seeds the channel registry when it is empty"))
)]
pub async fn initialize_channels(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ChannelInitResult>> {
    let result = state.channel_service.initialize_channels().await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/channels",
    responses((status = 200, description = "All channels in channel order"))
)]
pub async fn list_channels(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Channel>>> {
    let channels = state.channel_service.get_channels()?;
    Ok(Json(channels))
}

#[utoipa::path(
    get,
    path = "/api/v1/channels/{ticker}",
    params(("ticker" = String, Path, description = "Stock ticker, case-insensitive")),
    responses(
        (status = 200, description = "The channel"),
        (status = 404, description = "Unknown ticker")
    )
)]
pub async fn get_channel(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Channel>> {
    let channel = state.channel_service.get_channel(&ticker)?;
    Ok(Json(channel))
}

#[utoipa::path(
    get,
    path = "/api/v1/channels/{ticker}/full",
    params(("ticker" = String, Path, description = "Stock ticker, case-insensitive")),
    responses(
        (status = 200, description = "Channel with its top videos and current quote"),
        (status = 404, description = "Unknown ticker")
    )
)]
pub async fn get_channel_full(
    Path(ticker): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ChannelOverview>> {
    let overview = build_channel_overview(
        state.channel_service.as_ref(),
        state.video_service.as_ref(),
        state.quote_service.as_ref(),
        &ticker,
    )
    .await?;
    Ok(Json(overview))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/channels/init", post(initialize_channels))
        .route("/channels", get(list_channels))
        .route("/channels/{ticker}", get(get_channel))
        .route("/channels/{ticker}/full", get(get_channel_full))
}
