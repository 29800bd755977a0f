use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::main_lib::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Quote provider has an API key
    pub finnhub: bool,
    /// Video search provider has an API key
    pub youtube: bool,
}

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
}

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Liveness")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Readiness")))]
pub async fn readyz() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses((status = 200, description = "Provider configuration flags"))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        finnhub: state.quote_service.is_provider_configured(),
        youtube: state.video_search_configured,
    })
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "MiltonTV API - Stock Video Streaming Platform",
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/health", get(health))
}
