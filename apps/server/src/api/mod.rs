use std::sync::Arc;

use anyhow::Context;
use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{config::Config, main_lib::AppState};

mod channels;
mod health;
mod quotes;
mod stats;
mod videos;

#[derive(OpenApi)]
#[openapi(
    info(title = "MiltonTV API", description = "Stock quotes and curated videos per ticker"),
    paths(
        health::healthz,
        health::readyz,
        health::health,
        channels::initialize_channels,
        channels::list_channels,
        channels::get_channel,
        channels::get_channel_full,
        videos::list_channel_videos,
        videos::refresh_channel_videos,
        videos::search_videos,
        quotes::get_stock_quote,
        stats::get_stats,
    )
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    }
    .allow_methods(Any)
    .allow_headers(Any);

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .merge(health::router())
        .merge(channels::router())
        .merge(videos::router())
        .merge(quotes::router())
        .merge(stats::router())
        .route(
            "/openapi.json",
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .with_state(state);

    Ok(Router::new()
        .nest("/api/v1", api)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        // Outermost, so the id exists before tracing and propagation see it
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
}
