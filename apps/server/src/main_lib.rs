use std::sync::Arc;

use miltontv_core::channels::{ChannelService, ChannelServiceTrait};
use miltontv_core::quotes::{QuoteService, QuoteServiceTrait};
use miltontv_core::videos::{
    RefresherConfig, VideoFetcher, VideoFetcherTrait, VideoRefresher, VideoService,
    VideoServiceTrait,
};
use miltontv_providers::{FinnhubProvider, QuoteProvider, VideoSearchProvider, YouTubeProvider};
use miltontv_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, ChannelRepository, VideoRepository,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub channel_service: Arc<dyn ChannelServiceTrait>,
    pub video_service: Arc<dyn VideoServiceTrait>,
    pub quote_service: Arc<dyn QuoteServiceTrait>,
    pub video_refresher: Arc<VideoRefresher>,
    /// Whether the video search provider has credentials.
    pub video_search_configured: bool,
}

pub fn init_tracing() {
    let log_format = std::env::var("MTV_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let quote_provider: Arc<dyn QuoteProvider> =
        Arc::new(FinnhubProvider::new(config.finnhub_api_key.clone()));
    let video_provider: Arc<dyn VideoSearchProvider> =
        Arc::new(YouTubeProvider::new(config.youtube_api_key.clone()));

    if !quote_provider.is_configured() {
        tracing::warn!("FINNHUB_API_KEY is not set; stock quotes will be unavailable");
    }
    if !video_provider.is_configured() {
        tracing::warn!("YOUTUBE_API_KEY is not set; video fetching will fail");
    }

    build_state_with_providers(config, quote_provider, video_provider).await
}

/// Wires storage, services and the given providers into the shared state.
pub async fn build_state_with_providers(
    config: &Config,
    quote_provider: Arc<dyn QuoteProvider>,
    video_provider: Arc<dyn VideoSearchProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let channel_repository = Arc::new(ChannelRepository::new(pool.clone(), writer.clone()));
    let video_repository = Arc::new(VideoRepository::new(pool.clone(), writer));

    let channel_service: Arc<dyn ChannelServiceTrait> =
        Arc::new(ChannelService::new(channel_repository));
    let init_result = channel_service.initialize_channels().await?;
    tracing::info!("{}", init_result.message);

    let video_search_configured = video_provider.is_configured();
    let fetcher: Arc<dyn VideoFetcherTrait> = Arc::new(VideoFetcher::new(
        channel_service.clone(),
        video_provider,
        video_repository.clone(),
    ));
    let video_service: Arc<dyn VideoServiceTrait> = Arc::new(VideoService::new(
        channel_service.clone(),
        video_repository.clone(),
        fetcher.clone(),
    ));
    let quote_service: Arc<dyn QuoteServiceTrait> = Arc::new(QuoteService::new(quote_provider));

    let video_refresher = Arc::new(VideoRefresher::new(
        channel_service.clone(),
        video_repository,
        fetcher,
        RefresherConfig {
            ticker_delay: config.refresh_ticker_delay,
            ..RefresherConfig::default()
        },
    ));

    Ok(Arc::new(AppState {
        channel_service,
        video_service,
        quote_service,
        video_refresher,
        video_search_configured,
    }))
}
