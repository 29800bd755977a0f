//! Tests for VideoService freshness gating, filtering, sorting and paging.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Utc};

use super::*;
use crate::channels::ChannelService;
use crate::errors::Error;
use crate::test_support::{video, MockChannelRepository, MockVideoProvider, MockVideoRepository};

struct Fixture {
    service: VideoService,
    provider: Arc<MockVideoProvider>,
    repo: MockVideoRepository,
}

fn fixture(stored: Vec<Video>, provider: MockVideoProvider) -> Fixture {
    let channels = Arc::new(ChannelService::new(Arc::new(MockChannelRepository::seeded())));
    let provider = Arc::new(provider);
    let repo = MockVideoRepository::with_videos(stored);
    let fetcher = Arc::new(VideoFetcher::new(
        channels.clone(),
        provider.clone(),
        Arc::new(repo.clone()),
    ));
    Fixture {
        service: VideoService::new(channels, Arc::new(repo.clone()), fetcher),
        provider,
        repo,
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn stale() -> NaiveDateTime {
    now() - Duration::hours(2)
}

fn fresh_aapl(count: usize) -> Vec<Video> {
    (0..count)
        .map(|i| {
            video(
                &format!("a{}", i),
                "AAPL",
                TrustTier::Community,
                1_000 * i as i64,
                0.1 * i as f64,
                now(),
            )
        })
        .collect()
}

fn request(ticker: &str) -> VideoListRequest {
    VideoListRequest {
        ticker: ticker.to_string(),
        page: 1,
        page_size: 10,
        trust_tier: None,
        sort: VideoSort::Quality,
    }
}

#[tokio::test]
async fn enough_fresh_videos_skip_the_provider() {
    let f = fixture(fresh_aapl(5), MockVideoProvider::default());

    let page = f.service.list_videos(request("AAPL")).await.unwrap();

    assert_eq!(f.provider.search_calls(), 0);
    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 5);
}

#[tokio::test]
async fn too_few_fresh_videos_trigger_exactly_one_fetch() {
    let provider = MockVideoProvider::with_candidates(&[
        ("y1", "CNBC", 10),
        ("y2", "CNBC", 20),
        ("y3", "CNBC", 30),
    ]);
    let f = fixture(fresh_aapl(3), provider);

    let page = f.service.list_videos(request("aapl")).await.unwrap();

    assert_eq!(f.provider.search_calls(), 1);
    assert_eq!(f.provider.queries.lock().unwrap()[0].max_results, 20);
    assert_eq!(page.total, 6);
}

#[tokio::test]
async fn stale_videos_are_not_served() {
    let mut stored = fresh_aapl(5);
    stored.push(video("old", "AAPL", TrustTier::Community, 5, 0.99, stale()));
    let f = fixture(stored, MockVideoProvider::default());

    let page = f.service.list_videos(request("AAPL")).await.unwrap();

    assert_eq!(page.total, 5);
    assert!(page.items.iter().all(|v| v.video_id != "old"));
}

#[tokio::test]
async fn threshold_uses_unfiltered_fresh_count() {
    // Five fresh videos, only one of them official
    let mut stored = fresh_aapl(4);
    stored.push(video("off", "AAPL", TrustTier::OfficialCompany, 1, 0.5, now()));
    let f = fixture(stored, MockVideoProvider::default());

    let page = f
        .service
        .list_videos(VideoListRequest {
            trust_tier: Some(TrustTier::OfficialCompany),
            ..request("AAPL")
        })
        .await
        .unwrap();

    assert_eq!(f.provider.search_calls(), 0);
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].video_id, "off");
}

#[tokio::test]
async fn sort_by_views_descending() {
    let stored = vec![
        video("a", "AAPL", TrustTier::Community, 500, 0.1, now()),
        video("b", "AAPL", TrustTier::Community, 10_000, 0.1, now()),
        video("c", "AAPL", TrustTier::Community, 100, 0.1, now()),
        video("d", "AAPL", TrustTier::Community, 50, 0.1, now()),
        video("e", "AAPL", TrustTier::Community, 10, 0.1, now()),
    ];
    let f = fixture(stored, MockVideoProvider::default());

    let page = f
        .service
        .list_videos(VideoListRequest {
            sort: VideoSort::Views,
            page_size: 3,
            ..request("AAPL")
        })
        .await
        .unwrap();

    let views: Vec<i64> = page.items.iter().map(|v| v.view_count).collect();
    assert_eq!(views, vec![10_000, 500, 100]);
}

#[tokio::test]
async fn sort_by_date_newest_first_with_missing_dates_last() {
    let dated = |id: &str, at: Option<&str>| {
        let mut v = video(id, "AAPL", TrustTier::Community, 1, 0.1, now());
        v.published_at = at.map(str::to_string);
        v
    };
    let stored = vec![
        dated("undated", None),
        dated("old", Some("2024-01-15T09:30:00Z")),
        dated("new_b", Some("2024-05-01T08:00:00Z")),
        dated("mid", Some("2024-03-01T10:00:00Z")),
        dated("new_a", Some("2024-05-01T08:00:00Z")),
    ];
    let f = fixture(stored, MockVideoProvider::default());

    let page = f
        .service
        .list_videos(VideoListRequest {
            sort: "date".parse().unwrap(),
            ..request("AAPL")
        })
        .await
        .unwrap();

    let ids: Vec<&str> = page.items.iter().map(|v| v.video_id.as_str()).collect();
    assert_eq!(ids, vec!["new_a", "new_b", "mid", "old", "undated"]);
    assert_eq!(f.provider.search_calls(), 0);
}

#[tokio::test]
async fn quality_ties_are_broken_by_video_id() {
    let stored = ["e", "c", "a", "d", "b"]
        .iter()
        .map(|id| video(id, "AAPL", TrustTier::Community, 1, 0.5, now()))
        .collect();
    let f = fixture(stored, MockVideoProvider::default());

    let page = f.service.list_videos(request("AAPL")).await.unwrap();

    let ids: Vec<&str> = page.items.iter().map(|v| v.video_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn pagination_and_out_of_range_page() {
    let f = fixture(fresh_aapl(7), MockVideoProvider::default());

    let second = f
        .service
        .list_videos(VideoListRequest {
            page: 2,
            page_size: 5,
            ..request("AAPL")
        })
        .await
        .unwrap();
    assert_eq!(second.total, 7);
    assert_eq!(second.total_pages, 2);
    assert_eq!(second.items.len(), 2);

    let beyond = f
        .service
        .list_videos(VideoListRequest {
            page: 3,
            page_size: 5,
            ..request("AAPL")
        })
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_pages, 2);
}

#[tokio::test]
async fn invalid_page_size_is_rejected() {
    let f = fixture(fresh_aapl(5), MockVideoProvider::default());

    let err = f
        .service
        .list_videos(VideoListRequest {
            page_size: 51,
            ..request("AAPL")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(f.provider.search_calls(), 0);
}

#[tokio::test]
async fn unknown_ticker_is_not_found() {
    let f = fixture(Vec::new(), MockVideoProvider::default());

    let err = f.service.list_videos(request("ZZZZ")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(f.provider.search_calls(), 0);
}

#[tokio::test]
async fn fetch_failure_propagates() {
    let provider = MockVideoProvider::default();
    *provider.fail_search.lock().unwrap() = Some(miltontv_providers::MarketDataError::Timeout {
        provider: "YOUTUBE".to_string(),
    });
    let f = fixture(fresh_aapl(1), provider);

    let err = f.service.list_videos(request("AAPL")).await.unwrap_err();
    assert!(matches!(err, Error::ExternalService(_)));
}

#[test]
fn search_matches_title_or_description_across_tickers() {
    let mut earnings = video("e1", "AAPL", TrustTier::ProfessionalNews, 1, 0.4, stale());
    earnings.title = "Apple EARNINGS recap".to_string();
    let mut described = video("e2", "MSFT", TrustTier::Community, 1, 0.9, now());
    described.description = "Talking about earnings season".to_string();
    let other = video("x", "TSLA", TrustTier::Community, 1, 0.99, now());
    let f = fixture(vec![earnings, described, other], MockVideoProvider::default());

    let page = f
        .service
        .search_videos(VideoSearchRequest {
            query: "earnings".to_string(),
            trust_tier: None,
            page: 1,
            page_size: 10,
        })
        .unwrap();

    let ids: Vec<&str> = page.items.iter().map(|v| v.video_id.as_str()).collect();
    assert_eq!(ids, vec!["e2", "e1"]);

    let filtered = f
        .service
        .search_videos(VideoSearchRequest {
            query: "earnings".to_string(),
            trust_tier: Some(TrustTier::ProfessionalNews),
            page: 1,
            page_size: 10,
        })
        .unwrap();
    assert_eq!(filtered.total, 1);
    assert_eq!(filtered.items[0].video_id, "e1");
}

#[test]
fn empty_search_query_is_rejected() {
    let f = fixture(Vec::new(), MockVideoProvider::default());

    let err = f
        .service
        .search_videos(VideoSearchRequest {
            query: "   ".to_string(),
            trust_tier: None,
            page: 1,
            page_size: 10,
        })
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn stats_count_channels_videos_and_tiers() {
    let stored = vec![
        video("a", "AAPL", TrustTier::Community, 1, 0.1, now()),
        video("b", "AAPL", TrustTier::ProfessionalNews, 1, 0.1, now()),
        video("c", "MSFT", TrustTier::Community, 1, 0.1, stale()),
    ];
    let f = fixture(stored, MockVideoProvider::default());

    let stats = f.service.get_stats().unwrap();

    assert_eq!(stats.total_channels, 3);
    assert_eq!(stats.total_videos, 3);
    assert_eq!(stats.fresh_videos, 2);
    assert_eq!(stats.by_trust_tier["Community"], 2);
    assert_eq!(stats.by_trust_tier["Professional News"], 1);
    assert_eq!(stats.by_trust_tier["Official Company"], 0);
    assert_eq!(stats.by_trust_tier.len(), 4);
}

#[tokio::test]
async fn refresh_forces_a_fetch() {
    let provider = MockVideoProvider::with_candidates(&[("y1", "CNBC", 10)]);
    let f = fixture(fresh_aapl(10), provider);

    let videos = f.service.refresh_videos("AAPL", 10).await.unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(f.provider.search_calls(), 1);
    assert_eq!(f.repo.upsert_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn refresh_rejects_out_of_range_max_results() {
    let f = fixture(Vec::new(), MockVideoProvider::default());

    let err = f.service.refresh_videos("AAPL", 0).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
