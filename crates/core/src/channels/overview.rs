use log::warn;

use super::channels_model::ChannelOverview;
use super::channels_traits::ChannelServiceTrait;
use crate::errors::Result;
use crate::quotes::QuoteServiceTrait;
use crate::videos::{VideoListRequest, VideoServiceTrait, VideoSort};

/// Number of videos embedded in a channel overview.
const OVERVIEW_VIDEO_COUNT: u32 = 5;

/// Assembles a channel, its best fresh videos and its quote.
///
/// A failing quote lookup leaves `stock_data` empty instead of failing the
/// whole overview; channel and video errors are returned.
pub async fn build_channel_overview(
    channels: &dyn ChannelServiceTrait,
    videos: &dyn VideoServiceTrait,
    quotes: &dyn QuoteServiceTrait,
    ticker: &str,
) -> Result<ChannelOverview> {
    let channel = channels.get_channel(ticker)?;

    let page = videos
        .list_videos(VideoListRequest {
            ticker: channel.ticker.clone(),
            page: 1,
            page_size: OVERVIEW_VIDEO_COUNT,
            trust_tier: None,
            sort: VideoSort::Quality,
        })
        .await?;

    let stock_data = match quotes.get_quote(&channel.ticker).await {
        Ok(quote) => Some(quote),
        Err(e) => {
            warn!("Quote unavailable for {}: {}", channel.ticker, e);
            None
        }
    };

    let current_video = page.items.first().cloned();
    Ok(ChannelOverview {
        channel,
        videos: page.items,
        current_video,
        stock_data,
    })
}
