//! Channels module - the registry of tickers the backend curates videos for.

mod channels_model;
mod channels_service;
mod channels_traits;
mod overview;
mod registry;


pub use channels_model::{normalize_ticker, Channel, ChannelInitResult, ChannelOverview, NewChannel};
pub use channels_service::ChannelService;
pub use channels_traits::{ChannelRepositoryTrait, ChannelServiceTrait};
pub use overview::build_channel_overview;
pub use registry::{default_channels, STOCK_CHANNELS};
