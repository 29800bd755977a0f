use crate::channels::channels_model::{Channel, ChannelInitResult, NewChannel};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for channel repository operations
#[async_trait]
pub trait ChannelRepositoryTrait: Send + Sync {
    /// All channels ordered by channel number.
    fn list_channels(&self) -> Result<Vec<Channel>>;
    fn get_channel(&self, ticker: &str) -> Result<Option<Channel>>;
    fn count_channels(&self) -> Result<i64>;
    async fn insert_channels(&self, channels: Vec<NewChannel>) -> Result<usize>;
}

/// Trait for channel service operations
#[async_trait]
pub trait ChannelServiceTrait: Send + Sync {
    fn get_channels(&self) -> Result<Vec<Channel>>;
    /// Case-insensitive lookup; unknown tickers are `Error::NotFound`.
    fn get_channel(&self, ticker: &str) -> Result<Channel>;
    /// Tickers in channel order.
    fn get_tickers(&self) -> Result<Vec<String>>;
    fn count_channels(&self) -> Result<i64>;
    /// Seeds the static channel list when the registry is empty.
    async fn initialize_channels(&self) -> Result<ChannelInitResult>;
}
