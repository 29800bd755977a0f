use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::channels_model::{normalize_ticker, Channel, ChannelInitResult};
use super::channels_traits::{ChannelRepositoryTrait, ChannelServiceTrait};
use super::registry::default_channels;
use crate::errors::{Error, Result};

/// Service for the channel registry
pub struct ChannelService {
    repository: Arc<dyn ChannelRepositoryTrait>,
}

impl ChannelService {
    pub fn new(repository: Arc<dyn ChannelRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ChannelServiceTrait for ChannelService {
    fn get_channels(&self) -> Result<Vec<Channel>> {
        self.repository.list_channels()
    }

    fn get_channel(&self, ticker: &str) -> Result<Channel> {
        let ticker = normalize_ticker(ticker)?;
        self.repository
            .get_channel(&ticker)?
            .ok_or_else(|| Error::NotFound(format!("Channel {} not found", ticker)))
    }

    fn get_tickers(&self) -> Result<Vec<String>> {
        Ok(self
            .repository
            .list_channels()?
            .into_iter()
            .map(|c| c.ticker)
            .collect())
    }

    fn count_channels(&self) -> Result<i64> {
        self.repository.count_channels()
    }

    async fn initialize_channels(&self) -> Result<ChannelInitResult> {
        let existing = self.repository.count_channels()?;
        if existing > 0 {
            debug!("Channel registry already holds {} channels", existing);
            return Ok(ChannelInitResult {
                message: format!("Channels already initialized. Found {} channels.", existing),
                created: 0,
                total: existing,
            });
        }

        let created = self.repository.insert_channels(default_channels()).await?;
        info!("Seeded channel registry with {} channels", created);
        Ok(ChannelInitResult {
            message: format!("Successfully initialized {} channels", created),
            created,
            total: created as i64,
        })
    }
}
